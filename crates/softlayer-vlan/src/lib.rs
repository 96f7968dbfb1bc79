//! # softlayer-vlan
//!
//! Provisioning of SoftLayer VLANs from a declarative [`VlanRecord`].
//!
//! ## Modules
//!
//! - [`record`] - The tracked VLAN record and its validation
//! - [`order`] - Priced order construction from the product catalog
//! - [`waiter`] - Completion polling for placed orders
//! - [`reconcile`] - Mapping of remote VLAN state onto the record
//! - [`resource`] - Create, read, update, delete, exists and import
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use softlayer_api::SoftLayerClient;
//! use softlayer_core::config::SoftLayerConfig;
//! use softlayer_core::types::VlanType;
//! use softlayer_vlan::{VlanRecord, VlanResource};
//!
//! # async fn example() -> softlayer_core::Result<()> {
//! let client = SoftLayerClient::from_config(&SoftLayerConfig::from_env()?)?;
//! let resource = VlanResource::new(Arc::new(client));
//!
//! let mut record = VlanRecord::new("dal09", VlanType::Private, 8).with_name("backend");
//! resource.create(&mut record).await?;
//! println!("created vlan {:?}", record.id);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod order;
pub mod reconcile;
pub mod record;
pub mod resource;
pub mod waiter;

pub use order::{OrderBuilder, OrderRequest};
pub use record::{VlanRecord, VlanSubnet};
pub use resource::VlanResource;
pub use waiter::{OrderState, OrderWaiter};

/// Result alias sharing the `softlayer-core` error type.
pub type Result<T> = softlayer_core::Result<T>;
