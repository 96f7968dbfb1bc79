//! SoftLayer API client and data models.
//!
//! Provides the [`SoftLayerApi`] trait covering the account, network, product catalog and
//! billing calls VLAN provisioning needs, and [`SoftLayerClient`], its REST implementation.

#![deny(missing_docs)]

pub mod api;
pub mod client;
pub mod models;

pub use api::SoftLayerApi;
pub use client::{SoftLayerClient, SoftLayerClientBuilder};
pub use models::{
    BillingItem, Hardware, Location, NetworkVlan, OrderReceipt, PriceRef, ProductItem,
    ProductItemPrice, ProductPackage, Subnet, VlanOrder,
};

/// Convenient result alias sharing the `softlayer-core` error type.
pub type Result<T> = softlayer_core::Result<T>;
