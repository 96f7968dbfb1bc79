//! # softlayer-core
//!
//! Core types and utilities for provisioning SoftLayer resources.
//!
//! This crate provides the shared error taxonomy, configuration, HTTP client settings and
//! query helpers used by the API client and resource crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`ids`] - Strongly-typed numeric identifiers for SoftLayer objects
//! - [`types`] - Core domain types (VLAN type, catalog package types)
//! - [`config`] - Validated client and provisioning configuration
//! - [`client`] - HTTP client settings and retry policy
//! - [`query`] - Object mask and object filter builders

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod query;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
