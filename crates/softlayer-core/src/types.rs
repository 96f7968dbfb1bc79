//! Core SoftLayer domain types.
//!
//! VLAN types and the product catalog package types VLAN orders are placed against.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Hostname fragment carried by frontend (public) customer routers.
pub const PUBLIC_ROUTER_MARKER: &str = "fcr";
/// Hostname fragment carried by backend (private) customer routers.
pub const PRIVATE_ROUTER_MARKER: &str = "bcr";

/// Network side a VLAN lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VlanType {
    /// Backend network
    Private,
    /// Frontend, internet-facing network
    Public,
}

impl VlanType {
    /// Returns the type name as used by the catalog and in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "PRIVATE",
            Self::Public => "PUBLIC",
        }
    }

    /// Catalog item key name for a VLAN of this type, e.g. `PUBLIC_NETWORK_VLAN`.
    #[must_use]
    pub fn item_key_name(&self) -> String {
        format!("{}_NETWORK_VLAN", self.as_str())
    }

    /// Derives the type from a primary router hostname.
    ///
    /// Only an `fcr` prefix marks a public VLAN; every other router is private.
    #[must_use]
    pub fn from_router_hostname(hostname: &str) -> Self {
        if hostname.starts_with(PUBLIC_ROUTER_MARKER) {
            Self::Public
        } else {
            Self::Private
        }
    }

    /// Returns true if `router` belongs to the other network side.
    #[must_use]
    pub fn conflicts_with_router(&self, router: &str) -> bool {
        match self {
            Self::Private => router.contains(PUBLIC_ROUTER_MARKER),
            Self::Public => router.contains(PRIVATE_ROUTER_MARKER),
        }
    }
}

impl FromStr for VlanType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PRIVATE" => Ok(Self::Private),
            "PUBLIC" => Ok(Self::Public),
            _ => Err(Error::ValidationError(format!(
                "vlan type should be either 'PRIVATE' or 'PUBLIC', got '{s}'"
            ))),
        }
    }
}

impl fmt::Display for VlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product catalog package types that sell VLANs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageType {
    /// Dedicated network VLAN package
    AdditionalServicesNetworkVlan,
    /// Generic additional services package
    AdditionalServices,
}

impl PackageType {
    /// Returns the package type key name.
    #[must_use]
    pub const fn key_name(&self) -> &'static str {
        match self {
            Self::AdditionalServicesNetworkVlan => "ADDITIONAL_SERVICES_NETWORK_VLAN",
            Self::AdditionalServices => "ADDITIONAL_SERVICES",
        }
    }

    /// Package types tried, in order, when ordering a VLAN.
    ///
    /// Which one carries VLAN items depends on the account.
    #[must_use]
    pub const fn vlan_order_candidates() -> &'static [Self] {
        &[Self::AdditionalServicesNetworkVlan, Self::AdditionalServices]
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_name())
    }
}

/// Catalog item key name fragment for a static subnet of `size` addresses.
#[must_use]
pub fn subnet_item_key_fragment(size: u64) -> String {
    format!("{size}_STATIC_PUBLIC_IP_ADDRESSES")
}
