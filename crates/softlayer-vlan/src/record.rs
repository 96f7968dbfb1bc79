//! The tracked VLAN record.

use serde::{Deserialize, Serialize};
use softlayer_core::ids::VlanId;
use softlayer_core::types::VlanType;
use softlayer_core::{Error, Result};

/// Subnet attached to a VLAN, as mirrored into the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanSubnet {
    /// `address/prefix`
    pub subnet: String,
    /// SoftLayer subnet type, e.g. `PRIMARY`
    pub subnet_type: String,
    /// Number of addresses in the block
    pub subnet_size: u64,
}

impl VlanSubnet {
    /// Returns true for primary subnets (`*PRIMARY*` types).
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.subnet_type.contains("PRIMARY")
    }
}

/// Declarative VLAN record.
///
/// `datacenter`, `type` and `subnet_size` are inputs fixed at creation, `name` is the only
/// mutable field, and everything else is recomputed from SoftLayer on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanRecord {
    /// SoftLayer VLAN id, stringified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Datacenter short name
    #[serde(default)]
    pub datacenter: String,

    /// `PRIVATE` or `PUBLIC`
    #[serde(rename = "type", default)]
    pub vlan_type: String,

    /// Primary subnet size
    #[serde(default)]
    pub subnet_size: u64,

    /// VLAN label
    #[serde(default)]
    pub name: String,

    /// Primary router hostname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router_hostname: Option<String>,

    /// VLAN number on the router
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_number: Option<u32>,

    /// True when the VLAN has no billing item
    #[serde(default)]
    pub softlayer_managed: bool,

    /// Guest network components attached to the VLAN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_resource_count: Option<u32>,

    /// Attached subnets, in the order SoftLayer reports them
    #[serde(default)]
    pub subnets: Vec<VlanSubnet>,

    /// Removed; replaced by `subnet_size`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_subnet_size: Option<u64>,

    /// Removed; replaced by `router_hostname`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_router_hostname: Option<String>,
}

impl VlanRecord {
    /// Creates a record for a new VLAN.
    #[must_use]
    pub fn new(datacenter: impl Into<String>, vlan_type: VlanType, subnet_size: u64) -> Self {
        Self {
            datacenter: datacenter.into(),
            vlan_type: vlan_type.as_str().to_string(),
            subnet_size,
            ..Self::default()
        }
    }

    /// Creates a record that only carries an id, as used by import.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Pins the VLAN to a router.
    #[must_use]
    pub fn with_router_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.router_hostname = Some(hostname.into());
        self
    }

    /// Router hostname to pin the order to; an empty hostname means none.
    #[must_use]
    pub fn requested_router(&self) -> Option<&str> {
        self.router_hostname.as_deref().filter(|hostname| !hostname.is_empty())
    }

    /// Parses the stored id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the id is unset or not an integer.
    pub fn vlan_id(&self) -> Result<VlanId> {
        let id = self
            .id
            .as_deref()
            .ok_or_else(|| Error::ValidationError("vlan id is not set".to_string()))?;
        VlanId::parse_str(id)
    }

    /// Parses the `type` field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] for anything but `PRIVATE` or `PUBLIC`.
    pub fn parsed_type(&self) -> Result<VlanType> {
        self.vlan_type.parse()
    }

    /// Checks the creation inputs.
    ///
    /// Rejects removed attributes, unknown types and a router on the wrong network side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.primary_subnet_size.is_some() {
            return Err(Error::ValidationError(
                "primary_subnet_size: Renamed as 'subnet_size'".to_string(),
            ));
        }
        if self.primary_router_hostname.is_some() {
            return Err(Error::ValidationError(
                "primary_router_hostname: Renamed as 'router_hostname'".to_string(),
            ));
        }

        let vlan_type = self.parsed_type()?;
        if let Some(router) = self.requested_router() {
            if vlan_type.conflicts_with_router(router) {
                return Err(Error::ValidationError(format!(
                    "vlan type {vlan_type} cannot be attached to router {router}"
                )));
            }
        }
        Ok(())
    }
}
