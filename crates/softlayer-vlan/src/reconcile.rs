//! Mirrors remote VLAN state into a [`VlanRecord`].

use crate::record::{VlanRecord, VlanSubnet};
use softlayer_api::NetworkVlan;
use softlayer_core::query::ObjectMask;
use softlayer_core::types::VlanType;

/// Properties fetched when reading a VLAN.
pub const VLAN_MASK: &str = "id,name,primaryRouter[datacenter[name]],primaryRouter[hostname],vlanNumber,billingItem[recurringFee],guestNetworkComponentCount,subnets[networkIdentifier,cidr,subnetType]";

/// Object mask for [`VLAN_MASK`].
#[must_use]
pub fn vlan_mask() -> ObjectMask {
    ObjectMask::new(VLAN_MASK)
}

/// Number of addresses in a block with the given prefix length.
///
/// IPv4 prefixes give `2^(32 - prefix)`. Longer prefixes are read as IPv6 and saturate at
/// `u64::MAX`.
#[must_use]
pub fn subnet_size_for_prefix(prefix: u8) -> u64 {
    let host_bits = if prefix <= 32 {
        32 - u32::from(prefix)
    } else {
        128_u32.saturating_sub(u32::from(prefix))
    };
    1_u64.checked_shl(host_bits).unwrap_or(u64::MAX)
}

/// Overwrites every computed field of `record` with the state in `vlan`.
///
/// Inputs SoftLayer reports (`type`, `datacenter`, `router_hostname`, `subnet_size`) are
/// replaced as well. `datacenter` is only touched when the router reports one.
pub fn apply_vlan(record: &mut VlanRecord, vlan: &NetworkVlan) {
    record.id = Some(vlan.id.to_string());
    record.vlan_number = vlan.vlan_number;
    record.child_resource_count = vlan.guest_network_component_count;
    record.name = vlan.name.clone().unwrap_or_default();

    if let Some(router) = &vlan.primary_router {
        if let Some(hostname) = &router.hostname {
            record.router_hostname = Some(hostname.clone());
            record.vlan_type = VlanType::from_router_hostname(hostname).as_str().to_string();
        }
        if let Some(name) = router.datacenter.as_ref().and_then(|dc| dc.name.as_ref()) {
            record.datacenter = name.clone();
        }
    }

    record.softlayer_managed = vlan.billing_item.is_none();

    record.subnets = vlan
        .subnets
        .iter()
        .flatten()
        .map(|subnet| VlanSubnet {
            subnet: format!("{}/{}", subnet.network_identifier, subnet.cidr),
            subnet_type: subnet.subnet_type.clone(),
            subnet_size: subnet_size_for_prefix(subnet.cidr),
        })
        .collect();

    record.subnet_size = record
        .subnets
        .iter()
        .find(|subnet| subnet.is_primary())
        .or_else(|| record.subnets.first())
        .map_or(0, |subnet| subnet.subnet_size);
}
