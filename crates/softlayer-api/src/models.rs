//! SoftLayer data models for VLANs, subnets, the product catalog and billing.
//!
//! Field names follow the API's camelCase. Relational properties are optional because
//! they are only present when requested through an object mask.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use softlayer_core::ids::{
    BillingItemId, HardwareId, ItemId, LocationId, OrderId, PackageId, PriceId, SubnetId,
    VlanId,
};

/// Complex type name of a VLAN order container.
pub const VLAN_ORDER_COMPLEX_TYPE: &str = "SoftLayer_Container_Product_Order_Network_Vlan";

/// Datacenter location (`SoftLayer_Location_Datacenter`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Location id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LocationId>,
    /// Short name, e.g. `dal09`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Descriptive name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
}

/// Hardware record; VLAN routers are hardware (`SoftLayer_Hardware`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hardware {
    /// Hardware id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<HardwareId>,
    /// Hostname, e.g. `bcr01a.dal09`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Datacenter the hardware lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<Location>,
}

/// Package type reference nested in a package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PackageTypeRef {
    /// Package type key name.
    pub key_name: String,
}

/// Product catalog package (`SoftLayer_Product_Package`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPackage {
    /// Package id.
    pub id: PackageId,
    /// Package name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Package description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Active flag (1 or 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<u8>,
    /// Package type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageTypeRef>,
}

/// A price attached to a catalog item (`SoftLayer_Product_Item_Price`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductItemPrice {
    /// Price id referenced by orders.
    pub id: PriceId,
    /// Location group the price is restricted to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_group_id: Option<u64>,
    /// Monthly fee.
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurring_fee: Option<f64>,
}

/// Orderable catalog item (`SoftLayer_Product_Item`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    /// Item id.
    pub id: ItemId,
    /// Key name, e.g. `PUBLIC_NETWORK_VLAN`.
    pub key_name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Capacity (addresses for subnet items).
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity: Option<f64>,
    /// Prices in catalog order.
    #[serde(default)]
    pub prices: Vec<ProductItemPrice>,
}

/// Price reference inside an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRef {
    /// Price id.
    pub id: PriceId,
}

/// VLAN order container (`SoftLayer_Container_Product_Order_Network_Vlan`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VlanOrder {
    /// Complex type marker required by `placeOrder`.
    pub complex_type: String,
    /// Package the prices belong to.
    pub package_id: PackageId,
    /// Location id, sent as a string.
    pub location: String,
    /// Number of VLANs.
    pub quantity: u32,
    /// VLAN price followed by subnet price.
    pub prices: Vec<PriceRef>,
    /// Router to attach the VLAN to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router_id: Option<HardwareId>,
}

impl VlanOrder {
    /// Build a single-VLAN order.
    #[must_use]
    pub fn new(package_id: PackageId, location: LocationId, prices: Vec<PriceRef>) -> Self {
        Self {
            complex_type: VLAN_ORDER_COMPLEX_TYPE.to_string(),
            package_id,
            location: location.to_string(),
            quantity: 1,
            prices,
            router_id: None,
        }
    }

    /// Attach the order to a router.
    #[must_use]
    pub fn with_router(mut self, router_id: HardwareId) -> Self {
        self.router_id = Some(router_id);
        self
    }
}

/// Receipt returned by `placeOrder` (`SoftLayer_Container_Product_Order_Receipt`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// Id of the placed order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    /// Time the order was placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<DateTime<FixedOffset>>,
}

/// Billing item (`SoftLayer_Billing_Item`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillingItem {
    /// Billing item id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BillingItemId>,
    /// Monthly fee.
    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurring_fee: Option<f64>,
    /// Scheduled cancellation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_date: Option<DateTime<FixedOffset>>,
}

/// Subnet attached to a VLAN (`SoftLayer_Network_Subnet`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    /// Subnet id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SubnetId>,
    /// Network address.
    pub network_identifier: String,
    /// Prefix length.
    pub cidr: u8,
    /// Subnet type, e.g. `PRIMARY` or `ADDITIONAL_PRIMARY`.
    pub subnet_type: String,
}

/// Network VLAN (`SoftLayer_Network_Vlan`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkVlan {
    /// VLAN id.
    pub id: VlanId,
    /// Label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// VLAN number on the router.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_number: Option<u32>,
    /// Primary router.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_router: Option<Hardware>,
    /// Billing item; absent on provider-managed VLANs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_item: Option<BillingItem>,
    /// Number of guest network components attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_network_component_count: Option<u32>,
    /// Attached subnets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<Subnet>>,
}

/// Error body returned by the REST endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub(crate) struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Float properties arrive as strings (`"0.00"`) or numbers depending on the endpoint.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
