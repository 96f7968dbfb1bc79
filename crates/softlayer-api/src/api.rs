//! The SoftLayer operations VLAN provisioning depends on.

use crate::models::{
    BillingItem, Hardware, Location, NetworkVlan, OrderReceipt, ProductItem, ProductPackage,
    VlanOrder,
};
use crate::Result;
use async_trait::async_trait;
use softlayer_core::ids::{BillingItemId, OrderId, PackageId, VlanId};
use softlayer_core::query::ObjectMask;

/// Account, network, catalog and billing calls against SoftLayer.
///
/// Implementations return [`softlayer_core::Error::NotFound`] for missing objects and
/// [`softlayer_core::Error::ResourcesAttached`] when a cancellation is refused because
/// servers are still on the VLAN.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait SoftLayerApi: Send + Sync {
    /// Look up a datacenter by short name.
    async fn get_datacenter_by_name(&self, name: &str) -> Result<Location>;

    /// Look up the first catalog package whose type key name is `package_type`.
    async fn get_package_by_type(&self, package_type: &str) -> Result<ProductPackage>;

    /// List a package's items with their prices, in catalog order.
    async fn get_package_items(&self, package_id: PackageId) -> Result<Vec<ProductItem>>;

    /// Place a VLAN order. Not idempotent.
    async fn place_vlan_order(&self, order: &VlanOrder) -> Result<OrderReceipt>;

    /// List the account's VLANs created by `order_id`.
    async fn list_vlans_by_order(&self, order_id: OrderId) -> Result<Vec<NetworkVlan>>;

    /// Fetch a VLAN projected through `mask`.
    async fn get_vlan(&self, vlan_id: VlanId, mask: &ObjectMask) -> Result<NetworkVlan>;

    /// Set a VLAN's name.
    async fn rename_vlan(&self, vlan_id: VlanId, name: &str) -> Result<()>;

    /// Fetch a VLAN's billing item; `None` when the VLAN has none.
    async fn get_vlan_billing_item(&self, vlan_id: VlanId) -> Result<Option<BillingItem>>;

    /// Cancel a billing item immediately.
    async fn cancel_billing_item(&self, billing_item_id: BillingItemId) -> Result<()>;

    /// Look up a router on the account by hostname.
    async fn get_router_by_hostname(&self, hostname: &str) -> Result<Hardware>;
}
