//! VLAN order construction from catalog lookups.

use softlayer_api::{PriceRef, ProductItem, SoftLayerApi, VlanOrder};
use softlayer_core::types::{subnet_item_key_fragment, PackageType, VlanType};
use softlayer_core::{Error, Result};
use tracing::{debug, warn};

/// Inputs that determine what a VLAN order contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest<'a> {
    /// Datacenter short name
    pub datacenter: &'a str,
    /// Network side
    pub vlan_type: VlanType,
    /// Primary subnet size
    pub subnet_size: u64,
    /// Router to pin the VLAN to; empty is treated as unset
    pub router_hostname: Option<&'a str>,
}

/// Builds priced VLAN orders against the product catalog.
pub struct OrderBuilder<'a> {
    api: &'a dyn SoftLayerApi,
}

impl<'a> OrderBuilder<'a> {
    /// Creates a builder over `api`.
    #[must_use]
    pub fn new(api: &'a dyn SoftLayerApi) -> Self {
        Self { api }
    }

    /// Builds an order, trying each VLAN package type in turn.
    ///
    /// # Errors
    ///
    /// Returns the last package type's error, with context, when every package fails.
    pub async fn build_with_fallback(&self, request: &OrderRequest<'_>) -> Result<VlanOrder> {
        let mut last_error = None;
        for package_type in PackageType::vlan_order_candidates() {
            match self.build(request, *package_type).await {
                Ok(order) => return Ok(order),
                Err(err) => {
                    warn!(package = %package_type, error = %err, "Could not build vlan order");
                    last_error = Some(err);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| Error::NotFound("no vlan package types".to_string()))
            .with_context("creating vlan"))
    }

    /// Builds an order against a single package type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] for an empty datacenter and [`Error::NotFound`] when
    /// the datacenter, package, items or router cannot be resolved.
    pub async fn build(
        &self,
        request: &OrderRequest<'_>,
        package_type: PackageType,
    ) -> Result<VlanOrder> {
        if request.datacenter.is_empty() {
            return Err(Error::ValidationError(
                "datacenter name is required".to_string(),
            ));
        }

        let datacenter = self.api.get_datacenter_by_name(request.datacenter).await?;
        let location_id = datacenter.id.ok_or_else(|| {
            Error::NotFound(format!("datacenter `{}` has no id", request.datacenter))
        })?;

        let package = self.api.get_package_by_type(package_type.key_name()).await?;
        let items = self.api.get_package_items(package.id).await?;
        debug!(package = %package.id, items = items.len(), "Loaded package items");

        let vlan_key = request.vlan_type.item_key_name();
        let vlan_price = first_price(&items, |key| key == vlan_key).ok_or_else(|| {
            Error::NotFound(format!(
                "no product items matching {vlan_key} in package {package_type}"
            ))
        })?;

        let subnet_key = subnet_item_key_fragment(request.subnet_size);
        let subnet_price = first_price(&items, |key| key.contains(&subnet_key)).ok_or_else(|| {
            Error::NotFound(format!(
                "no product items matching {subnet_key} in package {package_type}"
            ))
        })?;

        let mut order = VlanOrder::new(package.id, location_id, vec![vlan_price, subnet_price]);

        let router_hostname = request.router_hostname.filter(|hostname| !hostname.is_empty());
        if let Some(hostname) = router_hostname {
            let router = self.api.get_router_by_hostname(hostname).await?;
            let router_id = router
                .id
                .ok_or_else(|| Error::NotFound(format!("router `{hostname}` has no id")))?;
            order = order.with_router(router_id);
        }

        Ok(order)
    }
}

/// First price of the first item whose key name matches, in catalog order.
fn first_price(items: &[ProductItem], matches: impl Fn(&str) -> bool) -> Option<PriceRef> {
    items
        .iter()
        .find(|item| matches(&item.key_name))
        .and_then(|item| item.prices.first())
        .map(|price| PriceRef { id: price.id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use softlayer_api::api::MockSoftLayerApi;
    use softlayer_api::{Hardware, Location, ProductItemPrice, ProductPackage};
    use softlayer_core::ids::{HardwareId, ItemId, LocationId, PackageId, PriceId};

    fn item(id: u64, key_name: &str, price_ids: &[u64]) -> ProductItem {
        ProductItem {
            id: ItemId::new(id),
            key_name: key_name.to_string(),
            description: None,
            capacity: None,
            prices: price_ids
                .iter()
                .map(|price| ProductItemPrice {
                    id: PriceId::new(*price),
                    location_group_id: None,
                    recurring_fee: None,
                })
                .collect(),
        }
    }

    fn package(id: u64) -> ProductPackage {
        ProductPackage {
            id: PackageId::new(id),
            name: None,
            description: None,
            is_active: Some(1),
            package_type: None,
        }
    }

    fn catalog_mock() -> MockSoftLayerApi {
        let mut api = MockSoftLayerApi::new();
        api.expect_get_datacenter_by_name()
            .withf(|name| name == "dal09")
            .returning(|_| {
                Ok(Location {
                    id: Some(LocationId::new(138_124)),
                    name: Some("dal09".to_string()),
                    long_name: None,
                })
            });
        api.expect_get_package_by_type()
            .withf(|key| key == "ADDITIONAL_SERVICES_NETWORK_VLAN")
            .returning(|_| Ok(package(265)));
        api.expect_get_package_items()
            .with(eq(PackageId::new(265)))
            .returning(|_| {
                Ok(vec![
                    item(1, "PRIVATE_NETWORK_VLAN", &[2019]),
                    item(2, "PUBLIC_NETWORK_VLAN", &[2018, 9999]),
                    item(3, "8_STATIC_PUBLIC_IP_ADDRESSES", &[21]),
                    item(4, "8_STATIC_PUBLIC_IP_ADDRESSES_LEGACY", &[99]),
                ])
            });
        api
    }

    fn request(vlan_type: VlanType, router: Option<&str>) -> OrderRequest<'_> {
        OrderRequest {
            datacenter: "dal09",
            vlan_type,
            subnet_size: 8,
            router_hostname: router,
        }
    }

    #[tokio::test]
    async fn test_build_takes_first_matching_prices() {
        let api = catalog_mock();
        let order = OrderBuilder::new(&api)
            .build(
                &request(VlanType::Public, None),
                PackageType::AdditionalServicesNetworkVlan,
            )
            .await
            .unwrap();

        assert_eq!(order.package_id, PackageId::new(265));
        assert_eq!(order.location, "138124");
        assert_eq!(order.quantity, 1);
        assert_eq!(
            order.prices,
            vec![
                PriceRef { id: PriceId::new(2018) },
                PriceRef { id: PriceId::new(21) }
            ]
        );
        assert_eq!(order.router_id, None);
    }

    #[tokio::test]
    async fn test_build_attaches_router() {
        let mut api = catalog_mock();
        api.expect_get_router_by_hostname()
            .withf(|hostname| hostname == "bcr01a.dal09")
            .times(1)
            .returning(|_| {
                Ok(Hardware {
                    id: Some(HardwareId::new(77)),
                    hostname: Some("bcr01a.dal09".to_string()),
                    datacenter: None,
                })
            });

        let order = OrderBuilder::new(&api)
            .build(
                &request(VlanType::Private, Some("bcr01a.dal09")),
                PackageType::AdditionalServicesNetworkVlan,
            )
            .await
            .unwrap();
        assert_eq!(order.router_id, Some(HardwareId::new(77)));
        assert_eq!(order.prices[0].id, PriceId::new(2019));
    }

    #[tokio::test]
    async fn test_empty_router_is_not_looked_up() {
        let mut api = catalog_mock();
        api.expect_get_router_by_hostname().never();

        let order = OrderBuilder::new(&api)
            .build(
                &request(VlanType::Private, Some("")),
                PackageType::AdditionalServicesNetworkVlan,
            )
            .await
            .unwrap();
        assert_eq!(order.router_id, None);
    }

    #[tokio::test]
    async fn test_router_failure_aborts_build() {
        let mut api = catalog_mock();
        api.expect_get_router_by_hostname()
            .returning(|h| Err(Error::NotFound(format!("no routers found with hostname `{h}`"))));

        let err = OrderBuilder::new(&api)
            .build(
                &request(VlanType::Private, Some("bcr09z.dal09")),
                PackageType::AdditionalServicesNetworkVlan,
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_missing_subnet_item() {
        let api = catalog_mock();
        let mut req = request(VlanType::Public, None);
        req.subnet_size = 64;

        let err = OrderBuilder::new(&api)
            .build(&req, PackageType::AdditionalServicesNetworkVlan)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg.contains("64_STATIC_PUBLIC_IP_ADDRESSES")));
    }

    #[tokio::test]
    async fn test_empty_datacenter_is_validation_error() {
        let api = MockSoftLayerApi::new();
        let mut req = request(VlanType::Public, None);
        req.datacenter = "";

        let err = OrderBuilder::new(&api)
            .build(&req, PackageType::AdditionalServices)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_fallback_to_generic_package() {
        let mut api = MockSoftLayerApi::new();
        api.expect_get_datacenter_by_name().returning(|_| {
            Ok(Location {
                id: Some(LocationId::new(3)),
                ..Location::default()
            })
        });
        api.expect_get_package_by_type()
            .withf(|key| key == "ADDITIONAL_SERVICES_NETWORK_VLAN")
            .times(1)
            .returning(|key| Err(Error::NotFound(format!("no product packages found for `{key}`"))));
        api.expect_get_package_by_type()
            .withf(|key| key == "ADDITIONAL_SERVICES")
            .times(1)
            .returning(|_| Ok(package(0)));
        api.expect_get_package_items()
            .with(eq(PackageId::new(0)))
            .returning(|_| {
                Ok(vec![
                    item(1, "PUBLIC_NETWORK_VLAN", &[5]),
                    item(2, "16_STATIC_PUBLIC_IP_ADDRESSES", &[6]),
                ])
            });

        let mut req = request(VlanType::Public, None);
        req.subnet_size = 16;
        let order = OrderBuilder::new(&api).build_with_fallback(&req).await.unwrap();
        assert_eq!(order.package_id, PackageId::new(0));
    }

    #[tokio::test]
    async fn test_fallback_returns_last_error_with_context() {
        let mut api = MockSoftLayerApi::new();
        api.expect_get_datacenter_by_name()
            .times(2)
            .returning(|name| Err(Error::NotFound(format!("datacenter `{name}`"))));

        let err = OrderBuilder::new(&api)
            .build_with_fallback(&request(VlanType::Public, None))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("creating vlan"));
    }

    #[tokio::test]
    async fn test_item_without_prices_is_not_found() {
        let mut api = MockSoftLayerApi::new();
        api.expect_get_datacenter_by_name().returning(|_| {
            Ok(Location {
                id: Some(LocationId::new(3)),
                ..Location::default()
            })
        });
        api.expect_get_package_by_type().returning(|_| Ok(package(1)));
        api.expect_get_package_items().returning(|_| {
            Ok(vec![
                item(1, "PUBLIC_NETWORK_VLAN", &[]),
                item(2, "8_STATIC_PUBLIC_IP_ADDRESSES", &[6]),
            ])
        });

        let err = OrderBuilder::new(&api)
            .build(
                &request(VlanType::Public, None),
                PackageType::AdditionalServices,
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
