//! VLAN lifecycle controller.
//!
//! [`VlanResource`] composes the order builder, the order waiter and the reconciler into
//! the create, read, update, delete, exists and import entry points.

use crate::order::{OrderBuilder, OrderRequest};
use crate::reconcile::{apply_vlan, vlan_mask};
use crate::record::VlanRecord;
use crate::waiter::OrderWaiter;
use softlayer_api::SoftLayerApi;
use softlayer_core::config::ProvisioningConfig;
use softlayer_core::ids::VlanId;
use softlayer_core::query::ObjectMask;
use softlayer_core::{Error, Result};
use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Manages SoftLayer VLANs on behalf of a declarative record.
#[derive(Clone)]
pub struct VlanResource {
    api: Arc<dyn SoftLayerApi>,
    config: ProvisioningConfig,
    cancel: CancellationToken,
}

impl VlanResource {
    /// Creates a controller with default provisioning timings.
    #[must_use]
    pub fn new(api: Arc<dyn SoftLayerApi>) -> Self {
        Self {
            api,
            config: ProvisioningConfig::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Overrides the provisioning timings.
    #[must_use]
    pub fn with_config(mut self, config: ProvisioningConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `cancel` to abort order waits and delete backoffs.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that aborts in-flight waits when cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Orders a VLAN for `record`, waits for it, names it and reads it back.
    ///
    /// # Errors
    ///
    /// Returns validation errors before any remote call, then any order, wait, rename or
    /// read error with operation context.
    pub async fn create(&self, record: &mut VlanRecord) -> Result<()> {
        record.validate()?;
        let request = OrderRequest {
            datacenter: &record.datacenter,
            vlan_type: record.parsed_type()?,
            subnet_size: record.subnet_size,
            router_hostname: record.requested_router(),
        };

        let order = OrderBuilder::new(self.api.as_ref())
            .build_with_fallback(&request)
            .await?;
        info!(
            datacenter = %record.datacenter,
            vlan_type = %record.vlan_type,
            package = %order.package_id,
            "Creating vlan"
        );

        let receipt = self
            .api
            .place_vlan_order(&order)
            .await
            .map_err(|err| surfaced(err.with_context("creating vlan")))?;
        let order_id = receipt.order_id.ok_or_else(|| Error::RemoteError {
            code: "placeOrder".to_string(),
            message: "creating vlan: order receipt carries no order id".to_string(),
        })?;
        info!(order = %order_id, "Vlan order placed");

        let vlan = OrderWaiter::new(self.api.as_ref(), self.config.order_wait)
            .with_cancellation(self.cancel.clone())
            .wait(order_id)
            .await
            .map_err(|err| {
                surfaced(err.with_context(format!("waiting for vlan order {order_id}")))
            })?;

        if !record.name.is_empty() {
            self.api
                .rename_vlan(vlan.id, &record.name)
                .await
                .map_err(|err| surfaced(err.with_context(format!("naming vlan {}", vlan.id))))?;
        }

        record.id = Some(vlan.id.to_string());
        info!(vlan = %vlan.id, "Vlan created");
        self.read(record).await
    }

    /// Refreshes every computed field of `record` from SoftLayer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] for a non-integer id, or the fetch error with
    /// context. A missing VLAN is not treated differently from any other failure here.
    pub async fn read(&self, record: &mut VlanRecord) -> Result<()> {
        let vlan_id = record.vlan_id()?;
        let vlan = self
            .api
            .get_vlan(vlan_id, &vlan_mask())
            .await
            .map_err(|err| surfaced(err.with_context(format!("retrieving vlan {vlan_id}"))))?;
        apply_vlan(record, &vlan);
        Ok(())
    }

    /// Applies a name change, then reads the VLAN back.
    ///
    /// `prior` is the record as last read. Only `name` is compared.
    ///
    /// # Errors
    ///
    /// Returns the rename or read error with context.
    pub async fn update(&self, record: &mut VlanRecord, prior: &VlanRecord) -> Result<()> {
        let vlan_id = record.vlan_id()?;
        if record.name != prior.name {
            info!(vlan = %vlan_id, name = %record.name, "Renaming vlan");
            self.api
                .rename_vlan(vlan_id, &record.name)
                .await
                .map_err(|err| surfaced(err.with_context(format!("updating vlan {vlan_id}"))))?;
        }
        self.read(record).await
    }

    /// Cancels the VLAN's billing item.
    ///
    /// A VLAN without a billing item is managed by SoftLayer and is only forgotten locally.
    /// Cancellation refused because servers are still attached is retried after a fixed
    /// backoff, up to the configured number of retries.
    ///
    /// # Errors
    ///
    /// Returns any other cancellation error, the last refusal once retries are exhausted,
    /// or [`Error::Cancelled`] if the cancellation token fires during a backoff.
    pub async fn delete(&self, record: &VlanRecord) -> Result<()> {
        let vlan_id = record.vlan_id()?;
        let billing_item = self
            .api
            .get_vlan_billing_item(vlan_id)
            .await
            .map_err(|err| err.with_context(format!("deleting vlan {vlan_id}")))?;

        let Some(billing_item_id) = billing_item.and_then(|item| item.id) else {
            info!(vlan = %vlan_id, "Vlan is managed by SoftLayer, removing it locally only");
            return Ok(());
        };

        let retry = self.config.cancel_retry;
        let mut retries = 0;
        loop {
            match self.api.cancel_billing_item(billing_item_id).await {
                Ok(()) => {
                    info!(vlan = %vlan_id, billing_item = %billing_item_id, "Vlan cancelled");
                    return Ok(());
                }
                Err(err) if err.is_resources_attached() && retries < retry.max_retries => {
                    retries += 1;
                    info!("VLAN {vlan_id} still has servers. Waiting to delete...");
                    debug!(retries, backoff = ?retry.backoff(), "Waiting before retrying cancellation");
                    tokio::select! {
                        biased;
                        () = self.cancel.cancelled() => {
                            return Err(Error::Cancelled(format!(
                                "stopped deleting vlan {vlan_id}"
                            )));
                        }
                        () = sleep(retry.backoff()) => {}
                    }
                }
                Err(err) => {
                    return Err(surfaced(err.with_context(format!("deleting vlan {vlan_id}"))));
                }
            }
        }
    }

    /// Reports whether the VLAN in `record` still exists.
    ///
    /// # Errors
    ///
    /// Returns any fetch error other than not-found.
    pub async fn exists(&self, record: &VlanRecord) -> Result<bool> {
        let vlan_id = record.vlan_id()?;
        match self.api.get_vlan(vlan_id, &ObjectMask::new("id")).await {
            Ok(vlan) => Ok(vlan.id == vlan_id),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err.with_context(format!("checking vlan {vlan_id}"))),
        }
    }

    /// Builds a record for an existing VLAN.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] for a non-integer id, or the read error.
    pub async fn import(&self, id: &str) -> Result<VlanRecord> {
        let vlan_id = VlanId::parse_str(id)?;
        let mut record = VlanRecord::with_id(vlan_id.to_string());
        self.read(&mut record).await?;
        Ok(record)
    }
}

/// Logs errors that need operator attention before handing them back.
fn surfaced(err: Error) -> Error {
    if err.should_log() {
        error!(code = err.error_code(), error = %err, "Vlan operation failed");
    }
    err
}
