//! Waits for a placed order to produce its VLAN.

use softlayer_api::{NetworkVlan, SoftLayerApi};
use softlayer_core::config::OrderWaitConfig;
use softlayer_core::ids::OrderId;
use softlayer_core::{Error, Result};
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Outcome of a single poll.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderState {
    /// No VLAN carries the order id yet.
    Pending,
    /// Exactly one VLAN carries the order id.
    Complete(NetworkVlan),
}

/// Polls the account's VLANs until an order's VLAN appears.
pub struct OrderWaiter<'a> {
    api: &'a dyn SoftLayerApi,
    config: OrderWaitConfig,
    cancel: CancellationToken,
}

impl<'a> OrderWaiter<'a> {
    /// Creates a waiter using `config` timings.
    #[must_use]
    pub fn new(api: &'a dyn SoftLayerApi, config: OrderWaitConfig) -> Self {
        Self {
            api,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Aborts the wait when `cancel` fires.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Queries the VLANs created by `order_id` once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousState`] when more than one VLAN matches, or the listing error.
    pub async fn poll(&self, order_id: OrderId) -> Result<OrderState> {
        let mut vlans = self.api.list_vlans_by_order(order_id).await?;
        match vlans.len() {
            0 => Ok(OrderState::Pending),
            1 => Ok(vlans.swap_remove(0).into()),
            n => Err(Error::AmbiguousState(format!(
                "expected one vlan for order {order_id}, found {n}"
            ))),
        }
    }

    /// Waits until `order_id` produces exactly one VLAN.
    ///
    /// The first poll happens after the initial delay and later polls are spaced by the
    /// minimum interval. The order itself is left untouched on timeout or cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] when the bound elapses, [`Error::Cancelled`] when the
    /// cancellation token fires, and any poll error as is.
    pub async fn wait(&self, order_id: OrderId) -> Result<NetworkVlan> {
        let bound = self.config.timeout();
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(Error::Cancelled(format!(
                "stopped waiting for order {order_id}"
            ))),
            outcome = timeout(bound, self.poll_until_complete(order_id)) => {
                outcome.map_err(|_| Error::Timeout(format!(
                    "order {order_id} did not complete within {}s",
                    bound.as_secs()
                )))?
            }
        }
    }

    async fn poll_until_complete(&self, order_id: OrderId) -> Result<NetworkVlan> {
        sleep(self.config.initial_delay()).await;
        loop {
            match self.poll(order_id).await? {
                OrderState::Complete(vlan) => return Ok(vlan),
                OrderState::Pending => {
                    debug!(order = %order_id, "Order pending");
                    sleep(self.config.min_interval()).await;
                }
            }
        }
    }
}

impl From<NetworkVlan> for OrderState {
    fn from(vlan: NetworkVlan) -> Self {
        Self::Complete(vlan)
    }
}
