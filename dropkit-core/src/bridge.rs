//! The request correlator.
//!
//! Owns the single in-flight slot: `start` launches the external flow and
//! parks its caller on a oneshot channel; `on_flow_completed` consumes the
//! completion the host observed, classifies it, collects device data for
//! resolvable approvals, and settles the caller. The slot is cleared by
//! `Option::take` before settlement, so the caller is settled exactly once
//! per `start` call and stale or duplicate completions find nothing to act
//! on.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;
use uuid::Uuid;

use crate::classifier::{classify, Verdict};
use crate::error::DropInError;
use crate::host::{DeviceDataCollector, HostSurfaceProvider};
use crate::options::DropInOptions;
use crate::outcome::{FlowCompletion, PaymentMethodToken, PaymentResult};
use crate::request::{LaunchParameters, PAYMENT_FLOW_REQUEST_CODE};

/// How `start` treats a request arriving while another is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ReentryPolicy {
    /// The new request fails fast with
    /// [`DropInError::RequestAlreadyInFlight`]; the pending one is untouched.
    RejectConcurrent,
    /// Last request wins: the new request takes the slot and the displaced
    /// caller is settled with [`DropInError::RequestSuperseded`].
    SupersedePending,
}

/// Tuning for a [`DropInBridge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct BridgeConfig {
    /// Policy for overlapping `start` calls.
    pub reentry_policy: ReentryPolicy,
    /// Upper bound on the wait for the flow's completion, in milliseconds.
    /// `None`, the default, waits indefinitely.
    #[uniffi(default = None)]
    pub result_timeout_ms: Option<u64>,
    /// Upper bound on device-data collection, in milliseconds. Expiry
    /// degrades the settled payment to no device data, never a failure.
    #[uniffi(default = None)]
    pub collection_timeout_ms: Option<u64>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            reentry_policy: ReentryPolicy::RejectConcurrent,
            result_timeout_ms: None,
            collection_timeout_ms: None,
        }
    }
}

/// The one caller currently waiting on a flow.
struct PendingRequest {
    /// Correlates timeout expiry and log lines with the `start` call that
    /// filled the slot.
    attempt: Uuid,
    /// Credential the flow was launched with; the collector needs it again.
    credential: String,
    settlement: oneshot::Sender<Result<PaymentResult, DropInError>>,
}

/// Bridge between a single caller and the external drop-in payment flow.
///
/// At most one request is in flight at a time. The host posts the flow's
/// outcome through [`Self::on_flow_completed`]; the bridge classifies it and
/// settles the pending caller exactly once, no matter which of the mutually
/// exclusive paths fired.
#[derive(uniffi::Object)]
pub struct DropInBridge {
    provider: Arc<dyn HostSurfaceProvider>,
    collector: Arc<dyn DeviceDataCollector>,
    config: BridgeConfig,
    pending: Mutex<Option<PendingRequest>>,
}

#[uniffi::export(async_runtime = "tokio")]
impl DropInBridge {
    /// Creates a bridge with the default configuration: strict re-entry,
    /// unbounded waits.
    #[uniffi::constructor]
    pub fn new(
        provider: Arc<dyn HostSurfaceProvider>,
        collector: Arc<dyn DeviceDataCollector>,
    ) -> Arc<Self> {
        Self::with_config(provider, collector, BridgeConfig::default())
    }

    /// Creates a bridge with an explicit configuration.
    #[uniffi::constructor]
    pub fn with_config(
        provider: Arc<dyn HostSurfaceProvider>,
        collector: Arc<dyn DeviceDataCollector>,
        config: BridgeConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider,
            collector,
            config,
            pending: Mutex::new(None),
        })
    }

    /// Launches the drop-in flow described by `options` and waits for its
    /// terminal outcome.
    ///
    /// Exactly one of success or failure is delivered per call. Validation
    /// failures settle immediately without launching anything; otherwise the
    /// flow is launched on the current host surface and the call suspends
    /// until the host posts a completion (bounded by the configured result
    /// timeout, when one is set).
    ///
    /// # Errors
    ///
    /// Any [`DropInError`]: the validation taxonomy from the builder,
    /// [`DropInError::NoHostSurface`] with no foreground surface, the
    /// re-entry outcomes, the liability-shift rejections, the flow's own
    /// failure message, [`DropInError::UserCancellation`], or
    /// [`DropInError::Timeout`].
    pub async fn start(&self, options: DropInOptions) -> Result<PaymentResult, DropInError> {
        let parameters = LaunchParameters::from_options(&options)?;
        let surface = self
            .provider
            .current_surface()
            .ok_or(DropInError::NoHostSurface)?;

        let attempt = Uuid::new_v4();
        let (settlement, settled) = oneshot::channel();
        self.admit(PendingRequest {
            attempt,
            credential: parameters.credential.clone(),
            settlement,
        })?;

        log::info!("launching drop-in flow, attempt {attempt}");
        surface.launch_payment_flow(parameters);

        self.await_settlement(attempt, settled).await
    }

    /// Consumes the completion the host observed for `request_code`.
    ///
    /// Completions for unrelated request codes, and completions arriving
    /// while nothing is pending (duplicate or stale deliveries), are dropped.
    pub async fn on_flow_completed(&self, request_code: i32, completion: FlowCompletion) {
        if request_code != PAYMENT_FLOW_REQUEST_CODE {
            log::debug!("ignoring completion for unrelated request code {request_code:#x}");
            return;
        }
        let Some(pending) = self.slot().take() else {
            log::debug!("dropping completion: no request is pending");
            return;
        };

        let outcome = match classify(completion) {
            Verdict::Reject(error) => Err(error),
            Verdict::Resolve(token) => Ok(self.resolve(&pending, token).await),
        };
        settle(pending, outcome);
    }
}

impl DropInBridge {
    fn slot(&self) -> MutexGuard<'_, Option<PendingRequest>> {
        // A poisoned slot is still coherent: recover it.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Places `request` in the slot, applying the re-entry policy.
    fn admit(&self, request: PendingRequest) -> Result<(), DropInError> {
        let displaced = {
            let mut slot = self.slot();
            if slot.is_some() && self.config.reentry_policy == ReentryPolicy::RejectConcurrent {
                return Err(DropInError::RequestAlreadyInFlight);
            }
            slot.replace(request)
        };
        if let Some(previous) = displaced {
            log::warn!("superseding pending attempt {}", previous.attempt);
            settle(previous, Err(DropInError::RequestSuperseded));
        }
        Ok(())
    }

    async fn await_settlement(
        &self,
        attempt: Uuid,
        settled: oneshot::Receiver<Result<PaymentResult, DropInError>>,
    ) -> Result<PaymentResult, DropInError> {
        let received = match self.config.result_timeout_ms {
            None => settled.await,
            Some(ms) => match tokio::time::timeout(Duration::from_millis(ms), settled).await {
                Ok(received) => received,
                Err(_elapsed) => {
                    self.abandon(attempt);
                    return Err(DropInError::Timeout);
                }
            },
        };
        // The sender only disappears without settling when the bridge itself
        // is torn down mid-flight.
        received.unwrap_or_else(|_| {
            Err(DropInError::FlowFailed {
                message: "the flow ended without reporting a result".to_owned(),
            })
        })
    }

    /// Clears the slot after a result timeout, but only if it still belongs
    /// to `attempt`; a newer request's slot is never disturbed.
    fn abandon(&self, attempt: Uuid) {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|pending| pending.attempt == attempt) {
            slot.take();
            log::warn!("timed out waiting for the flow result, attempt {attempt}");
        }
    }

    async fn resolve(&self, pending: &PendingRequest, token: PaymentMethodToken) -> PaymentResult {
        PaymentResult {
            nonce: token.nonce,
            payment_type: token.type_label,
            description: token.description,
            is_default: token.is_default,
            device_data: self.collect_device_data(&pending.credential).await,
        }
    }

    /// Best-effort device-data collection. Every failure mode (no surface,
    /// unsupported surface, collector error, timeout) collapses to `None`.
    async fn collect_device_data(&self, credential: &str) -> Option<String> {
        let Some(surface) = self.provider.current_surface() else {
            log::warn!("skipping device data: no host surface");
            return None;
        };
        if !surface.supports_device_data_collection() {
            log::warn!("skipping device data: surface does not support collection");
            return None;
        }
        let collection = self
            .collector
            .collect_device_data(surface, credential.to_owned());
        let collected = match self.config.collection_timeout_ms {
            None => collection.await,
            Some(ms) => match tokio::time::timeout(Duration::from_millis(ms), collection).await {
                Ok(collected) => collected,
                Err(_elapsed) => {
                    log::warn!("device data collection timed out after {ms}ms");
                    return None;
                }
            },
        };
        match collected {
            Ok(device_data) => Some(device_data),
            Err(error) => {
                log::warn!("device data collection failed: {error}");
                None
            }
        }
    }
}

fn settle(pending: PendingRequest, outcome: Result<PaymentResult, DropInError>) {
    let attempt = pending.attempt;
    if pending.settlement.send(outcome).is_err() {
        log::debug!("caller for attempt {attempt} is no longer waiting");
    }
}
