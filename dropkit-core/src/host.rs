//! Seams to the host application.
//!
//! The bridge never talks to the external payments SDK directly. The host
//! implements these traits (in Swift or Kotlin, via the generated bindings,
//! or in Rust for tests and the simulator) and owns every platform-specific
//! concern: presenting the drop-in UI, observing its result, and running the
//! SDK's device-data collector.

use std::sync::Arc;

use crate::error::DeviceDataError;
use crate::request::LaunchParameters;

/// Resolver for the application's foreground surface.
#[uniffi::export(with_foreign)]
pub trait HostSurfaceProvider: Send + Sync {
    /// Returns the surface currently able to present UI, if any.
    fn current_surface(&self) -> Option<Arc<dyn HostSurface>>;
}

/// An application screen able to present the external payment flow.
#[uniffi::export(with_foreign)]
pub trait HostSurface: Send + Sync {
    /// Presents the external drop-in flow. Fire and forget: the result
    /// arrives later through
    /// [`DropInBridge::on_flow_completed`](crate::DropInBridge::on_flow_completed),
    /// keyed by `parameters.request_code`.
    fn launch_payment_flow(&self, parameters: LaunchParameters);

    /// Whether this surface satisfies the device-data collector's
    /// requirements. When `false` the collection step is skipped and the
    /// payment settles without device data.
    fn supports_device_data_collection(&self) -> bool;
}

/// Collector producing the device fingerprint attached to settled payments.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait DeviceDataCollector: Send + Sync {
    /// Asynchronously produces a device-data string for `credential` on
    /// `surface`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceDataError`]; the bridge treats every failure as
    /// "no device data", never as a payment failure.
    async fn collect_device_data(
        &self,
        surface: Arc<dyn HostSurface>,
        credential: String,
    ) -> Result<String, DeviceDataError>;
}
