#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! Bridge to an external, UI-owning drop-in payment collection flow.
//!
//! The host application hands [`DropInBridge::start`] a set of
//! [`DropInOptions`]; the bridge validates them into [`LaunchParameters`],
//! launches the external flow through the host's [`HostSurface`], suspends
//! until the host posts the flow's outcome back through
//! [`DropInBridge::on_flow_completed`], applies the 3-D Secure
//! liability-shift rules, attaches a best-effort device fingerprint, and
//! settles the caller with exactly one result.
//!
//! Everything platform-specific sits behind foreign traits
//! ([`HostSurfaceProvider`], [`HostSurface`], [`DeviceDataCollector`]): the
//! drop-in UI, its result channel, and the device-data collector are owned by
//! the host application and reached through the generated bindings.

mod bridge;
pub use bridge::*;

mod classifier;

mod error;
pub use error::*;

mod host;
pub use host::*;

pub mod logger;

mod options;
pub use options::*;

mod outcome;
pub use outcome::*;

mod request;
pub use request::*;

uniffi::setup_scaffolding!("dropkit_core");
