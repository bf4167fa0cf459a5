#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! Foreign-language entry point for the dropkit SDK.
//!
//! Re-exports the full [`dropkit_core`] API together with its UniFFI
//! scaffolding, so a single library carries every exported symbol for the
//! generated Swift and Kotlin bindings.

pub use dropkit_core::*;

dropkit_core::uniffi_reexport_scaffolding!();
