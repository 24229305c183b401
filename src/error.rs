//! Unified error types for ble-light.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (with the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // BLE
    /// The SoftDevice rejected the GATT service table.
    ServiceRegistration,

    /// Writing an attribute value into the SoftDevice table failed.
    AttributeValue,

    // Storage
    /// Settings partition could not be read, formatted or erased.
    Storage,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

/// Why a request to start advertising was refused.
///
/// Every variant is swallowed by
/// [`AdvertisingController::start`](crate::advertising::AdvertisingController::start)
/// and surfaced as [`StartOutcome::Ignored`](crate::advertising::StartOutcome::Ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdvStartError {
    /// A broadcast is already running.
    AlreadyAdvertising,
    /// A peer is connected; the single peripheral link is taken.
    Busy,
    /// The parameters or fields cannot be turned into an advertisement.
    InvalidParams,
}

impl AdvStartError {
    /// `true` for the refusals that repeated start requests are expected
    /// to produce (the long-press task re-issues a start on every poll).
    pub fn is_over_call(&self) -> bool {
        matches!(self, AdvStartError::AlreadyAdvertising | AdvStartError::Busy)
    }
}
