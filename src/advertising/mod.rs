//! Advertising controller.
//!
//! Owns the advertising parameters and drives a [`GapAdvertiser`] (the
//! BLE stack's advertising capability). Both the connection event handler
//! and the long-press trigger go through one controller instance, which the
//! firmware keeps behind a mutex.
//!
//! Start requests that the stack refuses are never propagated: repeated
//! starts are expected (the long-press task re-issues one every poll), so
//! the refusal comes back as [`StartOutcome::Ignored`] for the caller to
//! log.

mod fields;
mod link_gated;


pub use fields::{encode_adv_data, AdvData, AdvFields, ADV_DATA_MAX_LEN, MAX_NAME_LEN};
pub use link_gated::{AdvRequest, AdvRequestSink, LinkGatedAdvertiser};

use crate::error::{AdvStartError, Error};

/// Connectable mode of an advertisement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnMode {
    #[default]
    NonConnectable,
    Undirected,
}

/// Discoverable mode of an advertisement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiscMode {
    #[default]
    NonDiscoverable,
    Limited,
    General,
}

/// Parameters for the next advertisement. The default is the zero value
/// (non-connectable, non-discoverable).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvParams {
    pub conn_mode: ConnMode,
    pub disc_mode: DiscMode,
}

impl AdvParams {
    /// Connectable undirected, general discoverable.
    pub const CONNECTABLE_GENERAL: Self = Self {
        conn_mode: ConnMode::Undirected,
        disc_mode: DiscMode::General,
    };
}

/// What the radio is doing, as far as advertising is concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    #[default]
    Idle,
    Advertising,
    Connected,
}

impl LinkState {
    /// Whether a new broadcast may start from this state.
    pub fn admit_start(self) -> Result<(), AdvStartError> {
        match self {
            LinkState::Idle => Ok(()),
            LinkState::Advertising => Err(AdvStartError::AlreadyAdvertising),
            LinkState::Connected => Err(AdvStartError::Busy),
        }
    }
}

/// Advertising capability of the BLE stack.
pub trait GapAdvertiser {
    /// Name configured in the GAP service.
    fn device_name(&self) -> &str;

    /// Replace the fields used by the next advertisement.
    fn set_fields(&mut self, fields: &AdvFields) -> Result<(), Error>;

    /// Begin broadcasting with no timeout.
    fn adv_start(&mut self, params: &AdvParams) -> Result<(), AdvStartError>;
}

/// Result of a start request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartOutcome {
    Started,
    /// The stack refused; the refusal was deliberately swallowed.
    Ignored(AdvStartError),
}

/// Result of `refresh_fields` followed by `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Restart {
    pub fields: Result<(), Error>,
    pub start: StartOutcome,
}

pub struct AdvertisingController<A> {
    advertiser: A,
    params: AdvParams,
}

impl<A: GapAdvertiser> AdvertisingController<A> {
    pub const fn new(advertiser: A) -> Self {
        Self {
            advertiser,
            params: AdvParams {
                conn_mode: ConnMode::NonConnectable,
                disc_mode: DiscMode::NonDiscoverable,
            },
        }
    }

    /// Advertise the stack's device name as the complete local name.
    pub fn refresh_fields(&mut self) -> Result<(), Error> {
        let fields = AdvFields::complete_name(self.advertiser.device_name())?;
        self.advertiser.set_fields(&fields)
    }

    /// Reset the parameters to connectable/general and ask the stack to
    /// broadcast indefinitely.
    pub fn start(&mut self) -> StartOutcome {
        self.params = AdvParams::CONNECTABLE_GENERAL;
        match self.advertiser.adv_start(&self.params) {
            Ok(()) => StartOutcome::Started,
            Err(e) => StartOutcome::Ignored(e),
        }
    }

    /// `refresh_fields` then `start`. The start is attempted even when the
    /// refresh failed, with whatever fields the stack still holds.
    pub fn restart(&mut self) -> Restart {
        let fields = self.refresh_fields();
        let start = self.start();
        Restart { fields, start }
    }

    pub fn params(&self) -> AdvParams {
        self.params
    }

    pub fn advertiser(&self) -> &A {
        &self.advertiser
    }

    pub fn advertiser_mut(&mut self) -> &mut A {
        &mut self.advertiser
    }
}
