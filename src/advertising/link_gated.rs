//! Stack-side advertiser that gates starts on the link state.
//!
//! `adv_start` cannot wait for the radio, so an accepted start only
//! encodes the payload and hands it to an [`AdvRequestSink`]; whoever
//! drains the sink owns the actual broadcast and reports the link back
//! through [`LinkGatedAdvertiser::set_link`].

use super::{encode_adv_data, AdvData, AdvFields, AdvParams, ConnMode, GapAdvertiser, LinkState};
use crate::error::{AdvStartError, Error};

/// One advertising run, as accepted by `adv_start`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvRequest {
    pub adv_data: AdvData,
    pub params: AdvParams,
}

/// Receiver of accepted advertising requests.
pub trait AdvRequestSink {
    fn submit(&mut self, request: AdvRequest);
}

pub struct LinkGatedAdvertiser<S> {
    name: &'static str,
    fields: AdvFields,
    link: LinkState,
    sink: S,
}

impl<S: AdvRequestSink> LinkGatedAdvertiser<S> {
    pub fn new(name: &'static str, sink: S) -> Self {
        Self {
            name,
            fields: AdvFields::default(),
            link: LinkState::Idle,
            sink,
        }
    }

    pub fn set_link(&mut self, link: LinkState) {
        self.link = link;
    }

    pub fn link(&self) -> LinkState {
        self.link
    }

    pub fn fields(&self) -> &AdvFields {
        &self.fields
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: AdvRequestSink> GapAdvertiser for LinkGatedAdvertiser<S> {
    fn device_name(&self) -> &str {
        self.name
    }

    fn set_fields(&mut self, fields: &AdvFields) -> Result<(), Error> {
        // Reject fields that could never be broadcast.
        encode_adv_data(fields, &AdvParams::CONNECTABLE_GENERAL)?;
        self.fields = fields.clone();
        Ok(())
    }

    fn adv_start(&mut self, params: &AdvParams) -> Result<(), AdvStartError> {
        self.link.admit_start()?;

        // Only connectable advertising is wired to the radio.
        if params.conn_mode != ConnMode::Undirected {
            return Err(AdvStartError::InvalidParams);
        }
        let adv_data =
            encode_adv_data(&self.fields, params).map_err(|_| AdvStartError::InvalidParams)?;

        self.link = LinkState::Advertising;
        self.sink.submit(AdvRequest {
            adv_data,
            params: *params,
        });
        Ok(())
    }
}
