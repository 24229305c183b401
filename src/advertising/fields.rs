//! Legacy advertising payload encoding.
//!
//! The payload is a sequence of AD structures `[len][type][data...]`
//! where `len` counts the type byte plus the data, capped at 31 bytes in
//! total.

use super::{AdvParams, DiscMode};
use crate::error::Error;
use heapless::{String, Vec};

/// Maximum legacy advertising payload length.
pub const ADV_DATA_MAX_LEN: usize = 31;

/// Longest name that still fits next to the Flags structure
/// (31 - 3 bytes of flags - 2 bytes of name header).
pub const MAX_NAME_LEN: usize = 26;

const AD_TYPE_FLAGS: u8 = 0x01;
const AD_TYPE_SHORTENED_LOCAL_NAME: u8 = 0x08;
const AD_TYPE_COMPLETE_LOCAL_NAME: u8 = 0x09;

const FLAG_LE_LIMITED_DISC: u8 = 0x01;
const FLAG_LE_GENERAL_DISC: u8 = 0x02;
const FLAG_BR_EDR_NOT_SUPPORTED: u8 = 0x04;

/// Encoded advertising payload.
pub type AdvData = Vec<u8, ADV_DATA_MAX_LEN>;

/// Fields placed in the next advertisement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvFields {
    pub name: String<MAX_NAME_LEN>,
    pub name_is_complete: bool,
}

impl AdvFields {
    /// Fields advertising `name` as the complete local name.
    pub fn complete_name(name: &str) -> Result<Self, Error> {
        let mut n = String::new();
        n.push_str(name).map_err(|_| Error::BufferOverflow)?;
        Ok(Self {
            name: n,
            name_is_complete: true,
        })
    }
}

fn flags_for(disc_mode: DiscMode) -> u8 {
    match disc_mode {
        DiscMode::NonDiscoverable => FLAG_BR_EDR_NOT_SUPPORTED,
        DiscMode::Limited => FLAG_LE_LIMITED_DISC | FLAG_BR_EDR_NOT_SUPPORTED,
        DiscMode::General => FLAG_LE_GENERAL_DISC | FLAG_BR_EDR_NOT_SUPPORTED,
    }
}

/// Build the advertising payload: Flags first, then the local name if set.
pub fn encode_adv_data(fields: &AdvFields, params: &AdvParams) -> Result<AdvData, Error> {
    let mut data = AdvData::new();
    push_ad(&mut data, AD_TYPE_FLAGS, &[flags_for(params.disc_mode)])?;

    if !fields.name.is_empty() {
        let ad_type = if fields.name_is_complete {
            AD_TYPE_COMPLETE_LOCAL_NAME
        } else {
            AD_TYPE_SHORTENED_LOCAL_NAME
        };
        push_ad(&mut data, ad_type, fields.name.as_bytes())?;
    }

    Ok(data)
}

/// Append one AD structure, or nothing at all if it does not fit.
fn push_ad(data: &mut AdvData, ad_type: u8, payload: &[u8]) -> Result<(), Error> {
    let start = data.len();
    let pushed = append_ad(data, ad_type, payload);
    if pushed.is_err() {
        data.truncate(start);
    }
    pushed
}

fn append_ad(data: &mut AdvData, ad_type: u8, payload: &[u8]) -> Result<(), Error> {
    let len = u8::try_from(payload.len() + 1).map_err(|_| Error::BufferOverflow)?;
    data.push(len).map_err(|_| Error::BufferOverflow)?;
    data.push(ad_type).map_err(|_| Error::BufferOverflow)?;
    data.extend_from_slice(payload).map_err(|_| Error::BufferOverflow)
}
