//! Settings partition in internal flash.
//!
//! The firmware keeps no settings yet; the partition is brought into a
//! known state at boot so a later firmware can rely on it. Managed by
//! `sequential-storage` (map API) over the SoftDevice flash driver.
//!
//! Boot check:
//!   - marker present      → accept the partition
//!   - marker missing      → write it
//!   - unreadable / foreign → erase the partition, then write it

use ble_light::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use ble_light::Error;
use core::ops::Range;
use defmt::{error, info, warn};
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

const KEY_FORMAT_MARKER: u8 = 0x00;

/// Layout version of the partition.
const FORMAT_MARKER: &[u8] = b"ble-light/1";

const SCRATCH_SIZE: usize = 64;

fn flash_range() -> Range<u32> {
    STORAGE_START..STORAGE_END
}

/// Bring the settings partition into a usable state.
pub async fn init(flash: &mut impl NorFlash) -> Result<(), Error> {
    let mut buf = [0u8; SCRATCH_SIZE];

    let fetched = fetch_item::<u8, &[u8], _>(
        flash,
        flash_range(),
        &mut NoCache::new(),
        &mut buf,
        &KEY_FORMAT_MARKER,
    )
    .await;

    match fetched {
        Ok(Some(marker)) if marker == FORMAT_MARKER => {
            info!("Settings partition ready");
            return Ok(());
        }
        Ok(Some(_)) => {
            warn!("Settings partition has an unknown layout - erasing");
            erase(flash).await?;
        }
        Ok(None) => info!("Settings partition empty - formatting"),
        Err(e) => {
            warn!("Settings partition unreadable ({:?}) - erasing", defmt::Debug2Format(&e));
            erase(flash).await?;
        }
    }

    write_marker(flash).await
}

async fn erase(flash: &mut impl NorFlash) -> Result<(), Error> {
    sequential_storage::erase_all(flash, flash_range())
        .await
        .map_err(|e| {
            error!("Flash erase error: {:?}", defmt::Debug2Format(&e));
            Error::Storage
        })
}

async fn write_marker(flash: &mut impl NorFlash) -> Result<(), Error> {
    let mut buf = [0u8; SCRATCH_SIZE];

    store_item::<u8, &[u8], _>(
        flash,
        flash_range(),
        &mut NoCache::new(),
        &mut buf,
        &KEY_FORMAT_MARKER,
        &FORMAT_MARKER,
    )
    .await
    .map_err(|e| {
        error!("Flash write error: {:?}", defmt::Debug2Format(&e));
        Error::Storage
    })?;

    info!("Settings partition formatted");
    Ok(())
}
