// crates/clut-core/src/clut/file.rs
//
// Compact table file (little-endian):
//   MAGIC[8] = "CLUT0002"
//   band_count:u32
//   band records, RECORD_LEN bytes each

use crate::clut::band::{ClutBand, RECORD_LEN};
use crate::error::{ClutError, Result};
use crate::wbf::cursor::Cursor;

pub const CLUT_MAGIC: &[u8; 8] = b"CLUT0002";
pub const PREAMBLE_LEN: usize = 12;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClutFile {
    pub bands: Vec<ClutBand>,
}

impl ClutFile {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PREAMBLE_LEN + RECORD_LEN * self.bands.len());
        out.extend_from_slice(CLUT_MAGIC);
        out.extend_from_slice(&(self.bands.len() as u32).to_le_bytes());
        for band in &self.bands {
            band.encode_into(&mut out);
        }
        out
    }

    /// Parse a table file, checking the size the way the display driver's
    /// loader does before trusting the stored count.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < PREAMBLE_LEN {
            return Err(ClutError::Format(format!("table file too small: {} bytes", bytes.len())));
        }
        if (bytes.len() - PREAMBLE_LEN) % RECORD_LEN != 0 {
            return Err(ClutError::Format(format!(
                "table body of {} bytes is not a whole number of {RECORD_LEN}-byte records",
                bytes.len() - PREAMBLE_LEN
            )));
        }

        let mut c = Cursor::new(bytes);
        let magic = c.take_exact(CLUT_MAGIC.len())?;
        if magic != CLUT_MAGIC {
            return Err(ClutError::Format(format!(
                "bad magic {:02x?}, expected {:02x?}",
                magic, CLUT_MAGIC
            )));
        }
        let count = c.take_u32()? as usize;
        let actual = (bytes.len() - PREAMBLE_LEN) / RECORD_LEN;
        if count != actual {
            return Err(ClutError::Format(format!(
                "band count {count} does not match {actual} records"
            )));
        }

        let mut bands = Vec::with_capacity(count);
        for _ in 0..count {
            bands.push(ClutBand::decode(c.take_exact(RECORD_LEN)?)?);
        }
        Ok(Self { bands })
    }

    /// First band whose upper bound is at or above `temperature`, else the
    /// last band.
    pub fn select_band(&self, temperature: i32) -> Option<&ClutBand> {
        let last = self.bands.len().checked_sub(1)?;
        let idx = self.bands[..last]
            .iter()
            .position(|b| temperature <= b.temp_upper)
            .unwrap_or(last);
        self.bands.get(idx)
    }
}
