// crates/clut-core/src/wbf/writer.rs
//
// Minimal container writer. Layout (little-endian):
//   header[0x30]                (mode_version 0x19, counters stored minus one)
//   temp_range_table[bands + 1]
//   mode table                  mode_count entries
//   temperature tables          bands entries per mode
//   cell streams                rle-encoded, identical cells stored once
//
// Header fields that do not drive the layout are written as zero.

use crate::codec::rle;
use crate::error::{ClutError, Result};
use crate::wbf::header::{HEADER_LEN, SUPPORTED_MODE_VERSION};
use crate::wbf::offsets::{OffsetEntry, ENTRY_LEN};

#[derive(Clone, Debug, Default)]
pub struct WbfWriter {
    temperatures: Vec<u8>,
    /// `[mode][temp]` decoded (pre-rle) cell bytes.
    modes: Vec<Vec<Vec<u8>>>,
}

impl WbfWriter {
    /// `temperatures` are the band delimiters, so at least two are needed.
    pub fn new(temperatures: Vec<u8>) -> Result<Self> {
        if temperatures.len() < 2 || temperatures.len() > 257 {
            return Err(ClutError::Range(format!(
                "need 2..=257 temperature breakpoints, got {}",
                temperatures.len()
            )));
        }
        Ok(Self {
            temperatures,
            modes: Vec::new(),
        })
    }

    pub fn bands(&self) -> usize {
        self.temperatures.len() - 1
    }

    /// Append the next mode (container index = number of modes pushed so far),
    /// one decoded cell per temperature band.
    pub fn push_mode(&mut self, cells: Vec<Vec<u8>>) -> Result<&mut Self> {
        if cells.len() != self.bands() {
            return Err(ClutError::Range(format!(
                "mode {} has {} cells, expected {}",
                self.modes.len(),
                cells.len(),
                self.bands()
            )));
        }
        if self.modes.len() == 256 {
            return Err(ClutError::Range("at most 256 modes".into()));
        }
        self.modes.push(cells);
        Ok(self)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.modes.is_empty() {
            return Err(ClutError::Range("container needs at least one mode".into()));
        }
        let bands = self.bands();

        let mode_table = HEADER_LEN + self.temperatures.len();
        let temp_tables = mode_table + ENTRY_LEN * self.modes.len();
        let streams_start = temp_tables + ENTRY_LEN * bands * self.modes.len();

        // Encode streams, sharing identical cells.
        let mut streams: Vec<(&[u8], usize)> = Vec::new();
        let mut body = Vec::new();
        let mut cell_offsets = Vec::with_capacity(self.modes.len());
        for cells in &self.modes {
            let mut row = Vec::with_capacity(bands);
            for cell in cells {
                let shared = streams
                    .iter()
                    .find(|(data, _)| *data == cell.as_slice())
                    .map(|&(_, off)| off);
                let off = match shared {
                    Some(off) => off,
                    None => {
                        let off = streams_start + body.len();
                        body.extend_from_slice(&rle::encode(cell)?);
                        streams.push((cell.as_slice(), off));
                        off
                    }
                };
                row.push(off);
            }
            cell_offsets.push(row);
        }

        let total = streams_start + body.len();
        let mut b = Vec::with_capacity(total);

        b.extend_from_slice(&0u32.to_le_bytes()); // checksum
        b.extend_from_slice(&(total as u32).to_le_bytes());
        b.extend_from_slice(&0u32.to_le_bytes()); // serial
        b.extend_from_slice(&[0, 0]); // run_type, fpl_platform
        b.extend_from_slice(&0u16.to_le_bytes()); // fpl_lot
        b.push(SUPPORTED_MODE_VERSION);
        b.extend_from_slice(&[0u8; 11]); // wf_version .. unknown[2]
        b.extend_from_slice(&[0u8; 4]); // xwia[3], cs1
        b.extend_from_slice(&OffsetEntry::new(mode_table)?.bytes[0..3]);
        b.extend_from_slice(&[0, 0]); // fvsn, luts
        b.push((self.modes.len() - 1) as u8);
        b.push((bands - 1) as u8);
        b.extend_from_slice(&[0u8; 9]); // advanced_wf_flags, eb, sb, reserved[5], cs2
        debug_assert_eq!(b.len(), HEADER_LEN);

        b.extend_from_slice(&self.temperatures);

        for m in 0..self.modes.len() {
            let table = temp_tables + ENTRY_LEN * bands * m;
            b.extend_from_slice(&OffsetEntry::new(table)?.bytes);
        }
        for row in &cell_offsets {
            for &off in row {
                b.extend_from_slice(&OffsetEntry::new(off)?.bytes);
            }
        }
        debug_assert_eq!(b.len(), streams_start);

        b.extend_from_slice(&body);
        Ok(b)
    }
}
