// crates/clut-core/src/wbf/offsets.rs
//
// Two-level pointer tables:
//   mode table (at header.wmta):   mode_count entries -> temperature table
//   temperature table (per mode):  temp_range_count entries -> compressed cell stream
//
// Each entry is 4 bytes: offset[3] (little-endian) + checksum (sum of the
// three offset bytes, mod 256).

use tracing::trace;

use crate::error::{ClutError, Result};
use crate::wbf::cursor::slice_at;
use crate::wbf::header::{offset24, WaveformHeader};

pub const ENTRY_LEN: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OffsetEntry {
    pub bytes: [u8; 4],
}

impl OffsetEntry {
    /// Entry pointing at `offset` with a correct checksum byte.
    pub fn new(offset: usize) -> Result<Self> {
        if offset > 0xFF_FFFF {
            return Err(ClutError::Range(format!("offset {offset} does not fit 24 bits")));
        }
        let b0 = offset as u8;
        let b1 = (offset >> 8) as u8;
        let b2 = (offset >> 16) as u8;
        Ok(Self {
            bytes: [b0, b1, b2, checksum([b0, b1, b2])],
        })
    }

    pub fn read(bytes: &[u8], at: usize) -> Result<Self> {
        let s = slice_at(bytes, at, ENTRY_LEN)?;
        Ok(Self {
            bytes: [s[0], s[1], s[2], s[3]],
        })
    }

    pub fn offset(&self) -> usize {
        offset24([self.bytes[0], self.bytes[1], self.bytes[2]])
    }

    pub fn is_valid(&self) -> bool {
        checksum([self.bytes[0], self.bytes[1], self.bytes[2]]) == self.bytes[3]
    }
}

#[inline]
pub fn checksum(b: [u8; 3]) -> u8 {
    b[0].wrapping_add(b[1]).wrapping_add(b[2])
}

/// Resolved `(mode index, temperature index) -> stream offset` mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LutOffsets {
    /// Start of each mode's temperature table.
    pub temp_tables: Vec<usize>,
    cells: Vec<Vec<usize>>,
}

impl LutOffsets {
    pub fn resolve(bytes: &[u8], header: &WaveformHeader) -> Result<Self> {
        let base = header.mode_table_offset();
        let mut temp_tables = Vec::with_capacity(header.mode_count);
        let mut cells = Vec::with_capacity(header.mode_count);

        for mode in 0..header.mode_count {
            let entry = OffsetEntry::read(bytes, base + ENTRY_LEN * mode)?;
            if !entry.is_valid() {
                return Err(ClutError::Checksum {
                    mode,
                    temp: None,
                    entry: entry.bytes,
                });
            }
            let table = entry.offset();
            trace!(mode, table, "mode table entry");

            let mut row = Vec::with_capacity(header.temp_range_count);
            for temp in 0..header.temp_range_count {
                let entry = OffsetEntry::read(bytes, table + ENTRY_LEN * temp)?;
                if !entry.is_valid() {
                    return Err(ClutError::Checksum {
                        mode,
                        temp: Some(temp),
                        entry: entry.bytes,
                    });
                }
                trace!(mode, temp, offset = entry.offset(), "temperature table entry");
                row.push(entry.offset());
            }

            temp_tables.push(table);
            cells.push(row);
        }

        Ok(Self { temp_tables, cells })
    }

    pub fn mode_count(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, mode: usize, temp: usize) -> Result<usize> {
        let row = self.cells.get(mode).ok_or_else(|| {
            ClutError::Range(format!("mode index {mode} out of range (count {})", self.cells.len()))
        })?;
        row.get(temp).copied().ok_or_else(|| {
            ClutError::Range(format!("temperature index {temp} out of range (count {})", row.len()))
        })
    }
}
