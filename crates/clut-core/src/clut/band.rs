// crates/clut-core/src/clut/band.rs
//
// One temperature band of the compact table (little-endian record):
//   temp_lower:i32
//   temp_upper:i32
//   offsets[6]                 first slot of each LutMode's sequences
//   table[16][16][64]          (src >> 1, dst >> 1, slot)
//
// Table byte: phase in bits 6-7, run length in bits 0-4, bit 5 marks the last
// pair of a sequence.

use crate::error::{ClutError, Result};
use crate::waveform::mode::LutMode;
use crate::waveform::summary::Run;
use crate::wbf::cursor::Cursor;

pub const SEQ_SHIFT: usize = 6;
pub const SEQ_LEN: usize = 1 << SEQ_SHIFT;
/// Table axis width: only even gray levels get a row.
pub const LEVELS: usize = 16;
pub const TABLE_LEN: usize = LEVELS * LEVELS * SEQ_LEN;
pub const RECORD_LEN: usize = 8 + LutMode::COUNT + TABLE_LEN;

pub const PHASE_SHIFT: u8 = 6;
pub const END_BIT: u8 = 0x20;
pub const RUN_MASK: u8 = 0x1f;

#[inline]
pub fn pack_run(r: Run) -> u8 {
    ((r.phase & 3) << PHASE_SHIFT) | (r.len & RUN_MASK)
}

#[inline]
pub fn unpack_run(b: u8) -> Run {
    Run::new(b >> PHASE_SHIFT, b & RUN_MASK)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClutBand {
    pub temp_lower: i32,
    pub temp_upper: i32,
    pub offsets: [u8; LutMode::COUNT],
    table: Vec<u8>,
}

impl ClutBand {
    pub fn new(temp_lower: i32, temp_upper: i32, offsets: [u8; LutMode::COUNT]) -> Self {
        Self {
            temp_lower,
            temp_upper,
            offsets,
            table: vec![0; TABLE_LEN],
        }
    }

    pub fn offset(&self, mode: LutMode) -> usize {
        self.offsets[mode.index()] as usize
    }

    /// Slots left for `mode` before the end of a row.
    pub fn capacity(&self, mode: LutMode) -> usize {
        SEQ_LEN.saturating_sub(self.offset(mode))
    }

    /// The 64-slot row addressing gray levels `src`/`dst` (0..32; the low bit
    /// is dropped).
    pub fn row(&self, src: u8, dst: u8) -> Result<&[u8]> {
        let start = row_start(src, dst)?;
        Ok(&self.table[start..start + SEQ_LEN])
    }

    /// Pack `runs` into the row of (src, dst) starting at `mode`'s offset.
    pub fn write_sequence(&mut self, mode: LutMode, src: u8, dst: u8, runs: &[Run]) -> Result<()> {
        let capacity = self.capacity(mode);
        if runs.len() > capacity {
            return Err(ClutError::Range(format!(
                "{} pairs do not fit {mode} (capacity {capacity})",
                runs.len()
            )));
        }
        let start = row_start(src, dst)? + self.offset(mode);
        for (slot, &r) in self.table[start..start + runs.len()].iter_mut().zip(runs) {
            *slot = pack_run(r);
        }
        if !runs.is_empty() {
            self.table[start + runs.len() - 1] |= END_BIT;
        }
        Ok(())
    }

    /// Read back the pairs of one cell, stopping after the end-marked byte or
    /// at an empty slot.
    pub fn sequence(&self, mode: LutMode, src: u8, dst: u8) -> Result<Vec<Run>> {
        let row = self.row(src, dst)?;
        let mut out = Vec::new();
        for &b in row.iter().skip(self.offset(mode)) {
            if b == 0 {
                break;
            }
            out.push(unpack_run(b));
            if b & END_BIT != 0 {
                break;
            }
        }
        Ok(out)
    }

    /// Lay a waiting sequence of `delay_frames` phase-0 frames into the idle
    /// slots of every cell, in runs of at most 31.
    pub fn fill_idle(&mut self, delay_frames: u32) {
        let mut remaining = delay_frames;
        for i in self.offset(LutMode::Idle)..SEQ_LEN {
            let mut this = remaining.min(RUN_MASK as u32) as u8;
            remaining -= this as u32;
            if remaining == 0 || i == SEQ_LEN - 1 {
                this |= END_BIT;
            }
            for cell in 0..LEVELS * LEVELS {
                self.table[cell * SEQ_LEN + i] = this;
            }
        }
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.temp_lower.to_le_bytes());
        out.extend_from_slice(&self.temp_upper.to_le_bytes());
        out.extend_from_slice(&self.offsets);
        out.extend_from_slice(&self.table);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RECORD_LEN);
        self.encode_into(&mut out);
        out
    }

    pub fn decode(record: &[u8]) -> Result<Self> {
        if record.len() != RECORD_LEN {
            return Err(ClutError::Format(format!(
                "band record is {} bytes, expected {RECORD_LEN}",
                record.len()
            )));
        }
        let mut c = Cursor::new(record);
        let temp_lower = c.take_u32()? as i32;
        let temp_upper = c.take_u32()? as i32;
        let mut offsets = [0u8; LutMode::COUNT];
        offsets.copy_from_slice(c.take_exact(LutMode::COUNT)?);
        let table = c.take_exact(TABLE_LEN)?.to_vec();
        Ok(Self {
            temp_lower,
            temp_upper,
            offsets,
            table,
        })
    }
}

fn row_start(src: u8, dst: u8) -> Result<usize> {
    if src >= 32 || dst >= 32 {
        return Err(ClutError::Range(format!("gray level out of range: src={src} dst={dst}")));
    }
    Ok((((src as usize) >> 1) << (4 + SEQ_SHIFT)) | (((dst as usize) >> 1) << SEQ_SHIFT))
}
