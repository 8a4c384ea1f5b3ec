// crates/clut-core/src/wbf/mod.rs

pub mod cursor;
pub mod header;
pub mod offsets;
pub mod writer;

use tracing::debug;

use crate::codec::rle;
use crate::error::{ClutError, Result};
use crate::waveform::matrix::TransitionMatrix;
use crate::wbf::header::{parse_header, WaveformHeader};
use crate::wbf::offsets::LutOffsets;

/// A parsed waveform container: header and resolved offsets over a borrowed,
/// read-only buffer.
pub struct WbfFile<'a> {
    bytes: &'a [u8],
    pub header: WaveformHeader,
    pub offsets: LutOffsets,
}

impl<'a> WbfFile<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let header = parse_header(bytes)?;
        let offsets = LutOffsets::resolve(bytes, &header)?;
        debug!(
            modes = header.mode_count,
            bands = header.temp_range_count,
            mode_table = header.mode_table_offset(),
            "waveform container resolved"
        );
        Ok(Self {
            bytes,
            header,
            offsets,
        })
    }

    /// Decode the compressed stream of one (mode index, temperature index) cell.
    pub fn decode_cell(&self, mode: usize, temp: usize) -> Result<rle::Decoded> {
        let start = self.offsets.get(mode, temp)?;
        let stream = cursor::slice_at(self.bytes, start, self.bytes.len().saturating_sub(start))
            .map_err(at_cell(mode, temp))?;
        let decoded = rle::decode(stream).map_err(at_cell(mode, temp))?;
        debug!(
            mode,
            temp,
            start,
            consumed = decoded.consumed,
            decoded = decoded.data.len(),
            "cell decoded"
        );
        Ok(decoded)
    }

    pub fn cell(&self, mode: usize, temp: usize) -> Result<TransitionMatrix> {
        let decoded = self.decode_cell(mode, temp)?;
        TransitionMatrix::from_decoded(&decoded.data).map_err(at_cell(mode, temp))
    }
}

/// Prefix a truncation error with the cell it came from.
fn at_cell(mode: usize, temp: usize) -> impl FnOnce(ClutError) -> ClutError {
    move |e| match e {
        ClutError::Truncated(msg) => ClutError::Truncated(format!("mode={mode} temp={temp}: {msg}")),
        other => other,
    }
}
