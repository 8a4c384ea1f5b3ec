// crates/clut-core/src/waveform/matrix.rs

use crate::codec::polarity;
use crate::error::{ClutError, Result};

pub const GRAY_LEVELS: usize = 32;
pub const TRANSITIONS: usize = GRAY_LEVELS * GRAY_LEVELS;

/// Per-frame phase codes of every (src, dst) transition of one cell.
///
/// Stored transition-major: row `src * 32 + dst` holds `frames` codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionMatrix {
    frames: usize,
    cells: Vec<u8>,
}

impl TransitionMatrix {
    /// Build from the container's frame-major phase order: frame `f` holds
    /// 1024 codes, with the source level varying fastest
    /// (`phases[f * 1024 + dst * 32 + src]`).
    pub fn from_frame_major(phases: &[u8]) -> Result<Self> {
        if phases.len() % TRANSITIONS != 0 {
            return Err(ClutError::Truncated(format!(
                "{} phase codes do not fill whole frames of {TRANSITIONS}",
                phases.len()
            )));
        }
        let frames = phases.len() / TRANSITIONS;
        let mut cells = vec![0u8; phases.len()];
        for (f, frame) in phases.chunks_exact(TRANSITIONS).enumerate() {
            for dst in 0..GRAY_LEVELS {
                for src in 0..GRAY_LEVELS {
                    cells[(src * GRAY_LEVELS + dst) * frames + f] = frame[dst * GRAY_LEVELS + src];
                }
            }
        }
        Ok(Self { frames, cells })
    }

    /// Decoded cell bytes -> matrix (four codes per byte).
    pub fn from_decoded(bytes: &[u8]) -> Result<Self> {
        Self::from_frame_major(&polarity::unpack(bytes))
    }

    /// Inverse of [`TransitionMatrix::from_frame_major`].
    pub fn to_frame_major(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.cells.len()];
        for src in 0..GRAY_LEVELS {
            for dst in 0..GRAY_LEVELS {
                for (f, &p) in self.row(src as u8, dst as u8).iter().enumerate() {
                    out[f * TRANSITIONS + dst * GRAY_LEVELS + src] = p;
                }
            }
        }
        out
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn row(&self, src: u8, dst: u8) -> &[u8] {
        let t = src as usize * GRAY_LEVELS + dst as usize;
        &self.cells[t * self.frames..(t + 1) * self.frames]
    }

    /// Rows in (src, dst) order, source varying slowest.
    pub fn rows(&self) -> impl Iterator<Item = (u8, u8, &[u8])> + '_ {
        (0..TRANSITIONS).map(move |t| {
            let (src, dst) = ((t / GRAY_LEVELS) as u8, (t % GRAY_LEVELS) as u8);
            (src, dst, self.row(src, dst))
        })
    }
}
