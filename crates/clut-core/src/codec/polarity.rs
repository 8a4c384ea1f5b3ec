// crates/clut-core/src/codec/polarity.rs

use crate::error::{ClutError, Result};

/// Split each byte into four 2-bit phase codes, least-significant pair first.
pub fn unpack(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() * 4);
    for &b in bytes {
        out.push(b & 3);
        out.push((b >> 2) & 3);
        out.push((b >> 4) & 3);
        out.push((b >> 6) & 3);
    }
    out
}

/// Inverse of [`unpack`]. `phases.len()` must be a multiple of four and every
/// code must be in 0..=3.
pub fn pack(phases: &[u8]) -> Result<Vec<u8>> {
    if phases.len() % 4 != 0 {
        return Err(ClutError::Range(format!(
            "phase count {} is not a multiple of 4",
            phases.len()
        )));
    }
    let mut out = Vec::with_capacity(phases.len() / 4);
    for quad in phases.chunks_exact(4) {
        let mut b = 0u8;
        for (k, &p) in quad.iter().enumerate() {
            if p > 3 {
                return Err(ClutError::Range(format!("phase code {p} out of range")));
            }
            b |= p << (2 * k);
        }
        out.push(b);
    }
    Ok(out)
}
