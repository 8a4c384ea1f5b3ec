// crates/clut-core/src/wbf/cursor.rs

use crate::error::{ClutError, Result};

/// Forward-only little-endian reader over a borrowed byte buffer.
/// Every read is bounds-checked and fails with `Truncated`.
pub struct Cursor<'a> {
    b: &'a [u8],
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(b: &'a [u8]) -> Self {
        Self { b, i: 0 }
    }

    pub fn position(&self) -> usize {
        self.i
    }

    pub fn take_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        let s = slice_at(self.b, self.i, n)?;
        self.i += n;
        Ok(s)
    }

    pub fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take_exact(1)?[0])
    }

    pub fn take_u16(&mut self) -> Result<u16> {
        let s = self.take_exact(2)?;
        Ok(u16::from_le_bytes([s[0], s[1]]))
    }

    pub fn take_u32(&mut self) -> Result<u32> {
        let s = self.take_exact(4)?;
        Ok(u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
    }

    pub fn take3(&mut self) -> Result<[u8; 3]> {
        let s = self.take_exact(3)?;
        Ok([s[0], s[1], s[2]])
    }
}

/// `n` bytes starting at `offset`, or `Truncated` if that runs past the end.
pub fn slice_at(b: &[u8], offset: usize, n: usize) -> Result<&[u8]> {
    let end = offset
        .checked_add(n)
        .ok_or_else(|| ClutError::Truncated(format!("offset overflow at {offset}")))?;
    if end > b.len() {
        return Err(ClutError::Truncated(format!(
            "need {n} bytes at offset {offset}, buffer has {}",
            b.len()
        )));
    }
    Ok(&b[offset..end])
}
