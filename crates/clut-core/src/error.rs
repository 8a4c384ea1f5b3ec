use thiserror::Error;

use crate::waveform::mode::LutMode;

pub type Result<T> = std::result::Result<T, ClutError>;

#[derive(Debug, Error)]
pub enum ClutError {
    #[error("format error: {0}")]
    Format(String),

    /// Offset pointer whose checksum byte does not match. `temp` is `None` for a
    /// mode-table entry.
    #[error("checksum error: mode={mode} temp={temp:?} entry={entry:02x?}")]
    Checksum {
        mode: usize,
        temp: Option<usize>,
        entry: [u8; 4],
    },

    #[error("truncated input: {0}")]
    Truncated(String),

    #[error("range error: {0}")]
    Range(String),

    #[error(
        "range error: summary too long: mode={mode:?} temp={temp} src={src} dst={dst} len={len} capacity={capacity}"
    )]
    Capacity {
        mode: LutMode,
        temp: usize,
        src: u8,
        dst: u8,
        len: usize,
        capacity: usize,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("playback mismatch: mode={mode:?} temp={temp} src={src} dst={dst}: want {want:?} got {got:?}")]
    Verify {
        mode: LutMode,
        temp: usize,
        src: u8,
        dst: u8,
        want: Vec<u8>,
        got: Vec<u8>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
