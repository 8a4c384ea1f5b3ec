// crates/clut-core/src/codec/rle.rs
//
// Toggled run-length stream:
// - starts in repeat mode
// - 0xFC flips repeat/literal mode; the next byte is the value token
// - repeat mode: value, count  -> value emitted count+1 times
// - literal mode: value        -> value emitted once
// - 0xFF (read as a token, never as a count) ends the stream

use crate::error::{ClutError, Result};

pub const TOKEN_TOGGLE: u8 = 0xFC;
pub const TOKEN_END: u8 = 0xFF;

/// Longest run one (value, count) pair can carry.
const MAX_CHUNK: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub data: Vec<u8>,
    /// Bytes consumed, end token included.
    pub consumed: usize,
}

/// Decode from the start of `stream`. The slice end is the stream bound:
/// running off it before the end token is `Truncated`.
pub fn decode(stream: &[u8]) -> Result<Decoded> {
    let mut data = Vec::new();
    let mut repeat_mode = true;
    let mut i = 0usize;

    loop {
        let mut token = byte_at(stream, i)?;
        if token == TOKEN_END {
            return Ok(Decoded { data, consumed: i + 1 });
        }

        if token == TOKEN_TOGGLE {
            repeat_mode = !repeat_mode;
            i += 1;
            token = byte_at(stream, i)?;
        }

        if repeat_mode {
            let count = byte_at(stream, i + 1)? as usize;
            data.extend(std::iter::repeat(token).take(count + 1));
            i += 2;
        } else {
            data.push(token);
            i += 1;
        }
    }
}

fn byte_at(stream: &[u8], i: usize) -> Result<u8> {
    stream.get(i).copied().ok_or_else(|| {
        ClutError::Truncated(format!("rle stream ended at byte {i} without end token"))
    })
}

/// Encode `data` into a stream `decode` accepts.
///
/// Runs of two or more equal values go out as repeat pairs; stretches of two
/// or more singletons switch to literal mode. A lone singleton between runs
/// stays in repeat mode with count 0. Values equal to a control token cannot
/// be represented and are rejected.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    if let Some(pos) = data.iter().position(|&b| b == TOKEN_TOGGLE || b == TOKEN_END) {
        return Err(ClutError::Range(format!(
            "byte 0x{:02x} at {pos} collides with an rle control token",
            data[pos]
        )));
    }

    let mut out = Vec::with_capacity(data.len() / 2 + 1);
    let mut repeat_mode = true;
    let mut i = 0usize;

    while i < data.len() {
        let run = run_len(data, i);
        if run >= 2 {
            if !repeat_mode {
                out.push(TOKEN_TOGGLE);
                repeat_mode = true;
            }
            let mut left = run;
            while left > 0 {
                let chunk = left.min(MAX_CHUNK);
                out.push(data[i]);
                out.push((chunk - 1) as u8);
                left -= chunk;
            }
            i += run;
            continue;
        }

        let singles = singles_len(data, i);
        if repeat_mode && singles >= 2 {
            out.push(TOKEN_TOGGLE);
            repeat_mode = false;
        }
        if repeat_mode {
            out.push(data[i]);
            out.push(0);
        } else {
            out.extend_from_slice(&data[i..i + singles]);
        }
        i += if repeat_mode { 1 } else { singles };
    }

    out.push(TOKEN_END);
    Ok(out)
}

fn run_len(data: &[u8], start: usize) -> usize {
    let v = data[start];
    data[start..].iter().take_while(|&&b| b == v).count()
}

/// Number of consecutive positions from `start` that each begin a run of one.
fn singles_len(data: &[u8], start: usize) -> usize {
    let mut j = start;
    while j < data.len() && run_len(data, j) == 1 {
        j += 1;
    }
    j - start
}
