// crates/clut-core/src/waveform/summary.rs

use crate::waveform::matrix::TransitionMatrix;

/// Longest run one packed pair can hold (5-bit field).
pub const MAX_RUN: u8 = 31;

/// `phase` repeated `len` frames; `len` is 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub phase: u8,
    pub len: u8,
}

impl Run {
    pub const fn new(phase: u8, len: u8) -> Self {
        Self { phase, len }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub src: u8,
    pub dst: u8,
    pub runs: Vec<Run>,
}

impl Summary {
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Frames covered by the runs.
    pub fn frames(&self) -> usize {
        self.runs.iter().map(|r| r.len as usize).sum()
    }
}

/// Reduce one transition's per-frame codes to runs.
///
/// Leading zero frames are dropped (pure delay), runs are capped at
/// [`MAX_RUN`], and trailing zero-phase runs are trimmed so the result ends at
/// the last nonzero frame. An all-zero sequence yields no runs.
pub fn summarise(seq: &[u8]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut current: Option<u8> = None;
    let mut count = 0u8;

    for &p in seq {
        if let Some(c) = current {
            if c != p || count == MAX_RUN {
                runs.push(Run::new(c, count));
                count = 0;
            }
        }
        if current.is_none() && p == 0 {
            continue;
        }
        current = Some(p);
        count += 1;
    }
    if let Some(c) = current {
        if count > 0 {
            runs.push(Run::new(c, count));
        }
    }

    while runs.len() > 1 && runs.last().is_some_and(|r| r.phase == 0) {
        runs.pop();
    }
    runs
}

/// Summaries of every transition with at least one nonzero frame, in
/// (src, dst) order.
pub fn summarise_matrix(m: &TransitionMatrix) -> Vec<Summary> {
    m.rows()
        .filter(|(_, _, row)| row.iter().any(|&p| p != 0))
        .map(|(src, dst, row)| Summary {
            src,
            dst,
            runs: summarise(row),
        })
        .collect()
}

/// Play runs back into per-frame codes.
pub fn expand(runs: &[Run]) -> Vec<u8> {
    let mut out = Vec::with_capacity(runs.iter().map(|r| r.len as usize).sum());
    for r in runs {
        out.extend(std::iter::repeat(r.phase).take(r.len as usize));
    }
    out
}
