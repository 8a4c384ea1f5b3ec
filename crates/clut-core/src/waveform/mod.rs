// crates/clut-core/src/waveform/mod.rs

pub mod iwf;
pub mod matrix;
pub mod mode;
pub mod summary;

use tracing::debug;

use crate::error::{ClutError, Result};
use crate::waveform::mode::LutMode;
use crate::waveform::summary::{summarise_matrix, Summary};
use crate::wbf::WbfFile;

/// Summaries for every table mode and temperature band, independent of the
/// input format they came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Waveform {
    /// Band delimiters; band `t` spans `temps[t]..temps[t + 1]`.
    pub temps: Vec<i32>,
    /// `[LutMode::index()][temp]`; `None` when the input lacks the mode.
    modes: [Option<Vec<Vec<Summary>>>; LutMode::COUNT],
}

impl Waveform {
    pub fn new(temps: Vec<i32>) -> Result<Self> {
        if temps.len() < 2 {
            return Err(ClutError::Range(format!(
                "need at least 2 temperature breakpoints, got {}",
                temps.len()
            )));
        }
        Ok(Self {
            temps,
            modes: Default::default(),
        })
    }

    pub fn bands(&self) -> usize {
        self.temps.len() - 1
    }

    /// Install one band's summaries for `mode`. The first call for a mode
    /// marks it present with empty bands.
    pub fn set_summaries(&mut self, mode: LutMode, temp: usize, summaries: Vec<Summary>) -> Result<()> {
        if mode == LutMode::Idle {
            return Err(ClutError::Range("the idle slot carries no summaries".into()));
        }
        let bands = self.bands();
        if temp >= bands {
            return Err(ClutError::Range(format!(
                "temperature index {temp} out of range (bands {bands})"
            )));
        }
        let per_temp = self.modes[mode.index()].get_or_insert_with(|| vec![Vec::new(); bands]);
        per_temp[temp] = summaries;
        Ok(())
    }

    pub fn has_mode(&self, mode: LutMode) -> bool {
        self.modes[mode.index()].is_some()
    }

    /// Summaries of one band; empty for a mode the input did not carry.
    pub fn summaries(&self, mode: LutMode, temp: usize) -> Result<&[Summary]> {
        if temp >= self.bands() {
            return Err(ClutError::Range(format!(
                "temperature index {temp} out of range (bands {})",
                self.bands()
            )));
        }
        Ok(match &self.modes[mode.index()] {
            Some(per_temp) => &per_temp[temp],
            None => &[],
        })
    }

    /// Longest summary of one band, 0 when there are none.
    pub fn max_len(&self, mode: LutMode, temp: usize) -> Result<usize> {
        Ok(self.summaries(mode, temp)?.iter().map(Summary::len).max().unwrap_or(0))
    }

    /// Decode every table mode the container carries.
    pub fn from_wbf(bytes: &[u8]) -> Result<Self> {
        let file = WbfFile::parse(bytes)?;
        let temps = file.header.temperatures.iter().map(|&t| t as i32).collect();
        let mut wf = Waveform::new(temps)?;

        for mode in LutMode::ALL {
            let Some(source) = mode.source() else { continue };
            if source.index() >= file.header.mode_count {
                debug!(%mode, index = source.index(), "mode absent from container");
                continue;
            }
            for temp in 0..wf.bands() {
                let matrix = file.cell(source.index(), temp)?;
                let summaries = summarise_matrix(&matrix);
                debug!(
                    %mode,
                    temp,
                    frames = matrix.frames(),
                    transitions = summaries.len(),
                    "cell summarised"
                );
                wf.set_summaries(mode, temp, summaries)?;
            }
        }
        Ok(wf)
    }
}
