// crates/clut-core/src/clut/build.rs

use tracing::debug;

use crate::clut::band::{ClutBand, SEQ_LEN};
use crate::clut::file::ClutFile;
use crate::config::ConvertConfig;
use crate::error::{ClutError, Result};
use crate::validate::verify_band;
use crate::waveform::mode::LutMode;
use crate::waveform::Waveform;

/// Per-mode start slots: each non-idle mode gets room for its longest
/// summary, packed back to back from slot 1; idle starts where the last
/// mode ends. Slots past the row end are clamped to it; the capacity check in
/// [`build_band`] reports the overflowing transition.
pub fn mode_offsets(wf: &Waveform, temp: usize) -> Result<[u8; LutMode::COUNT]> {
    let mut offsets = [0u8; LutMode::COUNT];
    let mut next = 1usize;
    for mode in LutMode::ALL {
        offsets[mode.index()] = next.min(SEQ_LEN) as u8;
        if mode != LutMode::Idle {
            next += wf.max_len(mode, temp)?;
        }
    }
    Ok(offsets)
}

/// Pack every mode's summaries for band `temp`.
///
/// Every transition is checked against its mode's capacity, but only even
/// source/destination levels have a row in the 16x16 table; odd ones are not
/// stored.
pub fn build_band(wf: &Waveform, temp: usize) -> Result<ClutBand> {
    let offsets = mode_offsets(wf, temp)?;
    let mut band = ClutBand::new(wf.temps[temp], wf.temps[temp + 1], offsets);

    for mode in LutMode::ALL {
        if mode == LutMode::Idle {
            continue;
        }
        let capacity = band.capacity(mode);
        let summaries = wf.summaries(mode, temp)?;
        for s in summaries {
            if s.len() > capacity {
                return Err(ClutError::Capacity {
                    mode,
                    temp,
                    src: s.src,
                    dst: s.dst,
                    len: s.len(),
                    capacity,
                });
            }
        }
        for s in summaries.iter().filter(|s| s.src % 2 == 0 && s.dst % 2 == 0) {
            band.write_sequence(mode, s.src, s.dst, &s.runs)?;
        }
    }

    debug!(temp, lower = band.temp_lower, upper = band.temp_upper, offsets = ?band.offsets, "band built");
    Ok(band)
}

/// Build, post-process and optionally verify every band of `wf`.
pub fn convert(wf: &Waveform, cfg: &ConvertConfig) -> Result<ClutFile> {
    let mut bands = Vec::with_capacity(wf.bands());
    for temp in 0..wf.bands() {
        let mut band = build_band(wf, temp)?;
        if cfg.verify {
            verify_band(wf, &band, temp)?;
        }
        if let Some(delay) = cfg.idle_delay {
            band.fill_idle(delay);
        }
        bands.push(band);
    }
    Ok(ClutFile { bands })
}
