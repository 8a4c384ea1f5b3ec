// crates/clut-core/src/validate.rs

use tracing::debug;

use crate::clut::band::ClutBand;
use crate::error::{ClutError, Result};
use crate::sim::Sim;
use crate::waveform::mode::LutMode;
use crate::waveform::summary::expand;
use crate::waveform::Waveform;

/// Replay every stored cell of band `temp` and compare with its summary.
/// Returns the number of cells checked.
pub fn verify_band(wf: &Waveform, band: &ClutBand, temp: usize) -> Result<usize> {
    let mut sim = Sim::new(band);
    let mut checked = 0usize;

    for mode in LutMode::ALL {
        if mode == LutMode::Idle {
            continue;
        }
        for s in wf.summaries(mode, temp)? {
            if s.src % 2 != 0 || s.dst % 2 != 0 {
                continue;
            }
            let want = expand(&s.runs);
            let got = sim.run(want.len(), s.src, s.dst, mode)?;
            if got != want.as_slice() {
                return Err(ClutError::Verify {
                    mode,
                    temp,
                    src: s.src,
                    dst: s.dst,
                    want,
                    got: got.to_vec(),
                });
            }
            checked += 1;
        }
    }

    debug!(temp, checked, "band verified");
    Ok(checked)
}
