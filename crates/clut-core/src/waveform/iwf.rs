// crates/clut-core/src/waveform/iwf.rs
//
// Text waveform descriptor:
//
//   [WAVEFORM]
//   PREFIX = panel
//   TEMPS = 2
//   T0RANGE = 0
//   T1RANGE = 15
//   TUPBOUND = 30
//   [MODE0]
//   NAME = GC16
//   T0FC = 38
//   T0TABLE = 0         -> panel_TB0.csv (band 0)
//   T1TABLE = 1         -> panel_TB1.csv (band 1)
//
// Each table row is `src,dst,phase0,phase1,...,` with a trailing empty column.

use std::path::Path;

use crate::error::{ClutError, Result};
use crate::waveform::mode::LutMode;
use crate::waveform::summary::{summarise, Summary};
use crate::waveform::Waveform;

#[derive(Default)]
struct PendingMode {
    name: Option<String>,
    tables: Vec<Vec<Summary>>,
}

/// Read a descriptor and its sibling tables from disk.
pub fn load_iwf(path: &Path) -> Result<Waveform> {
    let text = std::fs::read_to_string(path)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_iwf(&text, |name| Ok(std::fs::read_to_string(dir.join(name))?))
}

/// Parse descriptor `text`; `load_table` returns the contents of a named table.
pub fn parse_iwf<F>(text: &str, mut load_table: F) -> Result<Waveform>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut prefix = String::new();
    let mut temps: Option<Vec<i32>> = None;
    let mut current: Option<PendingMode> = None;
    let mut done: Vec<PendingMode> = Vec::new();

    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("[MODE") {
            done.extend(current.take());
            current = Some(PendingMode::default());
            continue;
        }
        if line.starts_with('[') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let [k, _, v] = parts[..] else {
            return Err(ClutError::Parse(format!("line {}: expected `KEY = VALUE`: {line:?}", n + 1)));
        };

        if k == "PREFIX" {
            prefix = v.to_string();
        } else if k == "TEMPS" {
            temps = Some(vec![0; parse_num::<usize>(v, n)? + 1]);
        } else if let Some(idx) = k.strip_prefix('T').and_then(|s| s.strip_suffix("RANGE")) {
            let idx = parse_num::<usize>(idx, n)?;
            let t = temps
                .as_mut()
                .ok_or_else(|| ClutError::Parse(format!("line {}: {k} before TEMPS", n + 1)))?;
            let slot = t
                .get_mut(idx)
                .ok_or_else(|| ClutError::Parse(format!("line {}: {k} beyond TEMPS", n + 1)))?;
            *slot = parse_num(v, n)?;
        } else if k == "TUPBOUND" {
            let t = temps
                .as_mut()
                .ok_or_else(|| ClutError::Parse(format!("line {}: TUPBOUND before TEMPS", n + 1)))?;
            if let Some(last) = t.last_mut() {
                *last = parse_num(v, n)?;
            }
        } else if k.ends_with("FC") {
            // frame counts are implied by the tables
        } else if k == "NAME" {
            if let Some(m) = current.as_mut() {
                m.name = Some(v.to_string());
            }
        } else if k.ends_with("TABLE") {
            let m = current
                .as_mut()
                .ok_or_else(|| ClutError::Parse(format!("line {}: table outside a mode section", n + 1)))?;
            let name = format!("{prefix}_TB{v}.csv");
            let body = load_table(&name)?;
            m.tables.push(parse_table(&body, &name)?);
        }
    }
    done.extend(current.take());

    let temps = temps.ok_or_else(|| ClutError::Parse("descriptor has no TEMPS".into()))?;
    let mut wf = Waveform::new(temps)?;

    for m in done {
        let Some(mode) = m.name.as_deref().and_then(|n| n.parse::<LutMode>().ok()) else {
            continue;
        };
        if mode == LutMode::Idle {
            continue;
        }
        if m.tables.len() > wf.bands() {
            return Err(ClutError::Parse(format!(
                "mode {mode} has {} tables for {} bands",
                m.tables.len(),
                wf.bands()
            )));
        }
        for (temp, summaries) in m.tables.into_iter().enumerate() {
            wf.set_summaries(mode, temp, summaries)?;
        }
    }
    Ok(wf)
}

/// One CSV table -> summaries of its nonzero rows.
pub fn parse_table(body: &str, name: &str) -> Result<Vec<Summary>> {
    let mut out = Vec::new();
    for (n, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        if fields.len() < 2 {
            return Err(ClutError::Parse(format!("{name}:{}: short row", n + 1)));
        }
        let mut vals = Vec::with_capacity(fields.len());
        for f in &fields {
            vals.push(
                f.parse::<u8>()
                    .map_err(|_| ClutError::Parse(format!("{name}:{}: bad value {f:?}", n + 1)))?,
            );
        }
        let (src, dst, seq) = (vals[0], vals[1], &vals[2..]);
        if src >= 32 || dst >= 32 || seq.iter().any(|&p| p > 3) {
            return Err(ClutError::Parse(format!("{name}:{}: value out of range", n + 1)));
        }
        if seq.iter().all(|&p| p == 0) {
            continue;
        }
        out.push(Summary {
            src,
            dst,
            runs: summarise(seq),
        });
    }
    Ok(out)
}

fn parse_num<T: std::str::FromStr>(s: &str, line: usize) -> Result<T> {
    s.parse()
        .map_err(|_| ClutError::Parse(format!("line {}: bad number {s:?}", line + 1)))
}
