// crates/clut-core/tests/iwf.rs

use std::collections::HashMap;

use clut_core::waveform::iwf::{load_iwf, parse_iwf, parse_table};
use clut_core::waveform::summary::Run;
use clut_core::{ClutError, LutMode, Result};

const DESCRIPTOR: &str = "\
[WAVEFORM]
PREFIX = panel
TEMPS = 2
T0RANGE = 0
T1RANGE = 15
TUPBOUND = 30

[MODE0]
NAME = INIT
T0FC = 4
T0TABLE = 0
T1TABLE = 1

[MODE1]
NAME = A2
T0TABLE = 2
T1TABLE = 2

[MODE2]
NAME = GC16
T0TABLE = 3
";

fn tables() -> HashMap<String, String> {
    let mut t = HashMap::new();
    t.insert("panel_TB0.csv".into(), "0,0,3,3,1,0,\n0,2,0,0,0,0,\n2,4,1,1,1,2,\n".into());
    t.insert("panel_TB1.csv".into(), "0,0,2,0,\n".into());
    t.insert("panel_TB2.csv".into(), "1,1,3,\n".into());
    t.insert("panel_TB3.csv".into(), "30,28,0,1,1,0,2,\n".into());
    t
}

fn loader(t: &HashMap<String, String>) -> impl FnMut(&str) -> Result<String> + '_ {
    move |name: &str| {
        t.get(name)
            .cloned()
            .ok_or_else(|| ClutError::Parse(format!("missing table {name}")))
    }
}

#[test]
fn descriptor_builds_a_waveform() {
    let t = tables();
    let wf = parse_iwf(DESCRIPTOR, loader(&t)).unwrap();

    assert_eq!(wf.temps, vec![0, 15, 30]);
    assert!(wf.has_mode(LutMode::Init));
    assert!(wf.has_mode(LutMode::Gc16));
    assert!(!wf.has_mode(LutMode::Du));

    let init0 = wf.summaries(LutMode::Init, 0).unwrap();
    assert_eq!(init0.len(), 2);
    assert_eq!(init0[0].runs, vec![Run::new(3, 2), Run::new(1, 1)]);
    assert_eq!((init0[1].src, init0[1].dst), (2, 4));
    assert_eq!(init0[1].runs, vec![Run::new(1, 3), Run::new(2, 1)]);

    assert_eq!(wf.summaries(LutMode::Init, 1).unwrap()[0].runs, vec![Run::new(2, 1)]);

    // one table for two bands: the second band stays empty
    let gc = wf.summaries(LutMode::Gc16, 0).unwrap();
    assert_eq!(gc[0].runs, vec![Run::new(1, 2), Run::new(0, 1), Run::new(2, 1)]);
    assert!(wf.summaries(LutMode::Gc16, 1).unwrap().is_empty());
}

#[test]
fn table_rows_are_validated() {
    assert!(parse_table("0,0,1,1,\n", "t").is_ok());
    assert!(matches!(parse_table("0,\n", "t"), Err(ClutError::Parse(_))));
    assert!(matches!(parse_table("32,0,1,\n", "t"), Err(ClutError::Parse(_))));
    assert!(matches!(parse_table("0,0,4,\n", "t"), Err(ClutError::Parse(_))));
    assert!(matches!(parse_table("0,0,x,\n", "t"), Err(ClutError::Parse(_))));
    assert!(parse_table("0,0,0,0,\n", "t").unwrap().is_empty());
}

#[test]
fn malformed_descriptors_are_rejected() {
    let t = tables();

    let no_temps = "[MODE0]\nNAME = INIT\n";
    assert!(matches!(parse_iwf(no_temps, loader(&t)), Err(ClutError::Parse(_))));

    let range_first = "T0RANGE = 0\nTEMPS = 1\n";
    assert!(matches!(parse_iwf(range_first, loader(&t)), Err(ClutError::Parse(_))));

    let bad_line = "TEMPS 1\n";
    assert!(matches!(parse_iwf(bad_line, loader(&t)), Err(ClutError::Parse(_))));

    let too_many = "PREFIX = panel\nTEMPS = 1\nTUPBOUND = 9\n[MODE0]\nNAME = DU\nT0TABLE = 0\nT1TABLE = 1\n";
    assert!(matches!(parse_iwf(too_many, loader(&t)), Err(ClutError::Parse(_))));

    let missing = "PREFIX = other\nTEMPS = 1\n[MODE0]\nNAME = DU\nT0TABLE = 0\n";
    assert!(matches!(parse_iwf(missing, loader(&t)), Err(ClutError::Parse(_))));
}

#[test]
fn loads_descriptor_and_tables_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("panel.iwf"), DESCRIPTOR).unwrap();
    for (name, body) in tables() {
        std::fs::write(dir.path().join(name), body).unwrap();
    }

    let wf = load_iwf(&dir.path().join("panel.iwf")).unwrap();
    assert_eq!(wf.bands(), 2);
    assert_eq!(wf.summaries(LutMode::Init, 0).unwrap().len(), 2);

    std::fs::remove_file(dir.path().join("panel_TB3.csv")).unwrap();
    assert!(matches!(load_iwf(&dir.path().join("panel.iwf")), Err(ClutError::Io(_))));
}
