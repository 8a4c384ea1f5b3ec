// crates/clut-core/tests/end_to_end.rs

use clut_core::clut::band::RECORD_LEN;
use clut_core::clut::file::PREAMBLE_LEN;
use clut_core::sim::Sim;
use clut_core::waveform::summary::Run;
use clut_core::wbf::writer::WbfWriter;
use clut_core::{convert, ClutError, ClutFile, ConvertConfig, LutMode, SourceMode, Waveform};

/// Four frames, each byte of a frame holding the same four codes.
fn init_cell() -> Vec<u8> {
    let mut cell = Vec::new();
    for b in [0x07u8, 0x07, 0x05, 0x00] {
        cell.extend(std::iter::repeat(b).take(256));
    }
    cell
}

fn single_mode_container() -> Vec<u8> {
    let mut w = WbfWriter::new(vec![0, 15, 30]).unwrap();
    w.push_mode(vec![init_cell(), init_cell()]).unwrap();
    w.encode().unwrap()
}

// Whole frames of 0x07 bytes stand in for the two-byte `[0x07, 0x01, 0xFF]`
// stream, which is shorter than one frame (see "Partial frames" in DESIGN.md).
#[test]
fn single_mode_container_to_table() {
    let bytes = single_mode_container();
    assert_eq!(bytes[0x25], 0);
    assert_eq!(bytes[0x26], 1);

    let wf = Waveform::from_wbf(&bytes).unwrap();
    assert_eq!(wf.temps, vec![0, 15, 30]);
    assert!(wf.has_mode(LutMode::Init));
    assert!(!wf.has_mode(LutMode::Gc16));

    // src % 4 == 0 -> [3, 3, 1, 0], src % 4 == 1 -> [1, 1, 1, 0], others idle
    let s = wf.summaries(LutMode::Init, 0).unwrap();
    assert_eq!(s.len(), 512);
    assert_eq!(s[0].runs, vec![Run::new(3, 2), Run::new(1, 1)]);
    let s1 = s.iter().find(|x| x.src == 1).unwrap();
    assert_eq!(s1.runs, vec![Run::new(1, 3)]);

    let file = convert(&wf, &ConvertConfig::default()).unwrap();
    assert_eq!(file.bands.len(), 2);
    let band = &file.bands[0];
    assert_eq!((band.temp_lower, band.temp_upper), (0, 15));
    assert_eq!(band.offset(LutMode::Init), 1);
    assert_eq!(band.offset(LutMode::Idle), 3);
    assert_eq!(band.offsets, [1, 1, 1, 1, 1, 3]);

    let row = band.row(0, 0).unwrap();
    assert_eq!(&row[..4], &[0x00, 0xC2, 0x61, 0x00]);

    let mut sim = Sim::new(band);
    assert_eq!(sim.run(3, 0, 0, LutMode::Init).unwrap(), &[3, 3, 1]);
    assert_eq!(sim.run(3, 4, 30, LutMode::Init).unwrap(), &[3, 3, 1]);
    assert_eq!(sim.run(2, 2, 2, LutMode::Init).unwrap(), &[0, 0]);

    let out = file.encode();
    assert_eq!(out.len(), PREAMBLE_LEN + 2 * RECORD_LEN);
    assert_eq!(ClutFile::decode(&out).unwrap(), file);
}

#[test]
fn corrupted_pointer_stops_the_conversion() {
    let mut bytes = single_mode_container();
    let mode_table = 0x30 + 3;
    bytes[mode_table + 3] ^= 0x10;
    assert!(matches!(
        Waveform::from_wbf(&bytes),
        Err(ClutError::Checksum { mode: 0, temp: None, .. })
    ));
}

#[test]
fn partial_frame_cell_is_rejected() {
    // decodes to two bytes: eight codes, not a whole frame
    let mut w = WbfWriter::new(vec![0, 15, 30]).unwrap();
    w.push_mode(vec![vec![0x07, 0x07], vec![0x07, 0x07]]).unwrap();
    let bytes = w.encode().unwrap();
    assert!(matches!(Waveform::from_wbf(&bytes), Err(ClutError::Truncated(_))));
}

#[test]
fn bad_cell_error_names_its_coordinates() {
    let mut w = WbfWriter::new(vec![0, 15, 30]).unwrap();
    w.push_mode(vec![init_cell(), init_cell()]).unwrap();
    w.push_mode(vec![vec![0xAA; 256], vec![0x07, 0x07]]).unwrap();
    let bytes = w.encode().unwrap();

    let err = Waveform::from_wbf(&bytes).unwrap_err();
    assert!(matches!(err, ClutError::Truncated(_)));
    let msg = err.to_string();
    assert!(msg.contains("mode=1 temp=1"), "{msg}");

    // a stream that runs off the buffer reports the same way
    let mut cut = w.encode().unwrap();
    cut.pop();
    let msg = Waveform::from_wbf(&cut).unwrap_err().to_string();
    assert!(msg.contains("mode=1 temp=1"), "{msg}");
}

#[test]
fn source_modes_list_in_container_order() {
    for (i, m) in SourceMode::ALL.iter().enumerate() {
        assert_eq!(m.index(), i);
    }
    for mode in LutMode::ALL {
        if let Some(source) = mode.source() {
            assert_eq!(source.name(), mode.name());
        }
    }
}

#[test]
fn container_indices_map_to_table_modes() {
    // container mode k: k + 1 frames of phase 1 on every transition
    let mut w = WbfWriter::new(vec![10, 40]).unwrap();
    for k in 0..8usize {
        w.push_mode(vec![vec![0x55; 256 * (k + 1)]]).unwrap();
    }
    let wf = Waveform::from_wbf(&w.encode().unwrap()).unwrap();

    let frames = |mode: LutMode| {
        let s = wf.summaries(mode, 0).unwrap();
        assert_eq!(s.len(), 1024);
        s[0].frames()
    };
    assert_eq!(frames(LutMode::Init), 1);
    assert_eq!(frames(LutMode::Du), 2);
    assert_eq!(frames(LutMode::Gc16), 3);
    assert_eq!(frames(LutMode::Gl16), 4);
    assert_eq!(frames(LutMode::Du4), 8);

    let file = convert(&wf, &ConvertConfig::default()).unwrap();
    assert_eq!(file.bands[0].offsets, [1, 2, 3, 4, 5, 6]);
    let band = &file.bands[0];
    let mut sim = Sim::new(band);
    assert_eq!(sim.run(8, 30, 2, LutMode::Du4).unwrap(), &[1; 8]);
}
