// crates/clut-core/tests/summary_matrix.rs

use clut_core::codec::polarity::{pack, unpack};
use clut_core::waveform::matrix::{TransitionMatrix, TRANSITIONS};
use clut_core::waveform::summary::{expand, summarise, summarise_matrix, Run};
use clut_core::ClutError;

fn lcg_next(x: &mut u64) -> u64 {
    *x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    *x
}

fn runs(pairs: &[(u8, u8)]) -> Vec<Run> {
    pairs.iter().map(|&(p, n)| Run::new(p, n)).collect()
}

#[test]
fn leading_delay_and_trailing_zeros_are_dropped() {
    assert_eq!(summarise(&[0, 0, 3, 3, 0, 0]), runs(&[(3, 2)]));
    assert_eq!(summarise(&[1, 1, 1, 2, 0]), runs(&[(1, 3), (2, 1)]));
    assert_eq!(summarise(&[0, 0, 0]), vec![]);
    assert_eq!(summarise(&[]), vec![]);
}

#[test]
fn interior_zeros_are_kept() {
    assert_eq!(summarise(&[3, 0, 3, 0]), runs(&[(3, 1), (0, 1), (3, 1)]));
    assert_eq!(summarise(&[1, 0, 0, 2]), runs(&[(1, 1), (0, 2), (2, 1)]));
}

#[test]
fn runs_are_capped_at_31() {
    assert_eq!(summarise(&[2; 40]), runs(&[(2, 31), (2, 9)]));
    assert_eq!(summarise(&[2; 62]), runs(&[(2, 31), (2, 31)]));

    let mut seq = vec![1];
    seq.extend(std::iter::repeat(0).take(40));
    assert_eq!(summarise(&seq), runs(&[(1, 1)]));
}

#[test]
fn expansion_reproduces_the_nonzero_span() {
    let mut seed: u64 = 0xfeed_beef;

    for _ in 0..200 {
        let n = 1 + (lcg_next(&mut seed) >> 40) as usize % 120;
        let mut seq = Vec::with_capacity(n);
        while seq.len() < n {
            let p = ((lcg_next(&mut seed) >> 33) % 4) as u8;
            let len = 1 + ((lcg_next(&mut seed) >> 40) % 40) as usize;
            seq.extend(std::iter::repeat(p).take(len.min(n - seq.len())));
        }

        let r = summarise(&seq);
        assert!(r.iter().all(|x| x.len >= 1 && x.len <= 31));

        let first = seq.iter().position(|&p| p != 0);
        let last = seq.iter().rposition(|&p| p != 0);
        match (first, last) {
            (Some(a), Some(b)) => assert_eq!(expand(&r), seq[a..=b].to_vec(), "seq={seq:?}"),
            _ => assert!(r.is_empty()),
        }
    }
}

#[test]
fn polarity_codes_are_lsb_first() {
    assert_eq!(unpack(&[0x07]), vec![3, 1, 0, 0]);
    assert_eq!(unpack(&[0xE4, 0x1B]), vec![0, 1, 2, 3, 3, 2, 1, 0]);

    let bytes: Vec<u8> = (0..=255u8).collect();
    assert_eq!(pack(&unpack(&bytes)).unwrap(), bytes);

    assert!(matches!(pack(&[4, 0, 0, 0]), Err(ClutError::Range(_))));
    assert!(matches!(pack(&[1, 2]), Err(ClutError::Range(_))));
}

fn phase_at(src: usize, dst: usize, frame: usize) -> u8 {
    ((src + 3 * dst + frame) % 4) as u8
}

#[test]
fn matrix_rows_follow_container_order() {
    let frames = 3;
    let mut flat = vec![0u8; frames * TRANSITIONS];
    for f in 0..frames {
        for dst in 0..32 {
            for src in 0..32 {
                flat[f * TRANSITIONS + dst * 32 + src] = phase_at(src, dst, f);
            }
        }
    }

    let m = TransitionMatrix::from_frame_major(&flat).unwrap();
    assert_eq!(m.frames(), frames);
    for (src, dst) in [(0u8, 0u8), (1, 0), (0, 1), (17, 30), (31, 31)] {
        let want: Vec<u8> = (0..frames).map(|f| phase_at(src as usize, dst as usize, f)).collect();
        assert_eq!(m.row(src, dst), want.as_slice(), "src={src} dst={dst}");
    }
    assert_eq!(m.to_frame_major(), flat);

    let from_bytes = TransitionMatrix::from_decoded(&pack(&flat).unwrap()).unwrap();
    assert_eq!(from_bytes, m);
}

#[test]
fn partial_frames_are_rejected() {
    let err = TransitionMatrix::from_frame_major(&[0u8; 1000]).unwrap_err();
    assert!(matches!(err, ClutError::Truncated(_)));
}

#[test]
fn matrix_summaries_skip_idle_transitions() {
    // two frames: only (src=5, dst=2) moves
    let mut flat = vec![0u8; 2 * TRANSITIONS];
    flat[2 * 32 + 5] = 2;
    flat[TRANSITIONS + 2 * 32 + 5] = 1;

    let m = TransitionMatrix::from_frame_major(&flat).unwrap();
    let s = summarise_matrix(&m);
    assert_eq!(s.len(), 1);
    assert_eq!((s[0].src, s[0].dst), (5, 2));
    assert_eq!(s[0].runs, runs(&[(2, 1), (1, 1)]));
    assert_eq!(s[0].frames(), 2);
}
