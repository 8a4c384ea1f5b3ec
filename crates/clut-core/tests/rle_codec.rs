// crates/clut-core/tests/rle_codec.rs

use clut_core::codec::polarity::unpack;
use clut_core::codec::rle::{decode, encode, TOKEN_END, TOKEN_TOGGLE};
use clut_core::ClutError;

fn lcg_next(x: &mut u64) -> u64 {
    // deterministic, not crypto
    *x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    *x
}

#[test]
fn toggle_into_literal_mode() {
    let d = decode(&[0xFC, 0x05, 0xFF]).unwrap();
    assert_eq!(d.data, vec![0x05]);
    assert_eq!(d.consumed, 3);
}

#[test]
fn repeat_pair_emits_count_plus_one() {
    let d = decode(&[0xAB, 0x02, 0xFF]).unwrap();
    assert_eq!(d.data, vec![0xAB, 0xAB, 0xAB]);
}

#[test]
fn decoded_bytes_split_into_phases() {
    let d = decode(&[0x07, 0x01, 0xFF]).unwrap();
    assert_eq!(d.data, vec![0x07, 0x07]);
    assert_eq!(unpack(&d.data), vec![3, 1, 0, 0, 3, 1, 0, 0]);
}

#[test]
fn count_byte_is_never_a_token() {
    let d = decode(&[0x07, 0xFF, 0xFF]).unwrap();
    assert_eq!(d.data, vec![0x07; 256]);
    assert_eq!(d.consumed, 3);
}

#[test]
fn literal_then_back_to_repeat() {
    let d = decode(&[0xFC, 1, 2, 0xFC, 3, 1, 0xFF]).unwrap();
    assert_eq!(d.data, vec![1, 2, 3, 3]);
    assert_eq!(d.consumed, 7);
}

#[test]
fn bytes_after_end_token_are_ignored() {
    let d = decode(&[0x01, 0x00, 0xFF, 0x55, 0x66]).unwrap();
    assert_eq!(d.data, vec![0x01]);
    assert_eq!(d.consumed, 3);
}

#[test]
fn missing_end_token_is_truncated() {
    for stream in [&[][..], &[0x01][..], &[0x01, 0x00][..], &[0xFC][..], &[0xFC, 0x01][..]] {
        let err = decode(stream).unwrap_err();
        assert!(matches!(err, ClutError::Truncated(_)), "stream={stream:?} err={err:?}");
    }
}

#[test]
fn encode_shapes() {
    assert_eq!(encode(&[]).unwrap(), vec![TOKEN_END]);
    assert_eq!(encode(&[5, 5, 5]).unwrap(), vec![5, 2, TOKEN_END]);
    assert_eq!(encode(&[1, 2, 3]).unwrap(), vec![TOKEN_TOGGLE, 1, 2, 3, TOKEN_END]);
    assert_eq!(encode(&[1, 2, 2]).unwrap(), vec![1, 0, 2, 1, TOKEN_END]);
    assert_eq!(
        encode(&[1, 2, 3, 4, 4]).unwrap(),
        vec![TOKEN_TOGGLE, 1, 2, 3, TOKEN_TOGGLE, 4, 1, TOKEN_END]
    );
}

#[test]
fn long_runs_split_into_chunks() {
    let data = vec![9u8; 700];
    let enc = encode(&data).unwrap();
    assert_eq!(enc, vec![9, 255, 9, 255, 9, 187, TOKEN_END]);
    assert_eq!(decode(&enc).unwrap().data, data);
}

#[test]
fn encode_rejects_control_tokens() {
    for data in [vec![1, TOKEN_TOGGLE], vec![TOKEN_END], vec![TOKEN_END, TOKEN_END, 3]] {
        let err = encode(&data).unwrap_err();
        assert!(matches!(err, ClutError::Range(_)), "data={data:?}");
    }
}

#[test]
fn roundtrip_mixed_runs() {
    let mut seed: u64 = 0x0bad_5eed_1234_5678;

    for &alphabet in &[1u64, 2, 3, 7, 250] {
        for &n in &[0usize, 1, 2, 3, 17, 255, 256, 257, 1024, 3000] {
            let mut data = Vec::with_capacity(n);
            while data.len() < n {
                let v = (lcg_next(&mut seed) >> 33) % alphabet;
                let run = 1 + ((lcg_next(&mut seed) >> 40) % 5) as usize;
                for _ in 0..run.min(n - data.len()) {
                    data.push(v as u8);
                }
            }

            let enc = encode(&data).expect("encode ok");
            let dec = decode(&enc).expect("decode ok");
            assert_eq!(dec.data, data, "alphabet={alphabet} n={n}");
            assert_eq!(dec.consumed, enc.len());
        }
    }
}
