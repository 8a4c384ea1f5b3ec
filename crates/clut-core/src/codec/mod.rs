// crates/clut-core/src/codec/mod.rs

pub mod polarity;
pub mod rle;
