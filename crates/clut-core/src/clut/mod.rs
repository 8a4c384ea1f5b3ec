// crates/clut-core/src/clut/mod.rs

pub mod band;
pub mod build;
pub mod file;

pub use band::ClutBand;
pub use build::{build_band, convert};
pub use file::ClutFile;
