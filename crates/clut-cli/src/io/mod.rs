// crates/clut-cli/src/io/mod.rs

pub mod bin;
