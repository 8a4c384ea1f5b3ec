// crates/clut-cli/src/cmd/mod.rs

pub mod clut_info;
pub mod convert;
pub mod dump;
pub mod inspect;
pub mod sim;
