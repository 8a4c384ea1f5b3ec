pub mod config;
pub mod error;
pub mod validate;

pub mod clut;
pub mod codec;
pub mod sim;
pub mod waveform;
pub mod wbf;

pub use crate::clut::{convert, ClutBand, ClutFile};
pub use crate::config::ConvertConfig;
pub use crate::error::{ClutError, Result};
pub use crate::waveform::mode::{LutMode, SourceMode};
pub use crate::waveform::Waveform;
pub use crate::wbf::WbfFile;
