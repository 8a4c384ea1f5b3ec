// crates/clut-core/src/config.rs

/// Knobs for a whole conversion run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Replay every packed cell through the simulator after building.
    pub verify: bool,
    /// Pre-fill the idle slots with a waiting sequence of this many frames.
    pub idle_delay: Option<u32>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            verify: true,
            idle_delay: None,
        }
    }
}
