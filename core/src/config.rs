use std::path::PathBuf;

use crate::constants::{DEFAULT_DRAWN_COLOR, DEFAULT_UNDRAWN_COLOR, MIN_SPEED_MODIFIER};

/// # Quirks
/// Historical interpreters disagree on a handful of instructions.
/// Each flag selects the alternative behavior; all are off by default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6 / 8XYE shift Vy into Vx instead of shifting Vx in place.
    pub shift_uses_vy: bool,
    /// BNNN jumps to NNN + Vx (X being the top nibble of NNN) instead of NNN + V0.
    pub jump_uses_vx: bool,
    /// FX55 / FX65 leave I pointing just past the block they copied.
    pub increment_index: bool,
}

/// Session settings. These survive ROM loads and are never written to save states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub quirks: Quirks,
    /// Multiplies the number of cycles run per tick.
    pub speed_modifier: u8,
    /// ARGB color of lit pixels.
    pub drawn_color: u32,
    /// ARGB color of unlit pixels.
    pub undrawn_color: u32,
    /// Directory save states are written to and read from.
    pub save_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quirks: Quirks::default(),
            speed_modifier: MIN_SPEED_MODIFIER,
            drawn_color: DEFAULT_DRAWN_COLOR,
            undrawn_color: DEFAULT_UNDRAWN_COLOR,
            save_dir: PathBuf::from("saves"),
        }
    }
}
