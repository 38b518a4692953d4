use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default target speed along the track, units/sec.
pub const DEFAULT_RIDE_SPEED: f32 = 30.0;

/// Persisted ride defaults.
///
/// Missing fields fall back to their defaults, so a config file may list
/// only the options it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideConfig {
    /// Target speed the rider ramps toward, units/sec.
    pub ride_speed: f32,
    /// Keep the track-derived pitch in the view while head tracking is
    /// active instead of leveling it.
    pub preserve_base_pitch_on_head_tracking: bool,
    /// Keep the track-derived roll in the view while head tracking is
    /// active instead of leveling it.
    pub preserve_base_roll_on_head_tracking: bool,
}

impl Default for RideConfig {
    fn default() -> Self {
        Self {
            ride_speed: DEFAULT_RIDE_SPEED,
            preserve_base_pitch_on_head_tracking: false,
            preserve_base_roll_on_head_tracking: false,
        }
    }
}

impl RideConfig {
    /// Loads defaults from a TOML file.
    ///
    /// A missing file is written out with the defaults; an unparsable file
    /// falls back to the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str::<Self>(&content).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "unparsable ride config, using defaults");
                Self::default()
            }),
            Err(_) => {
                let default = Self::default();
                if let Ok(text) = toml::to_string_pretty(&default) {
                    let _ = fs::write(path, text);
                }
                default
            }
        }
    }
}

/// Runtime-settable overrides layered over the persisted defaults.
///
/// An unset field leaves the persisted default in effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RideOverrides {
    pub ride_speed: Option<f32>,
    pub preserve_base_pitch: Option<bool>,
    pub preserve_base_roll: Option<bool>,
}
