//! Dynamic light effects.

use serde::{Deserialize, Serialize};

/// A continuous effect the bulb runs on its own.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// No effect active.
    #[default]
    None,
    /// Cycle through all hues at the current brightness and saturation.
    Colorloop,
}
