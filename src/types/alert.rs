//! Alert effects.

use serde::{Deserialize, Serialize};

/// A temporary change to the bulb's state, used to make a light identify
/// itself.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alert {
    /// No alert active.
    #[default]
    None,
    /// A single breathe cycle.
    Select,
    /// Repeated breathe cycles for several seconds.
    LSelect,
}
