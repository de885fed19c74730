//! Value types for light control parameters.

mod alert;
mod color;
mod color_mode;
mod effect;
mod saturation;

pub use alert::Alert;
pub use color::{NamedColor, random_color, random_white};
pub use color_mode::ColorMode;
pub use effect::Effect;
pub use saturation::Saturation;
