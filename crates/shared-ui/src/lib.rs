pub mod components;
pub mod tone;

pub use components::*;
pub use tone::Tone;
