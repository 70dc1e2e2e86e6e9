mod candles;
mod color_mode;
mod dial;
mod renderer;
mod theme;
mod week_strip;

pub use color_mode::ColorMode;
pub use renderer::{RenderOptions, Renderer};
