//! Terminal rendering module
//!
//! World-space draw calls are rasterized into a character framebuffer, which
//! is then diffed and flushed to the terminal.

pub mod fb;
pub mod terminal;

pub use fb::{FrameBuffer, Viewport};
pub use terminal::TerminalRenderer;
