//! tecla: prints Unicode characters as they are typed, both as rendered
//! glyphs in a small window and as key reports on the console.
//!
//! The tool exists to manually verify two things at once: that the
//! windowing/input layer delivers Unicode text-input events, and that the
//! font layer can rasterize and blit arbitrary glyphs. There is one blocking
//! event loop and no state beyond the currently shown text surface.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod geom;
pub mod render;
pub mod report;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
