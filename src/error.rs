use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong, setup phase or per event. Call sites decide
/// whether a variant is fatal (propagated to `main`, exit code 2) or
/// reported and survived.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("couldn't initialize the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("couldn't create the window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("no usable font file among the configured candidates")]
    NoFont,

    #[error("couldn't load {size}pt font from {}: {reason}", .path.display())]
    FontOpen {
        path: PathBuf,
        size: f32,
        reason: String,
    },

    #[error("couldn't render text: {0}")]
    Render(String),

    #[error("couldn't set up the display surface: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),

    #[error("couldn't blit text to display: {0}")]
    Blit(String),
}
