use std::io;
use thiserror::Error;

/// An error that occurs while writing a plot or a data file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlotError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("could not find an unused file name in `{0}` after {1} attempts")]
    NameExhausted(String, usize),

    #[cfg(feature = "png")]
    #[error("drawing failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[cfg(feature = "png")]
    #[error("could not encode png: {0}")]
    Png(#[from] cairo::IoError),
}
