// Crate error type. Every variant states *where* things went wrong.
// Rendering itself never fails: a frame without a drawing target is skipped, not reported.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing the frame buffer to the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// A tuning parameter is out of range
    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Could not read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Encoding or writing a headless snapshot failed
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] image::ImageError),
}
