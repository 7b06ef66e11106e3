// Ambient dot-field background.
//
// A full-surface grid of faint dots. Dots near the pointer, and near a short decaying trail of
// recent pointer positions, grow and brighten. Everything runs on one thread, driven by host
// events (pointer, resize, display tick).

pub mod background;
pub mod cli;
pub mod config;
pub mod draw;
pub mod error;
pub mod field;
pub mod host;
pub mod input;
pub mod scheduler;
pub mod snapshot;
pub mod surface;
pub mod types;
pub mod window;

pub use background::{AmbientBackground, RenderContext};
pub use config::RenderConfig;
pub use error::Error;
pub use host::HostEvent;
pub use surface::{DrawContext, Surface};
