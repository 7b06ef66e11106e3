// What you SEE:
// • A dark page covered with a faint grid of dots.
// • Dots around the mouse grow and brighten; a fading trail follows fast movements.
// • Moving the mouse out of the window lets the glow fade away.
// • T toggles dark/light. ESC quits.
// • --snapshot out.png renders headless instead (no window).

use clap::Parser;
use dotfield::cli::Cli;
use dotfield::{snapshot, window, Error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cli.render_config()?;
    let settings = cli.window_settings();

    match &cli.snapshot {
        Some(path) => snapshot::write_snapshot(
            config,
            settings.width as f32,
            settings.height as f32,
            settings.scale,
            cli.frames,
            path,
        ),
        None => window::run(config, settings),
    }
}
