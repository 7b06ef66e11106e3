// Headless rendering: run the background against an off-screen raster and save a PNG.
// Visual: the saved image shows the dot field with a glowing pointer trail sweeping across it.

use crate::background::AmbientBackground;
use crate::config::RenderConfig;
use crate::draw::RasterSurface;
use crate::error::Error;
use crate::host::HostEvent;
use crate::types::FrameBuffer;
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// One display tick at 60 Hz.
const TICK: Duration = Duration::from_millis(16);

/// Scripted pointer position for frame `i` of `frames`: a gentle S-curve left to right.
pub fn sweep_position(i: usize, frames: usize, width: f32, height: f32) -> (f32, f32) {
    let t = if frames <= 1 { 1.0 } else { i as f32 / (frames - 1) as f32 };
    let x = width * (0.15 + 0.7 * t);
    let y = height * (0.5 + 0.2 * (t * std::f32::consts::TAU).sin());
    (x, y)
}

/// Render `frames` ticks with the pointer sweep and return the final frame.
pub fn render_frames(
    config: RenderConfig,
    width: f32,
    height: f32,
    dpr: f32,
    frames: usize,
) -> FrameBuffer {
    let mut surface = RasterSurface::new(width, height, dpr, config.palette().page);
    let mut bg = AmbientBackground::mount(config, &mut surface);

    let t0 = Instant::now();
    for i in 0..frames {
        let (x, y) = sweep_position(i, frames, width, height);
        bg.handle(HostEvent::PointerMove { x, y }, &mut surface);
        bg.handle(HostEvent::Frame { now: t0 + TICK * i as u32 }, &mut surface);
    }
    bg.unmount();

    surface.frame().cloned().unwrap_or_else(|| FrameBuffer::new(0, 0, 0))
}

/// Repack 0x00RRGGBB pixels as an RGB image.
pub fn to_image(frame: &FrameBuffer) -> RgbImage {
    ImageBuffer::from_fn(frame.width as u32, frame.height as u32, |x, y| {
        let px = frame.pixels[y as usize * frame.width + x as usize];
        Rgb([((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8])
    })
}

pub fn write_snapshot(
    config: RenderConfig,
    width: f32,
    height: f32,
    dpr: f32,
    frames: usize,
    path: &Path,
) -> Result<(), Error> {
    let frame = render_frames(config, width, height, dpr, frames);
    to_image(&frame).save(path)?;
    info!(?path, frames, width = frame.width, height = frame.height, "snapshot written");
    Ok(())
}
