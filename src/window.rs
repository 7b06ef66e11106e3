// Native host: a minifb window standing in for the dashboard page.
// Visual effects provided here:
// 1) A resizable window whose whole area is the dot-field background.
// 2) Moving the mouse over it lights the dots; leaving the window lets the glow fade out.
// 3) T flips dark/light (remount with the other theme). ESC quits.

use crate::background::AmbientBackground;
use crate::config::RenderConfig;
use crate::draw::RasterSurface;
use crate::error::Error;
use crate::host::HostEvent;
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseMode, ScaleMode, Window, WindowOptions};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const TITLE: &str = "dotfield";

/// How the window is opened.
#[derive(Debug, Clone, Copy)]
pub struct WindowSettings {
    /// Logical size
    pub width: usize,
    pub height: usize,
    /// Device pixel ratio; the window is `logical * scale` physical pixels
    pub scale: f32,
    pub fps: usize,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self { width: 1280, height: 720, scale: 1.0, fps: 60 }
    }
}

pub struct HostWindow {
    window: Window,
    dpr: f32,
    size: (usize, usize),           // physical, as last seen
    pointer: Option<(f32, f32)>,    // logical, None when outside
}

impl HostWindow {
    /// Visual: a new window appears, blank until the first frame is presented.
    pub fn new(title: &str, settings: &WindowSettings) -> Result<Self, Error> {
        let dpr = settings.scale.max(1.0);
        let width = (settings.width as f32 * dpr) as usize;
        let height = (settings.height as f32 * dpr) as usize;
        let options = WindowOptions {
            resize: true,
            scale_mode: ScaleMode::UpperLeft,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(settings.fps);
        Ok(Self { window, dpr, size: (width, height), pointer: None })
    }

    pub fn dpr(&self) -> f32 {
        self.dpr
    }

    /// Current window size in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        (self.size.0 as f32 / self.dpr, self.size.1 as f32 / self.dpr)
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    pub fn t_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::T, KeyRepeat::No)
    }

    /// Turn window state changes since the last call into host events.
    pub fn poll(&mut self, surface: &mut RasterSurface, out: &mut Vec<HostEvent>) {
        let size = self.window.get_size();
        if size != self.size {
            self.size = size;
            let (w, h) = self.logical_size();
            surface.set_viewport(w, h);
            out.push(HostEvent::Resize);
        }

        let pointer = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x / self.dpr, y / self.dpr));
        out.extend(pointer_transition(self.pointer, pointer));
        self.pointer = pointer;
    }

    /// Visual: the window shows the frame that was just drawn.
    pub fn present(&mut self, frame: Option<&FrameBuffer>) -> Result<(), Error> {
        match frame {
            Some(fb) if fb.width > 0 && fb.height > 0 => self
                .window
                .update_with_buffer(&fb.pixels, fb.width, fb.height)
                .map_err(|e| Error::WindowUpdate(e.to_string())),
            // Nothing to show (minimised or no context): keep pumping window events.
            _ => {
                self.window.update();
                Ok(())
            }
        }
    }
}

/// Event for a pointer that was at `prev` and is now at `next` (None = outside the window).
fn pointer_transition(prev: Option<(f32, f32)>, next: Option<(f32, f32)>) -> Option<HostEvent> {
    match (prev, next) {
        (_, Some((x, y))) if prev != next => Some(HostEvent::PointerMove { x, y }),
        (Some(_), None) => Some(HostEvent::PointerLeave),
        _ => None,
    }
}

/// Open the window and run the background until the window closes or ESC is pressed.
pub fn run(mut config: RenderConfig, settings: WindowSettings) -> Result<(), Error> {
    let mut host = HostWindow::new(TITLE, &settings)?;
    let (w, h) = host.logical_size();
    let mut surface = RasterSurface::new(w, h, host.dpr(), config.palette().page);
    let mut background = AmbientBackground::mount(config, &mut surface);

    let mut events = Vec::new();
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    while host.is_open() && !host.esc_pressed() {
        let now = Instant::now();

        if host.t_pressed_once() {
            background.unmount();
            config.is_dark = !config.is_dark;
            surface.set_page_color(config.palette().page);
            background = AmbientBackground::mount(config, &mut surface);
            info!(dark = config.is_dark, "theme switched");
        }

        host.poll(&mut surface, &mut events);
        for event in events.drain(..) {
            background.handle(event, &mut surface);
        }
        background.handle(HostEvent::Frame { now }, &mut surface);

        host.present(surface.frame())?;

        frames_this_second += 1;
        let elapsed = now.duration_since(last_fps_time);
        if elapsed >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / elapsed.as_secs_f32();
            let trail = background.context().input.trail().len();
            debug!(fps, trail, "frame rate");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    background.unmount();
    Ok(())
}
