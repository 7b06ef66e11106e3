// Lifecycle controller for the ambient dot-field background.
//
// mount():   size the surface, register resize/pointer listeners, arm the frame task.
// handle():  route one host event to the surface manager, input tracker or renderer.
// unmount(): cancel the frame task and drop every listener; later events are ignored.

use crate::config::RenderConfig;
use crate::field;
use crate::host::{EventKind, HostEvent, Listeners};
use crate::input::InputTracker;
use crate::scheduler::FrameTask;
use crate::surface::{self, Surface};
use crate::types::SurfaceDimensions;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Per-mount mutable state, passed by reference to the pieces that need it.
#[derive(Debug)]
pub struct RenderContext {
    pub dimensions: SurfaceDimensions,
    pub input: InputTracker,
    pub frame: FrameTask,
}

#[derive(Debug)]
pub struct AmbientBackground {
    config: RenderConfig,
    ctx: RenderContext,
    listeners: Listeners,
    mounted: bool,
    frames_drawn: u64,
    frames_skipped: u64,
}

impl AmbientBackground {
    /// Attach to `surface` and start the frame loop.
    pub fn mount<S: Surface + ?Sized>(config: RenderConfig, surface: &mut S) -> Self {
        let dimensions = surface::resize(surface);

        let mut listeners = Listeners::default();
        for kind in [EventKind::Resize, EventKind::PointerMove, EventKind::PointerLeave] {
            listeners.subscribe(kind);
        }

        let mut frame = FrameTask::new();
        frame.schedule();

        info!(
            dark = config.is_dark,
            width = dimensions.width,
            height = dimensions.height,
            dpr = dimensions.device_pixel_ratio,
            "background mounted"
        );

        Self {
            config,
            ctx: RenderContext {
                dimensions,
                input: InputTracker::new(config.trail_length, config.trail_decay),
                frame,
            },
            listeners,
            mounted: true,
            frames_drawn: 0,
            frames_skipped: 0,
        }
    }

    pub fn handle<S: Surface + ?Sized>(&mut self, event: HostEvent, surface: &mut S) {
        if !self.mounted {
            trace!(?event, "event after unmount ignored");
            return;
        }
        if let Some(kind) = event.kind() {
            if !self.listeners.is_subscribed(kind) {
                return;
            }
        }

        match event {
            HostEvent::Resize => {
                self.ctx.dimensions = surface::resize(surface);
            }
            HostEvent::PointerMove { x, y } => self.ctx.input.pointer_move(x, y),
            HostEvent::PointerLeave => self.ctx.input.pointer_leave(),
            HostEvent::Frame { now } => {
                if self.ctx.frame.begin_tick() {
                    self.tick(now, surface);
                }
            }
        }
    }

    /// One frame: advance the trail, draw, re-arm. Without a context the frame is a no-op,
    /// but the loop keeps going so drawing resumes once a context exists.
    fn tick<S: Surface + ?Sized>(&mut self, now: Instant, surface: &mut S) {
        match surface.context() {
            Some(draw) => {
                self.ctx.input.advance(now);
                field::render_frame(
                    draw,
                    &self.ctx.dimensions,
                    self.ctx.input.pointer(),
                    self.ctx.input.trail(),
                    &self.config,
                );
                self.frames_drawn += 1;
            }
            None => {
                self.frames_skipped += 1;
                trace!("no drawing context, frame skipped");
            }
        }
        self.ctx.frame.schedule();
    }

    /// Cancel the pending frame and remove all listeners. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.ctx.frame.cancel();
        self.listeners.unsubscribe_all();
        self.mounted = false;
        info!(
            drawn = self.frames_drawn,
            skipped = self.frames_skipped,
            "background unmounted"
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }
}

impl Drop for AmbientBackground {
    fn drop(&mut self) {
        if self.mounted {
            debug!("background dropped while mounted, tearing down");
            self.unmount();
        }
    }
}
