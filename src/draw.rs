// Software drawing onto a 0x00RRGGBB frame buffer.
// Visual effects provided here:
// 1) The page colour showing through wherever the layer is cleared.
// 2) Soft-edged round dots alpha-blended over it (the dot field).

use crate::surface::{DrawContext, Surface};
use crate::types::{FrameBuffer, Rgba};

/// A raster drawing context: the frame buffer plus the current scale transform.
pub struct RasterContext {
    pub frame: FrameBuffer,
    scale: f32,
    page: u32, // what "transparent" looks like on this host
}

impl RasterContext {
    pub fn new(width: usize, height: usize, page: u32) -> Self {
        Self { frame: FrameBuffer::new(width, height, page), scale: 1.0, page }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl DrawContext for RasterContext {
    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Visual: the rectangle shows the bare page again.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let s = self.scale;
        let x0 = clamp_index(x * s, self.frame.width);
        let y0 = clamp_index(y * s, self.frame.height);
        let x1 = clamp_index((x + width) * s, self.frame.width);
        let y1 = clamp_index((y + height) * s, self.frame.height);
        if x1 <= x0 {
            return;
        }
        for row in y0..y1 {
            let start = row * self.frame.width;
            self.frame.pixels[start + x0..start + x1].fill(self.page);
        }
    }

    /// Visual: a round dot; edge pixels are partially covered, so dots stay smooth even at 1px.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        let s = self.scale;
        fill_circle_px(&mut self.frame, cx * s, cy * s, radius * s, color);
    }
}

/// Logical-size viewport backed by a raster context. Used by the window and by snapshots.
pub struct RasterSurface {
    logical: (f32, f32),
    dpr: f32,
    page: u32,
    context: Option<RasterContext>,
}

impl RasterSurface {
    pub fn new(width: f32, height: f32, dpr: f32, page: u32) -> Self {
        Self { logical: (width, height), dpr, page, context: Some(RasterContext::new(0, 0, page)) }
    }

    /// The host viewport changed size; takes effect on the next resize().
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.logical = (width, height);
    }

    /// Theme change: new page colour for subsequent clears.
    pub fn set_page_color(&mut self, page: u32) {
        self.page = page;
        if let Some(ctx) = &mut self.context {
            ctx.page = page;
        }
    }

    /// What to present; None while no context exists.
    pub fn frame(&self) -> Option<&FrameBuffer> {
        self.context.as_ref().map(|c| &c.frame)
    }
}

impl Surface for RasterSurface {
    fn bounding_box(&self) -> (f32, f32) {
        self.logical
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }

    fn set_backing_size(&mut self, width: usize, height: usize) {
        let page = self.page;
        let ctx = self.context.get_or_insert_with(|| RasterContext::new(0, 0, page));
        ctx.frame.reset(width, height, page);
        ctx.scale = 1.0;
    }

    fn context(&mut self) -> Option<&mut dyn DrawContext> {
        self.context.as_mut().map(|c| c as &mut dyn DrawContext)
    }
}

/* ---------- Pixel helpers ---------- */

#[inline]
fn clamp_index(v: f32, len: usize) -> usize {
    if v.is_nan() || v <= 0.0 {
        0
    } else {
        (v as usize).min(len)
    }
}

/// Blend `color` over the packed pixel with effective opacity `alpha`.
/// Visual: the pixel moves towards `color` by `alpha` (0 = unchanged, 1 = replaced).
#[inline]
fn blend_over(dst: u32, color: Rgba, alpha: f32) -> u32 {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |d: u32, s: u8| -> u32 {
        let d = d as f32;
        (d + (s as f32 - d) * a).round().clamp(0.0, 255.0) as u32
    };
    let r = mix((dst >> 16) & 0xFF, color.r);
    let g = mix((dst >> 8) & 0xFF, color.g);
    let b = mix(dst & 0xFF, color.b);
    (r << 16) | (g << 8) | b
}

/// Filled circle in physical pixels with a one-pixel coverage ramp at the edge.
fn fill_circle_px(fb: &mut FrameBuffer, cx: f32, cy: f32, radius: f32, color: Rgba) {
    if !(radius > 0.0) || color.a <= 0.0 || fb.width == 0 || fb.height == 0 {
        return;
    }
    if !(cx.is_finite() && cy.is_finite()) {
        return;
    }

    // Scan just the bounding box (dots are small).
    let x0 = clamp_index((cx - radius - 1.0).floor(), fb.width);
    let y0 = clamp_index((cy - radius - 1.0).floor(), fb.height);
    let x1 = clamp_index((cx + radius + 1.0).ceil(), fb.width);
    let y1 = clamp_index((cy + radius + 1.0).ceil(), fb.height);

    for y in y0..y1 {
        let py = y as f32 + 0.5 - cy;
        for x in x0..x1 {
            let px = x as f32 + 0.5 - cx;
            let d = (px * px + py * py).sqrt();
            let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let idx = y * fb.width + x;
            fb.pixels[idx] = blend_over(fb.pixels[idx], color, color.a * coverage);
        }
    }
}
