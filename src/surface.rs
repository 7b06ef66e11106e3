// Surface manager: keeps the backing pixel buffer in step with the viewport.
//
// Drawing is issued in logical pixels; the backing buffer is `logical * dpr` physical pixels and a
// uniform `dpr` scale maps one onto the other.

use crate::types::{Rgba, SurfaceDimensions};
use tracing::debug;

/// The handful of 2D drawing calls the field renderer needs.
pub trait DrawContext {
    /// Replace the current transform with a uniform scale.
    fn set_scale(&mut self, scale: f32);
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);
}

/// A drawing surface owned by the host.
pub trait Surface {
    /// Current bounding box in logical pixels.
    fn bounding_box(&self) -> (f32, f32);
    fn device_pixel_ratio(&self) -> f32;
    /// Reallocate the backing store. Resets any transform, like assigning canvas width/height.
    fn set_backing_size(&mut self, width: usize, height: usize);
    /// None while the host cannot hand out a drawing context; rendering is disabled until it can.
    fn context(&mut self) -> Option<&mut dyn DrawContext>;
}

/// Measure the surface, size its backing buffer and set the logical-to-physical scale.
///
/// Never fails: a zero-sized box yields a zero-sized buffer that the next resize corrects.
pub fn resize<S: Surface + ?Sized>(surface: &mut S) -> SurfaceDimensions {
    let dpr = sanitize_dpr(surface.device_pixel_ratio());
    let (width, height) = surface.bounding_box();
    let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    let height = if height.is_finite() { height.max(0.0) } else { 0.0 };

    // Truncation matches how a canvas stores fractional sizes.
    let backing_w = (width * dpr) as usize;
    let backing_h = (height * dpr) as usize;
    surface.set_backing_size(backing_w, backing_h);

    match surface.context() {
        Some(ctx) => ctx.set_scale(dpr),
        None => debug!("resize: no drawing context yet, rendering stays disabled"),
    }

    debug!(width, height, dpr, backing_w, backing_h, "surface resized");
    SurfaceDimensions { width, height, device_pixel_ratio: dpr }
}

fn sanitize_dpr(dpr: f32) -> f32 {
    if dpr.is_finite() && dpr >= 1.0 { dpr } else { 1.0 }
}
