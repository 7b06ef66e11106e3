// Core types shared by the surface, the input tracker and the field renderer.

use std::fmt;

/// Packed pixel surface; what the window (or a snapshot) shows.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // backing width in physical pixels
    pub height: usize,     // backing height in physical pixels
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer of `width * height` pixels, all set to `fill`.
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self { width, height, pixels: vec![fill; width * height] }
    }

    /// Reallocate to a new size. Old content is dropped, like a canvas whose width is reassigned.
    pub fn reset(&mut self, width: usize, height: usize, fill: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, fill);
    }

    /// Pixel at (x, y), or None outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

impl fmt::Debug for FrameBuffer {
    // The pixel dump is useless in logs; only the size matters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Straight (non-premultiplied) colour with a fractional alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// One historical pointer position. `age` starts at 1.0 and only ever shrinks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    pub age: f32,
}

/// Current pointer position in logical pixels, or `ABSENT` when no pointer is over the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    /// Far off-surface, so every distance-based glow evaluates to zero.
    pub const ABSENT: Self = Self { x: -1000.0, y: -1000.0 };

    /// Anything left of x = -500 counts as off-surface, not just the exact sentinel.
    pub fn is_present(&self) -> bool {
        self.x > -500.0
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::ABSENT
    }
}

/// Logical (CSS-pixel) size of the surface plus the backing scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceDimensions {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32, // always >= 1
}

impl Default for SurfaceDimensions {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, device_pixel_ratio: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_far_left_counts_as_absent() {
        assert!(!PointerState::ABSENT.is_present());
        assert!(!PointerState { x: -900.0, y: 40.0 }.is_present());
        assert!(PointerState { x: -20.0, y: 40.0 }.is_present());
        assert!(PointerState { x: 0.0, y: 0.0 }.is_present());
    }
}
