// Field renderer: a grid of dots whose size and alpha follow a glow field.
//
// The glow at a grid point is the strongest single contribution from the live pointer or any
// trail point. Contributions are never summed, so a dense trail cannot saturate.

use crate::config::RenderConfig;
use crate::surface::DrawContext;
use crate::types::{PointerState, Rgba, SurfaceDimensions, TrailPoint};
use std::collections::VecDeque;

/// Below this the dot is drawn at rest.
pub const GLOW_THRESHOLD: f32 = 0.005;
/// Extra radius (logical px) per unit of glow.
pub const GLOW_SIZE_GAIN: f32 = 1.2;

/// Linear falloff: 1 at the centre, 0 at `radius` and beyond.
#[inline]
fn falloff(dx: f32, dy: f32, radius: f32) -> f32 {
    let d2 = dx * dx + dy * dy;
    if d2 >= radius * radius {
        return 0.0;
    }
    (1.0 - d2.sqrt() / radius).max(0.0)
}

/// Strongest trail contribution at (x, y). Older points reach less far and shine less.
pub fn trail_glow<'a>(
    x: f32,
    y: f32,
    trail: impl IntoIterator<Item = &'a TrailPoint>,
    config: &RenderConfig,
) -> f32 {
    let mut strongest = 0.0f32;
    for point in trail {
        let radius = config.glow_radius * (0.4 + 0.6 * point.age);
        let glow = falloff(x - point.x, y - point.y, radius) * config.glow_intensity * point.age;
        strongest = strongest.max(glow);
    }
    strongest
}

/// Live pointer contribution at (x, y): full radius, no age term.
pub fn pointer_glow(x: f32, y: f32, pointer: PointerState, config: &RenderConfig) -> f32 {
    falloff(x - pointer.x, y - pointer.y, config.glow_radius) * config.glow_intensity
}

/// Glow field value at (x, y), in [0, glow_intensity].
pub fn glow_at<'a>(
    x: f32,
    y: f32,
    pointer: PointerState,
    trail: impl IntoIterator<Item = &'a TrailPoint>,
    config: &RenderConfig,
) -> f32 {
    trail_glow(x, y, trail, config).max(pointer_glow(x, y, pointer, config))
}

/// What to draw at one grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Rgba,
}

/// Map a glow value to a dot. Resting dots and glowing dots share the palette's base alpha.
pub fn dot_for(x: f32, y: f32, intensity: f32, config: &RenderConfig) -> Dot {
    let palette = config.palette();
    if intensity > GLOW_THRESHOLD {
        Dot {
            x,
            y,
            radius: config.dot_size + intensity * GLOW_SIZE_GAIN,
            color: palette.ink_with_alpha(palette.base_alpha + intensity * palette.glow_alpha_scale),
        }
    } else {
        Dot { x, y, radius: config.dot_size, color: palette.ink_with_alpha(palette.base_alpha) }
    }
}

/// Grid points covering `width` x `height`, spaced `spacing` apart and offset by half a spacing
/// so the dots sit centred in their cells. Column-major, like the drawing order.
pub fn grid_points(width: f32, height: f32, spacing: f32) -> impl Iterator<Item = (f32, f32)> {
    let half = spacing / 2.0;
    let count = |extent: f32| -> usize {
        if !(spacing > 0.0) || !(extent > half) {
            0
        } else {
            ((extent - half) / spacing).ceil() as usize
        }
    };
    let (cols, rows) = (count(width), count(height));
    (0..cols).flat_map(move |i| {
        let x = half + i as f32 * spacing;
        (0..rows).map(move |j| (x, half + j as f32 * spacing))
    })
}

/// Draw one frame: clear, then one dot per grid point.
pub fn render_frame(
    ctx: &mut dyn DrawContext,
    dims: &SurfaceDimensions,
    pointer: PointerState,
    trail: &VecDeque<TrailPoint>,
    config: &RenderConfig,
) -> usize {
    ctx.clear_rect(0.0, 0.0, dims.width, dims.height);

    let mut drawn = 0;
    for (x, y) in grid_points(dims.width, dims.height, config.dot_spacing) {
        let intensity = glow_at(x, y, pointer, trail, config);
        let dot = dot_for(x, y, intensity, config);
        ctx.fill_circle(dot.x, dot.y, dot.radius, dot.color);
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::tests::Recorder;
    use proptest::prelude::*;

    fn cfg() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn grid_starts_at_half_spacing() {
        let pts: Vec<_> = grid_points(72.0, 48.0, 24.0).collect();
        assert_eq!(
            pts,
            vec![(12.0, 12.0), (12.0, 36.0), (36.0, 12.0), (36.0, 36.0), (60.0, 12.0), (60.0, 36.0)]
        );
    }

    #[test]
    fn grid_excludes_points_on_the_far_edge() {
        // Only x < width is kept.
        let xs: Vec<f32> = grid_points(36.0, 13.0, 24.0).map(|(x, _)| x).collect();
        assert_eq!(xs, vec![12.0]);
        assert_eq!(grid_points(0.0, 100.0, 24.0).count(), 0);
        assert_eq!(grid_points(12.0, 100.0, 24.0).count(), 0);
    }

    #[test]
    fn pointer_glow_is_full_at_center_and_zero_at_radius() {
        let c = cfg();
        let p = PointerState { x: 100.0, y: 100.0 };
        assert!((pointer_glow(100.0, 100.0, p, &c) - 0.3).abs() < 1e-6);
        assert!((pointer_glow(160.0, 100.0, p, &c) - 0.15).abs() < 1e-6);
        assert_eq!(pointer_glow(220.0, 100.0, p, &c), 0.0);
        assert_eq!(pointer_glow(500.0, 500.0, p, &c), 0.0);
    }

    #[test]
    fn trail_radius_shrinks_with_age() {
        let c = cfg();
        let young = TrailPoint { x: 0.0, y: 0.0, age: 1.0 };
        let old = TrailPoint { x: 0.0, y: 0.0, age: 0.5 };
        // Old radius = 120 * (0.4 + 0.3) = 84.
        assert!(trail_glow(90.0, 0.0, [&young], &c) > 0.0);
        assert_eq!(trail_glow(90.0, 0.0, [&old], &c), 0.0);
        // At the centre only the age term scales it.
        assert!((trail_glow(0.0, 0.0, [&old], &c) - 0.15).abs() < 1e-6);
    }

    #[test]
    fn trail_takes_the_max_not_the_sum() {
        let c = cfg();
        let p = TrailPoint { x: 50.0, y: 50.0, age: 1.0 };
        let many = vec![p; 20];
        assert_eq!(trail_glow(50.0, 50.0, &many, &c), trail_glow(50.0, 50.0, [&p], &c));
    }

    #[test]
    fn absent_pointer_and_empty_trail_gives_resting_dots_everywhere() {
        let c = cfg();
        let dims = SurfaceDimensions { width: 1920.0, height: 1080.0, device_pixel_ratio: 1.0 };
        let mut rec = Recorder::default();
        let drawn = render_frame(&mut rec, &dims, PointerState::ABSENT, &VecDeque::new(), &c);
        assert_eq!(rec.clears, 1);
        assert_eq!(drawn, 80 * 45);
        assert_eq!(rec.circles.len(), drawn);
        for (_, _, r, color) in &rec.circles {
            assert_eq!(*r, 1.0);
            assert_eq!(*color, Rgba::new(255, 255, 255, 0.08));
        }
    }

    #[test]
    fn glowing_dot_grows_and_brightens() {
        let dark = cfg();
        let dot = dot_for(0.0, 0.0, 0.3, &dark);
        assert!((dot.radius - 1.36).abs() < 1e-6);
        assert!((dot.color.a - (0.08 + 0.3 * 0.35)).abs() < 1e-6);
        assert_eq!((dot.color.r, dot.color.g, dot.color.b), (255, 255, 255));

        let light = RenderConfig { is_dark: false, ..cfg() };
        let dot = dot_for(0.0, 0.0, 0.2, &light);
        assert!((dot.color.a - (0.06 + 0.2 * 0.25)).abs() < 1e-6);
        assert_eq!((dot.color.r, dot.color.g, dot.color.b), (0, 0, 0));
    }

    #[test]
    fn intensity_at_threshold_stays_at_rest() {
        let c = cfg();
        assert_eq!(dot_for(0.0, 0.0, GLOW_THRESHOLD, &c).radius, c.dot_size);
        assert!(dot_for(0.0, 0.0, GLOW_THRESHOLD + 0.001, &c).radius > c.dot_size);
    }

    #[test]
    fn dots_near_pointer_glow() {
        let c = cfg();
        let dims = SurfaceDimensions { width: 240.0, height: 240.0, device_pixel_ratio: 1.0 };
        let mut rec = Recorder::default();
        render_frame(&mut rec, &dims, PointerState { x: 12.0, y: 12.0 }, &VecDeque::new(), &c);
        let (x, y, r, _) = rec.circles[0];
        assert_eq!((x, y), (12.0, 12.0));
        assert!((r - (1.0 + 0.3 * GLOW_SIZE_GAIN)).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn glow_is_bounded_by_intensity(
            x in -500f32..2500.0,
            y in -500f32..2500.0,
            px in -1000f32..2500.0,
            py in -1000f32..2500.0,
            glow_radius in 1f32..400.0,
            glow_intensity in 0f32..=1.0,
            trail in proptest::collection::vec((-100f32..2500.0, -100f32..2500.0, 0.0101f32..=1.0), 0..30),
        ) {
            let c = RenderConfig { glow_radius, glow_intensity, ..RenderConfig::default() };
            let trail: Vec<TrailPoint> =
                trail.into_iter().map(|(x, y, age)| TrailPoint { x, y, age }).collect();
            let g = glow_at(x, y, PointerState { x: px, y: py }, &trail, &c);
            prop_assert!(g >= 0.0);
            prop_assert!(g <= glow_intensity);
        }
    }
}
