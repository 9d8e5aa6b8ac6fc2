// UniAIMS - core/canvas.rs
//
// Pan/zoom view transform for the interactive SEM canvas, plus the static
// mock overlays drawn on top of the placeholder image.
//
// The transform is `translate(offset) scale(scale)` about the top-left corner
// of the content block. Zoom is not anchored to the cursor, so zooming always
// grows the content from that corner. Offsets are unconstrained: content can
// be dragged fully out of the viewport.
//
// Core layer: pure logic, no UI dependencies. The UI converts egui positions
// into `Point` before calling in.

use crate::util::constants::{
    CANVAS_CONTENT_HEIGHT, CANVAS_CONTENT_WIDTH, MAX_CANVAS_SCALE, MIN_CANVAS_SCALE,
    WHEEL_ZOOM_STEP,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::{Add, Sub};

/// A 2D position or translation in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// =============================================================================
// View transform
// =============================================================================

/// Pan/zoom state of one canvas mount. `Default` is the identity transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Zoom factor, always within `[MIN_CANVAS_SCALE, MAX_CANVAS_SCALE]`.
    scale: f32,

    /// Translation of the content's top-left corner in viewport pixels.
    offset: Point,

    dragging: bool,

    /// Pointer position minus offset, captured at pointer-down.
    start_pan: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
            dragging: false,
            start_pan: Point::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Zoom percentage shown in the canvas badge, e.g. `100` at identity.
    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// Handle a wheel event. Only zooms while the modifier key is held;
    /// returns true when the event was consumed as a zoom.
    pub fn zoom(&mut self, wheel_delta_y: f32, modifier_held: bool) -> bool {
        if !modifier_held || !wheel_delta_y.is_finite() {
            return false;
        }
        self.scale =
            (self.scale - wheel_delta_y * WHEEL_ZOOM_STEP).clamp(MIN_CANVAS_SCALE, MAX_CANVAS_SCALE);
        true
    }

    /// Begin a drag at `pointer`.
    pub fn pointer_down(&mut self, pointer: Point) {
        self.dragging = true;
        self.start_pan = pointer - self.offset;
    }

    /// Follow the pointer while dragging; ignored otherwise.
    pub fn pointer_move(&mut self, pointer: Point) {
        if !self.dragging {
            return;
        }
        self.offset = pointer - self.start_pan;
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Leaving the viewport ends the drag exactly like releasing the button.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Back to identity (used when the canvas is mounted again).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Map a content-space point to viewport coordinates.
    pub fn content_to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.scale, p.y * self.scale) + self.offset
    }

    /// Map a viewport point back into content space.
    pub fn screen_to_content(&self, p: Point) -> Point {
        let local = p - self.offset;
        Point::new(local.x / self.scale, local.y / self.scale)
    }

    /// Size of the content block on screen at the current scale.
    pub fn content_screen_size(&self) -> Point {
        Point::new(
            CANVAS_CONTENT_WIDTH * self.scale,
            CANVAS_CONTENT_HEIGHT * self.scale,
        )
    }
}

// =============================================================================
// Mock overlays
// =============================================================================

/// A detected particle drawn as a circle outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleMark {
    pub id: usize,
    /// Top-left of the bounding box, matching how the overlay is positioned.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl ParticleMark {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.radius, self.y + self.radius)
    }

    fn contains(&self, p: Point) -> bool {
        let c = self.center();
        let (dx, dy) = (p.x - c.x, p.y - c.y);
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// A detected fiber drawn as a polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct FiberMark {
    pub id: usize,
    pub points: Vec<Point>,
    pub width: f32,
}

/// The static set of overlay shapes for one canvas.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MockOverlay {
    pub particles: Vec<ParticleMark>,
    pub fibers: Vec<FiberMark>,
}

impl MockOverlay {
    /// `count` particles with x in [0, 800), y in [0, 600), radius in [5, 25).
    pub fn particles(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..count)
            .map(|id| ParticleMark {
                id,
                x: rng.random_range(0.0..800.0),
                y: rng.random_range(0.0..600.0),
                radius: rng.random_range(5.0..25.0),
            })
            .collect();
        Self {
            particles,
            fibers: Vec::new(),
        }
    }

    /// `count` gently curving fibers crossing the content block.
    pub fn fibers(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let fibers = (0..count)
            .map(|id| {
                let mut p = Point::new(
                    rng.random_range(0.0..CANVAS_CONTENT_WIDTH),
                    rng.random_range(0.0..CANVAS_CONTENT_HEIGHT),
                );
                let mut angle: f32 = rng.random_range(0.0..std::f32::consts::TAU);
                let segments = rng.random_range(4..9);
                let mut points = Vec::with_capacity(segments + 1);
                points.push(p);
                for _ in 0..segments {
                    angle += rng.random_range(-0.35..0.35);
                    let step = rng.random_range(30.0..70.0);
                    p = Point::new(p.x + angle.cos() * step, p.y + angle.sin() * step);
                    points.push(p);
                }
                FiberMark {
                    id,
                    points,
                    width: rng.random_range(1.5..4.0),
                }
            })
            .collect();
        Self {
            particles: Vec::new(),
            fibers,
        }
    }

    /// Id of the topmost particle under a content-space point.
    pub fn hit_test(&self, content_point: Point) -> Option<usize> {
        self.particles
            .iter()
            .rev()
            .find(|p| p.contains(content_point))
            .map(|p| p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let t = ViewTransform::default();
        assert_eq!(t.scale(), 1.0);
        assert_eq!(t.offset(), Point::ZERO);
        assert_eq!(t.scale_percent(), 100);
    }

    #[test]
    fn test_zoom_requires_modifier() {
        let mut t = ViewTransform::default();
        assert!(!t.zoom(-50.0, false));
        assert_eq!(t.scale(), 1.0);
        assert!(t.zoom(-50.0, true));
        assert!((t.scale() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_clamps_for_any_delta() {
        let deltas = [-1e9, -10_000.0, -300.0, -1.0, 0.0, 1.0, 45.0, 300.0, 1e9];
        for start in [-400.0, 0.0, 400.0] {
            for delta in deltas {
                let mut t = ViewTransform::default();
                t.zoom(start, true);
                t.zoom(delta, true);
                assert!(
                    (MIN_CANVAS_SCALE..=MAX_CANVAS_SCALE).contains(&t.scale()),
                    "scale {} out of range after {start} then {delta}",
                    t.scale()
                );
            }
        }
        let mut t = ViewTransform::default();
        t.zoom(1e9, true);
        assert_eq!(t.scale(), MIN_CANVAS_SCALE);
        t.zoom(-1e9, true);
        assert_eq!(t.scale(), MAX_CANVAS_SCALE);
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let mut t = ViewTransform::default();
        assert!(!t.zoom(f32::NAN, true));
        assert_eq!(t.scale(), 1.0);
    }

    #[test]
    fn test_pan_follows_pointer() {
        let mut t = ViewTransform::default();
        t.pointer_down(Point::new(100.0, 100.0));
        t.pointer_move(Point::new(130.0, 90.0));
        assert_eq!(t.offset(), Point::new(30.0, -10.0));

        // A second drag continues from the current offset.
        t.pointer_up();
        t.pointer_down(Point::new(0.0, 0.0));
        t.pointer_move(Point::new(5.0, 5.0));
        assert_eq!(t.offset(), Point::new(35.0, -5.0));
    }

    #[test]
    fn test_no_drift_after_release() {
        let mut t = ViewTransform::default();
        t.pointer_down(Point::new(10.0, 10.0));
        t.pointer_move(Point::new(40.0, 25.0));
        t.pointer_move(Point::new(-200.0, 900.0));
        let before = t.offset();
        t.pointer_up();
        assert_eq!(t.offset(), before);
        t.pointer_move(Point::new(500.0, 500.0));
        assert_eq!(t.offset(), before);

        t.pointer_down(Point::new(0.0, 0.0));
        t.pointer_move(Point::new(3.0, 4.0));
        let before = t.offset();
        t.pointer_leave();
        t.pointer_move(Point::new(99.0, 99.0));
        assert_eq!(t.offset(), before);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut t = ViewTransform::default();
        t.pointer_move(Point::new(50.0, 50.0));
        assert_eq!(t.offset(), Point::ZERO);
    }

    #[test]
    fn test_zoom_anchors_top_left() {
        let mut t = ViewTransform::default();
        t.pointer_down(Point::ZERO);
        t.pointer_move(Point::new(10.0, 20.0));
        t.pointer_up();
        t.zoom(-100.0, true);
        // The content origin stays put while everything else scales away from it.
        assert_eq!(t.content_to_screen(Point::ZERO), Point::new(10.0, 20.0));
        assert_eq!(t.content_to_screen(Point::new(10.0, 0.0)), Point::new(30.0, 20.0));
        let back = t.screen_to_content(Point::new(30.0, 20.0));
        assert!((back.x - 10.0).abs() < 1e-4 && back.y.abs() < 1e-4);
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut t = ViewTransform::default();
        t.zoom(-100.0, true);
        t.pointer_down(Point::new(1.0, 1.0));
        t.reset();
        assert_eq!(t, ViewTransform::default());
    }

    #[test]
    fn test_overlay_is_deterministic_and_in_range() {
        let a = MockOverlay::particles(20, 7);
        let b = MockOverlay::particles(20, 7);
        assert_eq!(a, b);
        assert_eq!(a.particles.len(), 20);
        for p in &a.particles {
            assert!((0.0..800.0).contains(&p.x));
            assert!((0.0..600.0).contains(&p.y));
            assert!((5.0..25.0).contains(&p.radius));
        }
    }

    #[test]
    fn test_hit_test_finds_particle_center() {
        let overlay = MockOverlay::particles(5, 42);
        let target = overlay.particles[2];
        let hit = overlay.hit_test(target.center());
        assert!(hit.is_some());
        assert_eq!(overlay.hit_test(Point::new(-100.0, -100.0)), None);
    }

    #[test]
    fn test_fibers_have_polylines() {
        let overlay = MockOverlay::fibers(3, 1);
        assert_eq!(overlay.fibers.len(), 3);
        assert!(overlay.fibers.iter().all(|f| f.points.len() >= 5));
    }
}
