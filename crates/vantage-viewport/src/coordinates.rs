//! Coordinate space conversions
//!
//! Spaces, from scene to screen:
//!
//! - **World**: homogeneous scene coordinates (`[x, y, z, w]`).
//! - **View**: aspect-corrected, surface-independent; the viewport spans
//!   -aspect..+aspect on each axis.
//! - **Normalized viewport**: 0..1 across the viewport.
//! - **Viewport**: pixels relative to the viewport origin, pixel centers.
//! - **Normalized display**: 0..1 across the whole surface.
//! - **Display**: surface pixels, origin at the bottom-left, pixel edges.
//! - **Local display**: display pixels with the origin at the top-left.
//!
//! Display pixel `i` corresponds to normalized display `(i + 0.5) / size`.
//!
//! `SpaceTransform` is a snapshot of everything the conversions depend on, so
//! each conversion is a pure function of its input.

use crate::types::{round_pixel, PixelSize, Point2, Point3, Point4, ViewportRect};

/// Snapshot of surface size, viewport rectangle and aspect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceTransform {
    /// Surface size in pixels
    pub surface_size: PixelSize,

    /// Viewport rectangle in normalized display coordinates
    pub viewport: ViewportRect,

    /// View-space scale factors
    pub aspect: [f64; 2],
}

impl SpaceTransform {
    pub fn new(surface_size: PixelSize, viewport: ViewportRect, aspect: [f64; 2]) -> Self {
        Self {
            surface_size,
            viewport,
            aspect,
        }
    }

    fn surface_f64(&self) -> [f64; 2] {
        [self.surface_size[0] as f64, self.surface_size[1] as f64]
    }

    pub fn display_to_view(&self, display: Point3) -> Point3 {
        let [w, h] = self.surface_f64();
        let r = &self.viewport;

        let vx = 2.0 * (display[0] - w * r.xmin) / (w * r.width()) - 1.0;
        let vy = 2.0 * (display[1] - h * r.ymin) / (h * r.height()) - 1.0;

        [vx * self.aspect[0], vy * self.aspect[1], display[2]]
    }

    pub fn view_to_display(&self, view: Point3) -> Point3 {
        let [w, h] = self.surface_f64();
        let r = &self.viewport;

        let dx = (view[0] / self.aspect[0] + 1.0) * (w * r.width()) / 2.0 + w * r.xmin;
        let dy = (view[1] / self.aspect[1] + 1.0) * (h * r.height()) / 2.0 + h * r.ymin;

        [dx, dy, view[2]]
    }

    pub fn normalized_display_to_display(&self, p: Point2) -> Point2 {
        let [w, h] = self.surface_f64();
        [p[0] * w, p[1] * h]
    }

    pub fn display_to_normalized_display(&self, p: Point2) -> Point2 {
        let [w, h] = self.surface_f64();
        [p[0] / w, p[1] / h]
    }

    /// Viewport coordinates use pixel centers, display uses pixel edges,
    /// hence the half-pixel shift.
    pub fn normalized_display_to_viewport(&self, p: Point2) -> Point2 {
        let origin = self.normalized_display_to_display(self.viewport.min());
        let pixel = self.normalized_display_to_display(p);
        [pixel[0] - origin[0] - 0.5, pixel[1] - origin[1] - 0.5]
    }

    pub fn viewport_to_normalized_display(&self, p: Point2) -> Point2 {
        let origin = self.normalized_display_to_display(self.viewport.min());
        let pixel = [p[0] + origin[0] + 0.5, p[1] + origin[1] + 0.5];
        self.display_to_normalized_display(pixel)
    }

    pub fn viewport_to_normalized_viewport(&self, p: Point2) -> Point2 {
        let [w, h] = self.viewport_size();
        [p[0] / (w as f64 - 1.0), p[1] / (h as f64 - 1.0)]
    }

    pub fn normalized_viewport_to_viewport(&self, p: Point2) -> Point2 {
        let [w, h] = self.viewport_size();
        [p[0] * (w as f64 - 1.0), p[1] * (h as f64 - 1.0)]
    }

    pub fn normalized_viewport_to_view(&self, p: Point3) -> Point3 {
        normalized_viewport_to_view(p, self.aspect)
    }

    pub fn view_to_normalized_viewport(&self, p: Point3) -> Point3 {
        view_to_normalized_viewport(p, self.aspect)
    }

    /// Flip between top-left and bottom-left origins; self-inverse
    pub fn flip_vertical(&self, p: Point2) -> Point2 {
        [p[0], self.surface_size[1] as f64 - p[1] - 1.0]
    }

    /// Viewport extent in whole pixels
    ///
    /// Both corners are rounded to pixels before differencing, so adjacent
    /// viewports tile the surface without gaps.
    pub fn viewport_size(&self) -> PixelSize {
        self.rounded_extent(&self.viewport)
    }

    /// Viewport extent restricted to a tile of the full display
    pub fn tiled_size(&self, tile: &ViewportRect) -> PixelSize {
        let [w, h] = self.rounded_extent(&self.viewport.clamped_to(tile));
        [w.max(0), h.max(0)]
    }

    fn rounded_extent(&self, rect: &ViewportRect) -> PixelSize {
        let lower = self.normalized_display_to_display(rect.min());
        let upper = self.normalized_display_to_display(rect.max());
        [
            round_pixel(upper[0]) - round_pixel(lower[0]),
            round_pixel(upper[1]) - round_pixel(lower[1]),
        ]
    }

    pub fn origin(&self) -> PixelSize {
        let [w, h] = self.surface_f64();
        [
            round_pixel(self.viewport.xmin * w),
            round_pixel(self.viewport.ymin * h),
        ]
    }

    pub fn center(&self) -> Point2 {
        let [w, h] = self.surface_f64();
        let r = &self.viewport;
        [(r.xmax + r.xmin) / 2.0 * w, (r.ymax + r.ymin) / 2.0 * h]
    }

    /// Inclusive on all four edges
    pub fn contains_pixel(&self, x: i32, y: i32) -> bool {
        let [w, h] = self.surface_f64();
        let r = &self.viewport;
        let (x, y) = (x as f64, y as f64);

        r.xmin * w <= x && r.xmax * w >= x && r.ymin * h <= y && r.ymax * h >= y
    }

    /// Aspect derived from the inclusive pixel span of the viewport
    pub fn computed_aspect(&self, pixel_aspect: [f64; 2]) -> [f64; 2] {
        let [w, h] = self.surface_f64();
        let r = &self.viewport;

        let lower = [round_pixel(r.xmin * w), round_pixel(r.ymin * h)];
        let upper = [round_pixel(r.xmax * w) - 1, round_pixel(r.ymax * h) - 1];

        let span_x = (upper[0] - lower[0] + 1) as f64;
        let span_y = (upper[1] - lower[1] + 1) as f64;

        [span_x / span_y * pixel_aspect[0], pixel_aspect[1]]
    }
}

/// View to world: append the homogeneous coordinate
pub fn view_to_world(view: Point3) -> Point4 {
    [view[0], view[1], view[2], 1.0]
}

/// World to view: drop the homogeneous coordinate
pub fn world_to_view(world: Point4) -> Point3 {
    [world[0], world[1], world[2]]
}

pub fn normalized_viewport_to_view(p: Point3, aspect: [f64; 2]) -> Point3 {
    [
        (2.0 * p[0] - 1.0) * aspect[0],
        (2.0 * p[1] - 1.0) * aspect[1],
        p[2],
    ]
}

pub fn view_to_normalized_viewport(p: Point3, aspect: [f64; 2]) -> Point3 {
    [
        (p[0] / aspect[0] + 1.0) / 2.0,
        (p[1] / aspect[1] + 1.0) / 2.0,
        p[2],
    ]
}
