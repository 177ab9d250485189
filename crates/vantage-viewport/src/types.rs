//! Common value types for vantage-viewport
//!
//! Points are plain fixed-size arrays so they can be passed by value through
//! the conversion functions. The two record types (`ColorRgb`, `ViewportRect`)
//! use named fields so they can cross the FFI boundary when the `uniffi`
//! feature is enabled.

use serde::{Deserialize, Serialize};

/// A 2D point or vector
pub type Point2 = [f64; 2];

/// A 3D point (display, view)
pub type Point3 = [f64; 3];

/// A homogeneous 3D point (world)
pub type Point4 = [f64; 4];

/// Surface or viewport extent in whole pixels
pub type PixelSize = [i32; 2];

/// An RGB color represented as three f64 values (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ColorRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ColorRgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Create from hex color (e.g., 0x1a1a1a)
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f64 / 255.0,
            g: ((hex >> 8) & 0xFF) as f64 / 255.0,
            b: (hex & 0xFF) as f64 / 255.0,
        }
    }

    pub fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0 }
    }

    pub fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0 }
    }
}

impl Default for ColorRgb {
    fn default() -> Self {
        Self::black()
    }
}

impl From<[f64; 3]> for ColorRgb {
    fn from(arr: [f64; 3]) -> Self {
        Self { r: arr[0], g: arr[1], b: arr[2] }
    }
}

impl From<ColorRgb> for [f64; 3] {
    fn from(c: ColorRgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Normalized (0..1) sub-region of a render surface
///
/// Ordering of the bounds is the caller's responsibility; the viewport does
/// not reorder or clamp them. A zero-width or zero-height rectangle makes the
/// display/view conversions divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ViewportRect {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl ViewportRect {
    /// The whole surface
    pub const FULL: ViewportRect = ViewportRect {
        xmin: 0.0,
        ymin: 0.0,
        xmax: 1.0,
        ymax: 1.0,
    };

    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }

    /// Lower-left corner
    pub fn min(&self) -> Point2 {
        [self.xmin, self.ymin]
    }

    /// Upper-right corner
    pub fn max(&self) -> Point2 {
        [self.xmax, self.ymax]
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Clamp this rectangle into `bounds`, corner by corner
    ///
    /// The result may be inverted (max < min) when the rectangles do not
    /// overlap; callers that need an extent clamp the difference themselves.
    pub fn clamped_to(&self, bounds: &ViewportRect) -> ViewportRect {
        ViewportRect {
            xmin: self.xmin.max(bounds.xmin).min(bounds.xmax),
            ymin: self.ymin.max(bounds.ymin).min(bounds.ymax),
            xmax: self.xmax.min(bounds.xmax).max(bounds.xmin),
            ymax: self.ymax.min(bounds.ymax).max(bounds.ymin),
        }
    }

    /// Whether all bounds lie in [0, 1] with min <= max
    pub fn is_normalized(&self) -> bool {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        in_unit(self.xmin)
            && in_unit(self.ymin)
            && in_unit(self.xmax)
            && in_unit(self.ymax)
            && self.xmin <= self.xmax
            && self.ymin <= self.ymax
    }
}

impl Default for ViewportRect {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<[f64; 4]> for ViewportRect {
    fn from(arr: [f64; 4]) -> Self {
        Self {
            xmin: arr[0],
            ymin: arr[1],
            xmax: arr[2],
            ymax: arr[3],
        }
    }
}

impl From<ViewportRect> for [f64; 4] {
    fn from(r: ViewportRect) -> Self {
        r.to_array()
    }
}

/// Round a non-negative pixel coordinate to the nearest whole pixel
///
/// Truncates after adding one half, so negative inputs round toward zero.
#[inline]
pub fn round_pixel(value: f64) -> i32 {
    (value + 0.5) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = ColorRgb::from_hex(0xFF0000);
        assert!((color.r - 1.0).abs() < 1e-12);
        assert!(color.g.abs() < 1e-12);
        assert!(color.b.abs() < 1e-12);
    }

    #[test]
    fn test_default_background_is_black() {
        assert_eq!(ColorRgb::default(), ColorRgb::black());
    }

    #[test]
    fn test_rect_clamp_inside_bounds() {
        let rect = ViewportRect::new(0.25, 0.0, 0.75, 1.0);
        let tile = ViewportRect::new(0.5, 0.0, 1.0, 1.0);
        let clamped = rect.clamped_to(&tile);
        assert_eq!(clamped, ViewportRect::new(0.5, 0.0, 0.75, 1.0));
    }

    #[test]
    fn test_rect_clamp_disjoint_collapses() {
        let rect = ViewportRect::new(0.0, 0.0, 0.25, 1.0);
        let tile = ViewportRect::new(0.5, 0.0, 1.0, 1.0);
        let clamped = rect.clamped_to(&tile);
        assert_eq!(clamped.xmin, 0.5);
        assert_eq!(clamped.xmax, 0.5);
    }

    #[test]
    fn test_rect_is_normalized() {
        assert!(ViewportRect::FULL.is_normalized());
        assert!(!ViewportRect::new(0.5, 0.0, 0.25, 1.0).is_normalized());
        assert!(!ViewportRect::new(0.0, 0.0, 1.5, 1.0).is_normalized());
    }

    #[test]
    fn test_round_pixel() {
        assert_eq!(round_pixel(0.0), 0);
        assert_eq!(round_pixel(99.5), 100);
        assert_eq!(round_pixel(99.49), 99);
    }
}
