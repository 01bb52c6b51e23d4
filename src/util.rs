//! Geometry helpers shared by the raster canvas and the print device.
//!
//! This module provides:
//! - Vertical-axis mapping between model space (bottom-left origin) and
//!   surface space (top-left origin)
//! - Arc angle normalization
//! - An axis-aligned rectangle used for damage tracking and clipping

/// Maps a y coordinate between the application's bottom-left-origin space and
/// the surface's top-left-origin space.
///
/// The transform is its own inverse, so the same function serves both
/// directions. `height` must be the surface height at the time of the call;
/// callers must not cache it across resizes.
pub fn map_y(height: i32, y: i32) -> i32 {
    (height - 1) - y
}

/// Normalizes an arc start angle and sweep.
///
/// The start angle is wrapped into `[0, 360)`. Sweeps of 360 degrees or more
/// are clamped to 359.999 (a full circle, without degenerating into an empty
/// arc); negative sweeps wrap into `[0, 360)`.
pub fn normalize_arc(angle0: f64, angle1: f64) -> (f64, f64) {
    let start = angle0.rem_euclid(360.0);
    let sweep = if angle1 >= 360.0 {
        359.999
    } else {
        angle1.rem_euclid(360.0)
    };
    (start, sweep)
}

/// Axis-aligned rectangle helper used for damage tracking and clip regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_y_round_trips_within_bounds() {
        for h in [1, 2, 480, 1080] {
            for y in [0, 1, h / 2, h - 1] {
                assert_eq!(map_y(h, map_y(h, y)), y);
            }
        }
    }

    #[test]
    fn map_y_flips_about_surface_height() {
        assert_eq!(map_y(100, 0), 99);
        assert_eq!(map_y(100, 99), 0);
        assert_eq!(map_y(50, 10), 39);
    }

    #[test]
    fn normalize_arc_clamps_full_sweeps() {
        let (_, sweep) = normalize_arc(0.0, 370.0);
        assert_eq!(sweep, 359.999);
        let (_, sweep) = normalize_arc(0.0, 360.0);
        assert_eq!(sweep, 359.999);
        let (_, sweep) = normalize_arc(0.0, 359.999);
        assert_eq!(sweep, 359.999);
    }

    #[test]
    fn normalize_arc_wraps_into_range() {
        let (start, sweep) = normalize_arc(-90.0, -30.0);
        assert_eq!(start, 270.0);
        assert_eq!(sweep, 330.0);
        let (start, _) = normalize_arc(725.0, 10.0);
        assert!((start - 5.0).abs() < 1e-9);
    }

    #[test]
    fn rect_rejects_empty_dimensions() {
        assert!(Rect::new(0, 0, 0, 10).is_none());
        assert!(Rect::new(0, 0, 10, -1).is_none());
        assert!(Rect::new(-5, -5, 10, 10).is_some());
    }

    #[test]
    fn rect_from_min_max_matches_extent() {
        let rect = Rect::from_min_max(2, 3, 12, 8).unwrap();
        assert_eq!(rect, Rect::new(2, 3, 10, 5).unwrap());
    }
}
