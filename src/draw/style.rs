//! Per-call stroke and fill parameters.

use super::color::ColorId;

/// Length of a single dash, in device units.
const DASH_LENGTH: f64 = 8.0;

bitflags::bitflags! {
    /// Option bitmask accepted by every drawing call.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct DrawOptions: u32 {
        /// UI-only decoration; must not appear in printed output.
        const TEMPORARY = 1 << 0;
        /// Allow bitmap pixels to bleed outside the drawable's bounds into
        /// whichever sibling control occupies that position.
        const NO_CLIP = 1 << 1;
        /// Fill rectangles fully opaque instead of the highlight double-draw.
        const OPAQUE = 1 << 2;
        /// Stroke glyph contours instead of filling them.
        const OUTLINE_FONT = 1 << 3;
        /// Paint into the overlay layer instead of the base surface.
        const CURSOR = 1 << 4;
        /// Erase previously drawn overlay ink.
        const CURSOR_REMOVE = 1 << 5;
        /// Drop the overlay without painting anything.
        const CURSOR_QUIT = 1 << 6;
    }
}

impl DrawOptions {
    /// Returns true when the call should be routed through the overlay
    /// compositor rather than the base surface.
    pub fn is_cursor_pass(&self) -> bool {
        self.intersects(Self::CURSOR | Self::CURSOR_REMOVE | Self::CURSOR_QUIT)
    }
}

/// Stroke dash patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
    Center,
    Phantom,
}

impl LineStyle {
    /// Returns the dash pattern for this style, or `None` for a solid line.
    pub fn dash_pattern(self) -> Option<&'static [f64]> {
        const DASH: &[f64] = &[DASH_LENGTH, 3.0];
        const DOT: &[f64] = &[1.0, 2.0, 1.0, 2.0];
        const DASH_DOT: &[f64] = &[3.0, 2.0, 1.0, 2.0];
        const DASH_DOT_DOT: &[f64] = &[3.0, 2.0, 1.0, 2.0, 1.0, 2.0];
        const CENTER: &[f64] = &[1.5 * DASH_LENGTH, 3.0, DASH_LENGTH, 3.0];
        const PHANTOM: &[f64] = &[1.5 * DASH_LENGTH, 3.0, DASH_LENGTH, 3.0, DASH_LENGTH, 3.0];

        match self {
            LineStyle::Solid => None,
            LineStyle::Dash => Some(DASH),
            LineStyle::Dot => Some(DOT),
            LineStyle::DashDot => Some(DASH_DOT),
            LineStyle::DashDotDot => Some(DASH_DOT_DOT),
            LineStyle::Center => Some(CENTER),
            LineStyle::Phantom => Some(PHANTOM),
        }
    }
}

/// The stroke/fill parameters for one drawing call.
///
/// Constructed per call and never persisted. A negative `width` is the
/// device-independent printer convention: its magnitude is a line width in
/// points at 72 dpi, scale-adjusted by the print device. The raster canvas
/// uses the magnitude directly; width 0 normalizes to 1.
#[derive(Clone, Copy, Debug)]
pub struct DrawStyle {
    pub width: i32,
    pub line: LineStyle,
    pub color: ColorId,
    pub opts: DrawOptions,
}

impl DrawStyle {
    pub fn new(width: i32, line: LineStyle, color: ColorId, opts: DrawOptions) -> Self {
        Self {
            width,
            line,
            color,
            opts,
        }
    }

    /// A solid one-pixel stroke in the given color.
    pub fn solid(color: ColorId) -> Self {
        Self::new(1, LineStyle::Solid, color, DrawOptions::empty())
    }

    /// Line width for on-screen rendering: absolute value, zero becomes one.
    pub(crate) fn screen_width(&self) -> f64 {
        if self.width == 0 {
            1.0
        } else {
            self.width.unsigned_abs() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;

    #[test]
    fn screen_width_normalizes_zero_and_negative() {
        let style = DrawStyle::new(0, LineStyle::Solid, BLACK, DrawOptions::empty());
        assert_eq!(style.screen_width(), 1.0);
        let style = DrawStyle::new(-3, LineStyle::Solid, BLACK, DrawOptions::empty());
        assert_eq!(style.screen_width(), 3.0);
    }

    #[test]
    fn solid_has_no_dash_pattern() {
        assert!(LineStyle::Solid.dash_pattern().is_none());
        for style in [
            LineStyle::Dash,
            LineStyle::Dot,
            LineStyle::DashDot,
            LineStyle::DashDotDot,
            LineStyle::Center,
            LineStyle::Phantom,
        ] {
            let pattern = style.dash_pattern().unwrap();
            assert!(pattern.len() % 2 == 0);
            assert!(pattern.iter().all(|&d| d > 0.0));
        }
    }

    #[test]
    fn cursor_pass_detection() {
        assert!(DrawOptions::CURSOR.is_cursor_pass());
        assert!(DrawOptions::CURSOR_REMOVE.is_cursor_pass());
        assert!(DrawOptions::CURSOR_QUIT.is_cursor_pass());
        assert!(!(DrawOptions::TEMPORARY | DrawOptions::OPAQUE).is_cursor_pass());
    }
}
