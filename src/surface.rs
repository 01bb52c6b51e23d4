//! The drawing-surface abstraction shared by the raster canvas and the
//! print device.
//!
//! Application code issues the same primitive calls against either backend;
//! which one is active is decided purely by which implementation it was
//! handed, never by inspecting the target.

use thiserror::Error;

use crate::draw::color::ColorId;
use crate::draw::font::{FontDescriptor, TextMetrics};
use crate::draw::path::{PathError, PolygonVertex};
use crate::draw::style::{DrawOptions, DrawStyle};

/// Errors raised by drawing primitives.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("cairo operation failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// A target the primitive renderer can draw onto.
///
/// Implemented by the interactive raster canvas and by the print/export page
/// device. Coordinates use the application's bottom-left-origin convention;
/// each implementation maps them to its own device space at the boundary.
pub trait DrawSurface {
    /// Draws a straight stroked segment.
    fn line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        style: &DrawStyle,
    ) -> Result<(), DrawError>;

    /// Draws a circular arc swept from `angle0` through `angle0 + angle1`
    /// degrees (clockwise-positive, 0 degrees along the +x axis), optionally
    /// with a small crosshair at the center. Arcs below a minimal visible
    /// radius are skipped.
    #[allow(clippy::too_many_arguments)]
    fn arc(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        angle0: f64,
        angle1: f64,
        draw_center: bool,
        style: &DrawStyle,
    ) -> Result<(), DrawError>;

    /// Draws a filled dot of fixed small radius, used for vertex markers.
    fn point(&mut self, x: i32, y: i32, color: ColorId, opts: DrawOptions)
    -> Result<(), DrawError>;

    /// Fills an axis-aligned rectangle. Unless `opts` contains
    /// [`DrawOptions::OPAQUE`], the area is first XOR-composited against the
    /// existing content and then filled with partial alpha, so a highlight
    /// rectangle does not fully obscure the drawing beneath it.
    fn filled_rectangle(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: ColorId,
        opts: DrawOptions,
    ) -> Result<(), DrawError>;

    /// Fills a circle.
    fn filled_circle(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        color: ColorId,
        opts: DrawOptions,
    ) -> Result<(), DrawError>;

    /// Strokes or fills a polygon after corner smoothing (see
    /// [`crate::draw::path::smooth_polygon`]).
    fn polygon(
        &mut self,
        vertices: &[PolygonVertex],
        style: &DrawStyle,
        fill: bool,
        open: bool,
    ) -> Result<(), DrawError>;

    /// Lays out `text` with the given font and size, rotates it by `angle`
    /// degrees about the baseline start point, and paints it.
    /// [`DrawOptions::OUTLINE_FONT`] strokes the glyph contours instead of
    /// filling them.
    #[allow(clippy::too_many_arguments)]
    fn string(
        &mut self,
        x: i32,
        y: i32,
        angle: f64,
        text: &str,
        font: &FontDescriptor,
        size: f64,
        color: ColorId,
        opts: DrawOptions,
    ) -> Result<(), DrawError>;

    /// Measures `text` without drawing anything.
    fn text_size(
        &self,
        text: &str,
        font: &FontDescriptor,
        size: f64,
    ) -> Result<TextMetrics, DrawError>;

    /// Fills the entire surface with the background color.
    fn clear(&mut self) -> Result<(), DrawError>;

    /// Restricts subsequent drawing to the given rectangle until the next
    /// full redraw.
    fn clip(&mut self, x: i32, y: i32, w: i32, h: i32) -> Result<(), DrawError>;
}
