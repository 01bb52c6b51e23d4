//! 2D vector drawing core for CAD-style canvases.
//!
//! Provides an interactive raster canvas ([`canvas::Drawable`]) and a print
//! page device ([`print::PageDevice`]) behind one primitive-drawing trait
//! ([`surface::DrawSurface`]): lines, arcs, points, filled shapes, smoothed
//! polygons, bitmaps, and Pango-rendered text. Application coordinates use a
//! bottom-left origin; both backends map to device space at the boundary.
//!
//! The windowing layer owns the event loop and the display; it feeds pointer
//! and keyboard events in through [`input::Action`] and blits the composited
//! result (base surface plus transient overlay) using the damage rectangles
//! the canvas accumulates.

pub mod canvas;
pub mod draw;
pub mod input;
pub mod print;
pub mod surface;
pub mod util;

pub use canvas::{Bitmap, ControlLookup, Drawable, ExportError};
pub use draw::{
    BLACK, Color, ColorId, ColorTable, CornerType, DrawOptions, DrawStyle, FontDescriptor,
    FontFace, FontRegistry, LineStyle, PathError, PolygonVertex, TextMetrics, WHITE,
};
pub use input::{AccelKey, Action, CanvasHandler};
pub use print::{PageDecision, PageDevice, PageSetup, PrintError, PrintJob, ScaleOverrides};
pub use surface::{DrawError, DrawSurface};
