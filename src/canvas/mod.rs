//! The interactive raster canvas: base surface, overlay compositor,
//! bitmaps, background image, and PNG export.

pub mod bitmap;
pub mod drawable;
pub mod export;
mod overlay;
mod render;

pub use bitmap::{Bitmap, ControlLookup};
pub use drawable::Drawable;
pub use export::ExportError;
