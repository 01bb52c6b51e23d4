//! Drawing parameter types shared by both surface backends.
//!
//! This module defines the leaf pieces of the rendering core:
//! - [`ColorId`]/[`Color`]: color identifiers and the resolver
//! - [`DrawStyle`]: per-call stroke/fill parameters
//! - [`FontDescriptor`]/[`FontRegistry`]: font handles and the standard-font cache
//! - [`smooth_polygon`]: polygon corner smoothing
//! - [`DirtyTracker`]: damage accumulation between repaints

pub mod color;
pub mod dirty;
pub mod font;
pub mod path;
pub mod style;

// Re-export commonly used types at module level
pub use color::{BLACK, Color, ColorId, ColorTable, WHITE};
pub use dirty::DirtyTracker;
pub use font::{FontDescriptor, FontFace, FontRegistry, TextMetrics};
pub use path::{CornerType, PathError, PathOp, PolygonVertex, smooth_polygon};
pub use style::{DrawOptions, DrawStyle, LineStyle};
