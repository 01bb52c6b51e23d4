//! Page geometry and environment-driven scale overrides.

use serde::{Deserialize, Serialize};

/// Environment variable overriding the print scale factor, for printer
/// drivers that mishandle high fallback resolutions.
pub const ENV_PRINT_SCALE: &str = "CADCANVAS_PRINT_SCALE";

/// Environment variable overriding the text scale factor, applied on top of
/// [`ENV_PRINT_SCALE`].
pub const ENV_PRINT_TEXT_SCALE: &str = "CADCANVAS_PRINT_TEXT_SCALE";

/// Fallback raster resolution used when no scale override is active. Print
/// surfaces are always 72 points per inch; rasterized content inside them is
/// rendered at this density.
const FALLBACK_DPI: f64 = 600.0;

/// Paper size and margins, in inches.
///
/// Page orientation is handled by the drawing layer, which assumes portrait
/// paper; a landscape setup is normalized by swapping the paper dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    pub paper_width: f64,
    pub paper_height: f64,
    pub top_margin: f64,
    pub right_margin: f64,
    pub bottom_margin: f64,
    pub left_margin: f64,
}

impl PageSetup {
    /// Returns this setup in portrait orientation (height >= width).
    pub fn normalized(mut self) -> Self {
        if self.paper_height < self.paper_width {
            std::mem::swap(&mut self.paper_height, &mut self.paper_width);
        }
        self
    }

    /// The printable area inside the margins, in inches.
    pub fn printable_size(&self) -> (f64, f64) {
        (
            self.paper_width - self.left_margin - self.right_margin,
            self.paper_height - self.top_margin - self.bottom_margin,
        )
    }
}

impl Default for PageSetup {
    /// US Letter with quarter-inch margins.
    fn default() -> Self {
        Self {
            paper_width: 8.5,
            paper_height: 11.0,
            top_margin: 0.25,
            right_margin: 0.25,
            bottom_margin: 0.25,
            left_margin: 0.25,
        }
    }
}

/// Resolution/scale parameters for one print document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleOverrides {
    /// Device-unit scale applied at document start.
    pub scale_adjust: f64,
    /// Extra multiplier on text sizes.
    pub scale_text: f64,
    /// Fallback resolution to set on the surface, when not overridden.
    pub fallback_dpi: Option<f64>,
}

impl ScaleOverrides {
    /// Reads the override environment variables.
    ///
    /// When [`ENV_PRINT_SCALE`] holds a non-zero number, that value is used
    /// directly and no fallback resolution is set; [`ENV_PRINT_TEXT_SCALE`]
    /// may then scale text independently. Otherwise the default high-density
    /// fallback applies.
    pub fn from_env() -> Self {
        fn parse(name: &str) -> Option<f64> {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| *v != 0.0)
        }

        match parse(ENV_PRINT_SCALE) {
            Some(scale) => {
                let scale_text = parse(ENV_PRINT_TEXT_SCALE).unwrap_or(1.0);
                log::info!("print scale override: scale={scale} text={scale_text}");
                Self {
                    scale_adjust: scale,
                    scale_text,
                    fallback_dpi: None,
                }
            }
            None => Self::default(),
        }
    }
}

impl Default for ScaleOverrides {
    fn default() -> Self {
        Self {
            scale_adjust: 72.0 / FALLBACK_DPI,
            scale_text: 1.0,
            fallback_dpi: Some(FALLBACK_DPI),
        }
    }
}
