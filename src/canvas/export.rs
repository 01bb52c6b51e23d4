//! PNG export and the optional background image.

use std::fs::File;
use std::path::Path;

use cairo::{ImageSurface, Operator};
use thiserror::Error;

use super::drawable::Drawable;
use crate::surface::DrawError;

/// Errors raised while writing or loading image files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("png codec failed: {0}")]
    Png(#[from] cairo::IoError),
}

impl Drawable {
    /// Writes the base surface (without the overlay) to a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), ExportError> {
        let mut file = File::create(path)?;
        self.base_surface().write_to_png(&mut file)?;
        log::info!("wrote canvas snapshot to {}", path.display());
        Ok(())
    }

    /// Loads a PNG backdrop, or drops the current one when `path` is `None`.
    ///
    /// The image is only painted by [`show_background`](Self::show_background);
    /// loading it has no visible effect.
    pub fn set_background(&mut self, path: Option<&Path>) -> Result<(), ExportError> {
        match path {
            Some(p) => {
                let mut file = File::open(p)?;
                let image = ImageSurface::create_from_png(&mut file)?;
                log::debug!(
                    "loaded background {} ({}x{})",
                    p.display(),
                    image.width(),
                    image.height()
                );
                self.background = Some(image);
            }
            None => self.background = None,
        }
        Ok(())
    }

    /// Paints the background image scaled so its width covers `size` pixels
    /// (or unscaled when `size` is 0), rotated by `angle` degrees about its
    /// center, positioned at `(pos_x, pos_y)` in application coordinates, and
    /// screened back by `screen` percent. Does nothing when no background is
    /// loaded.
    pub fn show_background(
        &mut self,
        pos_x: i32,
        pos_y: i32,
        size: i32,
        angle: f64,
        screen: i32,
    ) -> Result<(), DrawError> {
        let Some(image) = self.background.clone() else {
            return Ok(());
        };
        let (_, height) = self.size();
        let ctx = self.measuring_context()?;
        let pw = image.width() as f64;
        let ph = image.height() as f64;
        let scale = if size == 0 { 1.0 } else { size as f64 / pw };
        let rad = angle.to_radians();

        let pos_y = height as f64
            - (ph * rad.cos().abs() + pw * rad.sin().abs()) * scale
            - pos_y as f64;

        ctx.save()?;
        ctx.set_operator(Operator::Over);
        ctx.translate(pos_x as f64, pos_y);
        ctx.scale(scale, scale);
        ctx.translate(
            (pw / 2.0 * rad.cos()).abs() + (ph / 2.0 * rad.sin()).abs(),
            (pw / 2.0 * rad.sin()).abs() + (ph / 2.0 * rad.cos()).abs(),
        );
        ctx.rotate(rad);
        // Clip to the image bounds or cairo samples garbage past its edges.
        ctx.rectangle(-pw / 2.0, -ph / 2.0, pw, ph);
        ctx.clip();
        ctx.set_source_surface(&image, -pw / 2.0, -ph / 2.0)?;
        ctx.paint_with_alpha((100 - screen).clamp(0, 100) as f64 / 100.0)?;
        ctx.restore()?;
        self.queue_damage(None);
        Ok(())
    }
}
