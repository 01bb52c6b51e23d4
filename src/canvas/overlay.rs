//! Transient overlay layer composited above the base raster.
//!
//! Pointer-tracking decoration is drawn here instead of into the base
//! surface, so removing it never disturbs committed drawing ink.

use cairo::{Context, Format, ImageSurface, Operator};

/// A lazily allocated transparent ARGB layer matching the drawable's size.
#[derive(Debug, Default)]
pub(crate) struct Overlay {
    surface: Option<ImageSurface>,
    show: bool,
}

impl Overlay {
    /// Starts an overlay drawing pass: allocates or resizes the layer, wipes
    /// it back to fully transparent, marks it visible, and returns a context
    /// ready for ink.
    pub fn begin_pass(&mut self, width: i32, height: i32) -> Result<Context, cairo::Error> {
        let surface = match &self.surface {
            Some(s) if s.width() == width && s.height() == height => s.clone(),
            _ => {
                let s = ImageSurface::create(Format::ARgb32, width, height)?;
                self.surface = Some(s.clone());
                s
            }
        };
        let ctx = Context::new(&surface)?;
        ctx.save()?;
        ctx.set_operator(Operator::Clear);
        ctx.paint()?;
        ctx.restore()?;
        ctx.set_operator(Operator::Source);
        self.show = true;
        Ok(ctx)
    }

    /// Erases the layer back to transparency and hides it from compositing.
    pub fn hide(&mut self) -> Result<(), cairo::Error> {
        if let Some(surface) = &self.surface {
            let ctx = Context::new(surface)?;
            ctx.set_operator(Operator::Clear);
            ctx.paint()?;
        }
        self.show = false;
        Ok(())
    }

    /// The layer to composite above the base, if currently visible.
    pub fn visible_surface(&self) -> Option<&ImageSurface> {
        if self.show { self.surface.as_ref() } else { None }
    }

    /// Drops the backing surface entirely, e.g. on resize.
    pub fn discard(&mut self) {
        self.surface = None;
        self.show = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads one alpha byte by blitting into an exclusively owned copy,
    /// since `ImageSurface::data` refuses shared handles.
    fn alpha_at(surface: &ImageSurface, x: usize, y: usize) -> u8 {
        let mut copy =
            ImageSurface::create(Format::ARgb32, surface.width(), surface.height()).unwrap();
        {
            let ctx = Context::new(&copy).unwrap();
            ctx.set_source_surface(surface, 0.0, 0.0).unwrap();
            ctx.set_operator(Operator::Source);
            ctx.paint().unwrap();
        }
        let stride = copy.stride() as usize;
        let data = copy.data().unwrap();
        // ARGB32 is native-endian; alpha is byte 3 on little-endian.
        data[y * stride + x * 4 + 3]
    }

    #[test]
    fn begin_pass_wipes_previous_ink() {
        let mut overlay = Overlay::default();
        {
            let ctx = overlay.begin_pass(8, 8).unwrap();
            ctx.set_source_rgba(1.0, 0.0, 0.0, 1.0);
            ctx.paint().unwrap();
        }
        {
            let _ctx = overlay.begin_pass(8, 8).unwrap();
        }
        assert_eq!(alpha_at(overlay.surface.as_ref().unwrap(), 4, 4), 0);
    }

    #[test]
    fn hide_clears_and_hides() {
        let mut overlay = Overlay::default();
        {
            let ctx = overlay.begin_pass(4, 4).unwrap();
            ctx.set_source_rgba(0.0, 0.0, 1.0, 1.0);
            ctx.paint().unwrap();
        }
        assert!(overlay.visible_surface().is_some());

        overlay.hide().unwrap();
        assert!(overlay.visible_surface().is_none());
        assert_eq!(alpha_at(overlay.surface.as_ref().unwrap(), 1, 1), 0);
    }

    #[test]
    fn begin_pass_reallocates_on_resize() {
        let mut overlay = Overlay::default();
        let _ = overlay.begin_pass(4, 4).unwrap();
        let _ = overlay.begin_pass(16, 16).unwrap();
        let surface = overlay.surface.as_ref().unwrap();
        assert_eq!((surface.width(), surface.height()), (16, 16));
    }
}
