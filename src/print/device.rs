//! The page-stream drawing device.
//!
//! Implements the same primitive set as the raster canvas against a
//! PDF/PostScript/recording surface. The document-start transform maps the
//! application's bottom-left-origin inch grid onto cairo's top-left page
//! space once; primitives then draw in application coordinates directly.

use std::f64::consts::PI;

use cairo::Context;

use super::setup::{PageSetup, ScaleOverrides};
use crate::draw::color::{ColorId, ColorTable, WHITE};
use crate::draw::font::{FontDescriptor, TextMetrics, realize_layout};
use crate::draw::path::{PathOp, PolygonVertex, smooth_polygon};
use crate::draw::style::{DrawOptions, DrawStyle};
use crate::surface::{DrawError, DrawSurface};

/// Size of the cross marking arc centers, in device units. Larger than the
/// screen equivalent because print coordinates are denser.
const CENTERMARK_LENGTH: i32 = 60;

/// Largest radius the page device will draw.
const MAX_RADIUS: f64 = 10e9;

/// A [`DrawSurface`] writing into a print or export page stream.
pub struct PageDevice {
    ctx: Context,
    colors: ColorTable,
    scale_adjust: f64,
    scale_text: f64,
}

impl PageDevice {
    /// Wraps a page surface and applies the document transform: margin
    /// translation, vertical flip, and scale adjustment.
    pub(crate) fn new(
        surface: &cairo::Surface,
        setup: &PageSetup,
        overrides: &ScaleOverrides,
    ) -> Result<Self, cairo::Error> {
        if let Some(dpi) = overrides.fallback_dpi {
            surface.set_fallback_resolution(dpi, dpi);
        }
        let ctx = Context::new(surface)?;
        ctx.translate(
            setup.left_margin * 72.0,
            (setup.paper_height - setup.bottom_margin) * 72.0,
        );
        ctx.scale(overrides.scale_adjust, -overrides.scale_adjust);
        Ok(Self {
            ctx,
            colors: ColorTable,
            scale_adjust: overrides.scale_adjust,
            scale_text: overrides.scale_text,
        })
    }

    pub fn max_radius(&self) -> f64 {
        MAX_RADIUS
    }

    pub(crate) fn context(&self) -> &Context {
        &self.ctx
    }

    /// White ink and screen-only decoration never reach the page.
    fn suppressed(&self, color: ColorId, opts: DrawOptions) -> bool {
        color == WHITE || opts.contains(DrawOptions::TEMPORARY)
    }

    fn set_color(&self, color: ColorId) {
        let c = self.colors.resolve(color);
        self.ctx.set_source_rgb(c.r, c.g, c.b);
    }

    /// Applies line width and dash pattern. Negative widths are the
    /// device-independent convention: magnitude in points at 72 dpi, doubled
    /// and scale-adjusted. Hairlines get a minimum visible width.
    fn set_stroke(&self, style: &DrawStyle) {
        let mut width = style.width as f64;
        if width < 0.0 {
            width = (-width / 72.0) * 2.0 / self.scale_adjust;
        }
        if width <= 0.09 {
            width = 0.1 / self.scale_adjust;
        }
        self.ctx.set_line_width(width);
        match style.line.dash_pattern() {
            Some(pattern) => self.ctx.set_dash(pattern, 0.0),
            None => self.ctx.set_dash(&[], 0.0),
        }
    }
}

impl DrawSurface for PageDevice {
    fn line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        style: &DrawStyle,
    ) -> Result<(), DrawError> {
        if self.suppressed(style.color, style.opts) {
            return Ok(());
        }
        self.set_color(style.color);
        self.set_stroke(style);
        self.ctx.move_to(x0 as f64, y0 as f64);
        self.ctx.line_to(x1 as f64, y1 as f64);
        self.ctx.stroke()?;
        Ok(())
    }

    fn arc(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        angle0: f64,
        angle1: f64,
        draw_center: bool,
        style: &DrawStyle,
    ) -> Result<(), DrawError> {
        if self.suppressed(style.color, style.opts) {
            return Ok(());
        }
        self.set_color(style.color);
        self.set_stroke(style);

        let sweep = if angle1 >= 360.0 { 359.999 } else { angle1 };
        // The document transform flips the y axis, which also reverses arc
        // orientation; expressing both limits as 90 - angle compensates.
        let end = (90.0 - (angle0 + sweep)).rem_euclid(360.0);
        let start = (90.0 - angle0).rem_euclid(360.0);
        self.ctx.arc(
            cx as f64,
            cy as f64,
            r as f64,
            end.to_radians(),
            start.to_radians(),
        );

        if draw_center {
            let half = (CENTERMARK_LENGTH / 2) as f64;
            let (fx, fy) = (cx as f64, cy as f64);
            self.ctx.move_to(fx - half, fy);
            self.ctx.line_to(fx + half, fy);
            self.ctx.move_to(fx, fy - half);
            self.ctx.line_to(fx, fy + half);
        }
        self.ctx.stroke()?;
        Ok(())
    }

    fn point(
        &mut self,
        x: i32,
        y: i32,
        color: ColorId,
        opts: DrawOptions,
    ) -> Result<(), DrawError> {
        if self.suppressed(color, opts) {
            return Ok(());
        }
        self.set_color(color);
        self.ctx.new_path();
        self.ctx.arc(x as f64, y as f64, 0.75, 0.0, 2.0 * PI);
        self.ctx.fill()?;
        Ok(())
    }

    fn filled_rectangle(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: ColorId,
        opts: DrawOptions,
    ) -> Result<(), DrawError> {
        if self.suppressed(color, opts) {
            return Ok(());
        }
        self.set_color(color);
        self.ctx.rectangle(x as f64, y as f64, w as f64, h as f64);
        self.ctx.fill()?;
        Ok(())
    }

    fn filled_circle(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        color: ColorId,
        opts: DrawOptions,
    ) -> Result<(), DrawError> {
        if self.suppressed(color, opts) {
            return Ok(());
        }
        self.set_color(color);
        self.ctx.arc(cx as f64, cy as f64, r as f64, 0.0, 2.0 * PI);
        self.ctx.fill()?;
        Ok(())
    }

    fn polygon(
        &mut self,
        vertices: &[PolygonVertex],
        style: &DrawStyle,
        fill: bool,
        open: bool,
    ) -> Result<(), DrawError> {
        let ops = smooth_polygon(vertices, open, fill)?;
        if self.suppressed(style.color, style.opts) {
            return Ok(());
        }
        self.set_color(style.color);
        self.set_stroke(style);
        for op in &ops {
            match *op {
                PathOp::MoveTo(x, y) => self.ctx.move_to(x, y),
                PathOp::LineTo(x, y) => self.ctx.line_to(x, y),
                PathOp::CurveTo(c1x, c1y, c2x, c2y, x, y) => {
                    self.ctx.curve_to(c1x, c1y, c2x, c2y, x, y)
                }
            }
        }
        if fill && !open {
            self.ctx.fill()?;
        } else {
            self.ctx.stroke()?;
        }
        Ok(())
    }

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
    ) -> Result<(), DrawError> {
        if self.suppressed(color, opts) {
            return Ok(());
        }
        // Glyphs must not inherit the flipped document transform or they
        // render mirrored. Transform the anchor through it, then lay the
        // text out against the identity matrix.
        let (ux, uy) = self.ctx.user_to_device(x as f64, y as f64);

        self.ctx.save()?;
        self.ctx.identity_matrix();
        let (layout, metrics) = realize_layout(&self.ctx, font, size * self.scale_text, text);
        self.set_color(color);
        self.ctx.translate(ux, uy);
        self.ctx.rotate(-angle.to_radians());
        self.ctx.translate(0.0, -(metrics.baseline as f64));
        self.ctx.move_to(0.0, 0.0);
        pangocairo::functions::update_layout(&self.ctx, &layout);
        if opts.contains(DrawOptions::OUTLINE_FONT) {
            pangocairo::functions::layout_path(&self.ctx, &layout);
            self.ctx.stroke()?;
        } else {
            pangocairo::functions::show_layout(&self.ctx, &layout);
        }
        self.ctx.restore()?;
        Ok(())
    }

    fn text_size(
        &self,
        text: &str,
        font: &FontDescriptor,
        size: f64,
    ) -> Result<TextMetrics, DrawError> {
        self.ctx.save()?;
        self.ctx.identity_matrix();
        let (_, metrics) = realize_layout(&self.ctx, font, size * self.scale_text, text);
        self.ctx.restore()?;
        Ok(metrics)
    }

    /// Pages start blank; clearing is a no-op on the page stream.
    fn clear(&mut self) -> Result<(), DrawError> {
        Ok(())
    }

    fn clip(&mut self, x: i32, y: i32, w: i32, h: i32) -> Result<(), DrawError> {
        self.ctx.move_to(x as f64, y as f64);
        self.ctx.rel_line_to(w as f64, 0.0);
        self.ctx.rel_line_to(0.0, h as f64);
        self.ctx.rel_line_to(-(w as f64), 0.0);
        self.ctx.close_path();
        self.ctx.clip();
        Ok(())
    }
}
