//! Primitive rendering onto the raster canvas.

use std::f64::consts::PI;

use super::bitmap::{Bitmap, ControlLookup};
use super::drawable::Drawable;
use crate::draw::color::ColorId;
use crate::draw::font::{FontDescriptor, TextMetrics, realize_layout};
use crate::draw::path::{PathOp, PolygonVertex, smooth_polygon};
use crate::draw::style::{DrawOptions, DrawStyle, LineStyle};
use crate::surface::{DrawError, DrawSurface};
use crate::util::{Rect, normalize_arc};

/// Side length of the crosshair marking an arc center, in pixels.
const CENTERMARK_LENGTH: i32 = 6;

/// Arcs smaller than this radius are invisible at screen resolution.
const MIN_ARC_RADIUS: f64 = 6.0 / 75.0;

/// Bounding box of a stroked segment, padded for the line width.
fn stroke_damage(x0: i32, y0: i32, x1: i32, y1: i32, width: f64) -> Option<Rect> {
    let pad = width.ceil() as i32 + 1;
    Rect::from_min_max(
        x0.min(x1) - pad,
        y0.min(y1) - pad,
        x0.max(x1) + pad,
        y0.max(y1) + pad,
    )
}

impl DrawSurface for Drawable {
    fn line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        style: &DrawStyle,
    ) -> Result<(), DrawError> {
        let (dy0, dy1) = (self.map_in(y0), self.map_in(y1));
        let Some(ctx) = self.draw_context(style)? else {
            return Ok(());
        };
        ctx.move_to(x0 as f64 + 0.5, dy0 as f64 + 0.5);
        ctx.line_to(x1 as f64 + 0.5, dy1 as f64 + 0.5);
        ctx.stroke()?;
        self.queue_damage(stroke_damage(x0, dy0, x1, dy1, style.screen_width()));
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
        if (r as f64) < MIN_ARC_RADIUS {
            return Ok(());
        }
        let (start, sweep) = normalize_arc(angle0, angle1);
        let dcy = self.map_in(cy);
        let Some(ctx) = self.draw_context(style)? else {
            return Ok(());
        };
        ctx.new_path();

        if draw_center {
            let half = (CENTERMARK_LENGTH / 2) as f64;
            let (fx, fy) = (cx as f64, dcy as f64);
            ctx.move_to(fx - half, fy);
            ctx.line_to(fx + half, fy);
            ctx.move_to(fx, fy - half);
            ctx.line_to(fx, fy + half);
            ctx.new_sub_path();
        }

        // The flipped y axis reverses the sweep direction, so the
        // counter-clockwise application arc is a negative cairo arc.
        ctx.arc_negative(
            cx as f64,
            dcy as f64,
            r as f64,
            (start - 90.0 + sweep).to_radians(),
            (start - 90.0).to_radians(),
        );
        ctx.stroke()?;
        self.queue_damage(stroke_damage(
            cx - r,
            dcy - r,
            cx + r,
            dcy + r,
            style.screen_width(),
        ));
        Ok(())
    }

    fn point(
        &mut self,
        x: i32,
        y: i32,
        color: ColorId,
        opts: DrawOptions,
    ) -> Result<(), DrawError> {
        let style = DrawStyle::new(0, LineStyle::Solid, color, opts);
        let dy = self.map_in(y);
        let Some(ctx) = self.draw_context(&style)? else {
            return Ok(());
        };
        ctx.new_path();
        ctx.arc(x as f64, dy as f64, 0.75, 0.0, 2.0 * PI);
        ctx.fill()?;
        self.queue_damage(Rect::new(x - 2, dy - 2, 4, 4));
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
        let style = DrawStyle::new(0, LineStyle::Solid, color, opts);
        let top = self.map_in(y) - h;
        let Some(ctx) = self.draw_context(&style)? else {
            return Ok(());
        };
        let (fx, fy, fw, fh) = (x as f64, top as f64, w as f64, h as f64);

        if !opts.contains(DrawOptions::OPAQUE) {
            // Highlight fill: invert what is underneath, outline at full
            // strength, then lay translucent color on top so the drawing
            // stays legible through the highlight.
            ctx.rectangle(fx, fy, fw, fh);
            ctx.set_source_rgb(0.0, 0.0, 0.0);
            ctx.set_operator(cairo::Operator::Difference);
            ctx.fill()?;

            let c = self.colors.resolve(color);
            ctx.set_operator(cairo::Operator::Over);
            ctx.set_source_rgba(c.r, c.g, c.b, 1.0);
            ctx.rectangle(fx, fy, fw, fh);
            ctx.stroke()?;
            ctx.set_source_rgba(c.r, c.g, c.b, 0.3);
        }
        ctx.rectangle(fx, fy, fw, fh);
        ctx.fill()?;
        self.queue_damage(Rect::new(x - 1, top - 1, w + 2, h + 2));
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
        let style = DrawStyle::new(0, LineStyle::Solid, color, opts);
        let dcy = self.map_in(cy);
        let Some(ctx) = self.draw_context(&style)? else {
            return Ok(());
        };
        ctx.arc(cx as f64, dcy as f64, r as f64, 0.0, 2.0 * PI);
        ctx.fill()?;
        self.queue_damage(Rect::new(cx - r - 1, dcy - r - 1, 2 * r + 2, 2 * r + 2));
        Ok(())
    }

    fn polygon(
        &mut self,
        vertices: &[PolygonVertex],
        style: &DrawStyle,
        fill: bool,
        open: bool,
    ) -> Result<(), DrawError> {
        let mapped: Vec<PolygonVertex> = vertices
            .iter()
            .map(|v| PolygonVertex::new(v.x, self.map_in(v.y), v.corner))
            .collect();
        let ops = smooth_polygon(&mapped, open, fill)?;

        // Filling ignores the stroke parameters; stroking uses them.
        let effective = if fill {
            DrawStyle::new(1, LineStyle::Solid, style.color, style.opts)
        } else {
            *style
        };
        let Some(ctx) = self.draw_context(&effective)? else {
            return Ok(());
        };
        for op in &ops {
            match *op {
                PathOp::MoveTo(x, y) => ctx.move_to(x, y),
                PathOp::LineTo(x, y) => ctx.line_to(x, y),
                PathOp::CurveTo(c1x, c1y, c2x, c2y, x, y) => ctx.curve_to(c1x, c1y, c2x, c2y, x, y),
            }
        }
        if fill && !open {
            ctx.fill()?;
        } else {
            ctx.stroke()?;
        }

        let min_x = mapped.iter().map(|v| v.x).min().unwrap_or(0);
        let max_x = mapped.iter().map(|v| v.x).max().unwrap_or(0);
        let min_y = mapped.iter().map(|v| v.y).min().unwrap_or(0);
        let max_y = mapped.iter().map(|v| v.y).max().unwrap_or(0);
        let pad = effective.screen_width().ceil() as i32 + 1;
        self.queue_damage(Rect::from_min_max(
            min_x - pad,
            min_y - pad,
            max_x + pad,
            max_y + pad,
        ));
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
        let style = DrawStyle::new(0, LineStyle::Solid, color, opts);
        let dy = self.map_in(y);
        let Some(ctx) = self.draw_context(&style)? else {
            return Ok(());
        };
        let rad = -angle.to_radians();

        ctx.save()?;
        ctx.identity_matrix();
        let (layout, metrics) = realize_layout(&ctx, font, size, text);

        let c = self.colors.resolve(color);
        ctx.set_source_rgb(c.r, c.g, c.b);
        ctx.set_operator(cairo::Operator::Over);
        ctx.translate(x as f64, dy as f64);
        ctx.rotate(rad);
        ctx.translate(0.0, -metrics.baseline as f64);
        ctx.move_to(0.0, 0.0);
        pangocairo::functions::update_layout(&ctx, &layout);
        if opts.contains(DrawOptions::OUTLINE_FONT) {
            pangocairo::functions::layout_path(&ctx, &layout);
            ctx.stroke()?;
        } else {
            pangocairo::functions::show_layout(&ctx, &layout);
        }
        ctx.restore()?;

        // Axis-aligned over-approximation of the rotated layout box.
        let wf = metrics.width as f64;
        let hf = metrics.height as f64;
        let ext_w = (wf * rad.cos().abs() + hf * rad.sin().abs()).ceil() as i32 + 4;
        let ext_h = (wf * rad.sin().abs() + hf * rad.cos().abs()).ceil() as i32 + 4;
        self.queue_damage(Rect::new(
            x - 2,
            dy - metrics.baseline - metrics.descent - 2,
            ext_w,
            ext_h,
        ));
        Ok(())
    }

    fn text_size(
        &self,
        text: &str,
        font: &FontDescriptor,
        size: f64,
    ) -> Result<TextMetrics, DrawError> {
        let ctx = self.measuring_context()?;
        ctx.identity_matrix();
        let (_, metrics) = realize_layout(&ctx, font, size, text);
        Ok(metrics)
    }

    fn clear(&mut self) -> Result<(), DrawError> {
        self.clear_clip();
        self.clear_base()?;
        self.queue_damage(None);
        Ok(())
    }

    fn clip(&mut self, x: i32, y: i32, w: i32, h: i32) -> Result<(), DrawError> {
        self.set_clip(x, y, w, h);
        Ok(())
    }
}

impl Drawable {
    /// Paints a bitmap with its hotspot at `(x, y)`.
    ///
    /// Set pixels become 1x1 rectangles in `color`. Cursor options route the
    /// ink through the overlay layer. Pixels outside the drawable are dropped
    /// unless `opts` allows bleed ([`DrawOptions::NO_CLIP`]) and `lookup`
    /// resolves the position to a sibling control, in which case the pixel is
    /// painted onto that sibling instead.
    pub fn draw_bitmap(
        &mut self,
        bitmap: &Bitmap,
        x: i32,
        y: i32,
        color: ColorId,
        opts: DrawOptions,
        mut lookup: Option<&mut dyn ControlLookup>,
    ) -> Result<(), DrawError> {
        let style = DrawStyle::new(0, LineStyle::Solid, color, opts);
        let (hot_x, hot_y) = bitmap.hotspot();
        let left = x - hot_x;
        let top = self.map_in(y - hot_y) - bitmap.height();
        let (width, height) = self.size();

        let local_ctx = self.draw_context(&style)?;
        let mut outside: Vec<(i32, i32)> = Vec::new();

        for i in 0..bitmap.width() {
            for j in 0..bitmap.height() {
                if !bitmap.is_set(i, j) {
                    continue;
                }
                let xx = left + i;
                let yy = top + j;
                if 0 <= xx && xx < width && 0 <= yy && yy < height {
                    if let Some(ctx) = &local_ctx {
                        ctx.rectangle(xx as f64, yy as f64, 1.0, 1.0);
                        ctx.fill()?;
                    }
                } else if opts.contains(DrawOptions::NO_CLIP) {
                    let (ox, oy) = self.origin();
                    outside.push((xx + ox, yy + oy));
                }
            }
        }
        self.queue_damage(None);

        if let Some(lookup) = lookup.as_deref_mut() {
            // One overlay pass per run of pixels landing on the same sibling;
            // starting a new pass wipes that sibling's previous cursor ink.
            let mut current: Option<(i32, i32)> = None;
            let mut sibling_ctx: Option<cairo::Context> = None;
            for (px, py) in outside {
                let Some(sibling) = lookup.control_at(px, py) else {
                    continue;
                };
                if current != Some(sibling.origin()) {
                    sibling_ctx = sibling.draw_context(&style)?;
                    sibling.queue_damage(None);
                    current = Some(sibling.origin());
                }
                if let Some(ctx) = &sibling_ctx {
                    let (ox, oy) = sibling.origin();
                    ctx.rectangle((px - ox) as f64, (py - oy) as f64, 1.0, 1.0);
                    ctx.fill()?;
                }
            }
        }
        Ok(())
    }
}
