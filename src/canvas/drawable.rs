//! The interactive raster canvas.

use cairo::{Context, Format, ImageSurface, Operator};

use super::overlay::Overlay;
use crate::draw::color::ColorTable;
use crate::draw::dirty::DirtyTracker;
use crate::draw::style::{DrawOptions, DrawStyle};
use crate::input::{Action, CanvasHandler};
use crate::surface::DrawError;
use crate::util::{Rect, map_y};

/// Default screen resolution assumed for model-to-pixel conversions.
const SCREEN_DPI: f64 = 75.0;

/// Largest radius the raster backend will attempt to draw.
const MAX_RADIUS: f64 = 32767.0;

/// A raster drawing canvas with an overlay layer and damage tracking.
///
/// Owns its ARGB backing surface. Application coordinates use a bottom-left
/// origin; every renderer entry point maps the vertical axis at the boundary.
/// The widget layer blits the result to the display via
/// [`composite_onto`](Self::composite_onto) using the damage rectangles from
/// [`take_damage`](Self::take_damage).
pub struct Drawable {
    width: i32,
    height: i32,
    dpi: f64,
    /// Position of this control inside its parent window, for routing
    /// unclipped bitmap pixels to siblings.
    origin_x: i32,
    origin_y: i32,
    base: ImageSurface,
    backup: Option<ImageSurface>,
    pub(crate) overlay: Overlay,
    pub(crate) background: Option<ImageSurface>,
    pub(crate) colors: ColorTable,
    clip_rect: Option<Rect>,
    delay_update: bool,
    dirty: DirtyTracker,
    last_x: i32,
    last_y: i32,
}

/// Allocates an ARGB raster or dies trying. A canvas without a backing
/// surface cannot exist, so allocation failure is not recoverable.
fn alloc_surface(width: i32, height: i32) -> ImageSurface {
    match ImageSurface::create(Format::ARgb32, width, height) {
        Ok(surface) => surface,
        Err(e) => {
            log::error!("surface allocation failed ({width}x{height}): {e}");
            std::process::abort();
        }
    }
}

impl Drawable {
    /// Creates a canvas of the given pixel size, cleared to white.
    pub fn new(width: i32, height: i32) -> Result<Self, DrawError> {
        let mut drawable = Self {
            width,
            height,
            dpi: SCREEN_DPI,
            origin_x: 0,
            origin_y: 0,
            base: alloc_surface(width, height),
            backup: None,
            overlay: Overlay::default(),
            background: None,
            colors: ColorTable,
            clip_rect: None,
            delay_update: false,
            dirty: DirtyTracker::new(),
            last_x: 0,
            last_y: 0,
        };
        drawable.clear_base()?;
        Ok(drawable)
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn max_radius(&self) -> f64 {
        MAX_RADIUS
    }

    /// Records this control's position inside its parent window.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.origin_x = x;
        self.origin_y = y;
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Maps an application y coordinate into surface space. Self-inverse.
    pub(crate) fn map_in(&self, y: i32) -> i32 {
        map_y(self.height, y)
    }

    /// Maps a surface y coordinate back into application space.
    pub(crate) fn map_out(&self, y: i32) -> i32 {
        map_y(self.height, y)
    }

    /// Resizes the canvas, reallocating the backing surface when the size
    /// actually changes. The backup and overlay layers are dropped, the new
    /// surface is cleared, and the handler's `redraw` is invoked to repaint.
    /// Negative dimensions are ignored.
    pub fn set_size(
        &mut self,
        width: i32,
        height: i32,
        handler: &mut dyn CanvasHandler,
    ) -> Result<(), DrawError> {
        if width < 0 || height < 0 {
            log::warn!("ignoring resize to {width}x{height}");
            return Ok(());
        }
        if width == self.width && height == self.height {
            return Ok(());
        }
        log::debug!("resizing canvas {}x{} -> {width}x{height}", self.width, self.height);
        self.width = width;
        self.height = height;
        self.base = alloc_surface(width, height);
        self.backup = None;
        self.overlay.discard();
        self.clip_rect = None;
        self.clear_base()?;
        self.dirty.mark_full();
        handler.redraw(self, width, height);
        Ok(())
    }

    /// Snapshots the base surface so a later
    /// [`restore_image`](Self::restore_image) can roll drawing back.
    pub fn save_image(&mut self) -> Result<(), DrawError> {
        let backup = alloc_surface(self.width, self.height);
        let ctx = Context::new(&backup)?;
        ctx.set_source_surface(&self.base, 0.0, 0.0)?;
        ctx.paint()?;
        self.backup = Some(backup);
        Ok(())
    }

    /// Restores the most recent snapshot. Does nothing when none was taken.
    pub fn restore_image(&mut self) -> Result<(), DrawError> {
        if let Some(backup) = &self.backup {
            let ctx = Context::new(&self.base)?;
            ctx.set_source_surface(backup, 0.0, 0.0)?;
            ctx.set_operator(Operator::Source);
            ctx.paint()?;
            self.queue_damage(None);
        }
        Ok(())
    }

    /// While set, draw calls mutate the surface but accumulate no damage.
    /// Clearing it records one full-surface damage region so the batch is
    /// repainted in a single blit.
    pub fn set_delay_update(&mut self, delay: bool) {
        if !delay && self.delay_update {
            self.dirty.mark_full();
        }
        self.delay_update = delay;
    }

    pub fn delay_update(&self) -> bool {
        self.delay_update
    }

    /// Records damage for the widget layer to repaint. `None` marks the
    /// whole surface. Suppressed while updates are delayed.
    pub(crate) fn queue_damage(&mut self, rect: Option<Rect>) {
        if self.delay_update {
            return;
        }
        match rect {
            Some(r) => self.dirty.mark_rect(r),
            None => self.dirty.mark_full(),
        }
    }

    /// Drains the damage rectangles accumulated since the last call.
    pub fn take_damage(&mut self) -> Vec<Rect> {
        self.dirty.take_regions(self.width, self.height)
    }

    /// Blits the base surface and, when visible, the overlay into `ctx`,
    /// restricted to the damaged rectangle.
    pub fn composite_onto(&self, ctx: &Context, damage: Rect) -> Result<(), DrawError> {
        ctx.save()?;
        ctx.set_source_surface(&self.base, 0.0, 0.0)?;
        ctx.set_operator(Operator::Source);
        ctx.rectangle(
            damage.x as f64,
            damage.y as f64,
            damage.width as f64,
            damage.height as f64,
        );
        ctx.fill()?;
        if let Some(overlay) = self.overlay.visible_surface() {
            ctx.set_source_surface(overlay, 0.0, 0.0)?;
            ctx.set_operator(Operator::Over);
            ctx.rectangle(
                damage.x as f64,
                damage.y as f64,
                damage.width as f64,
                damage.height as f64,
            );
            ctx.fill()?;
        }
        ctx.restore()?;
        Ok(())
    }

    /// Restricts drawing to a rectangle (application coordinates) until the
    /// next [`clear`](crate::surface::DrawSurface::clear).
    pub(crate) fn set_clip(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let top = self.map_in(y) - h;
        self.clip_rect = Rect::new(x, top, w, h);
    }

    pub(crate) fn clear_clip(&mut self) {
        self.clip_rect = None;
    }

    /// Fills the whole base surface with the background color.
    pub(crate) fn clear_base(&mut self) -> Result<(), DrawError> {
        let ctx = Context::new(&self.base)?;
        ctx.set_operator(Operator::Source);
        let white = self.colors.resolve(crate::draw::color::WHITE);
        ctx.set_source_rgb(white.r, white.g, white.b);
        ctx.paint()?;
        Ok(())
    }

    /// Prepares a context for one drawing call: target selection (base or
    /// overlay), clip, line width, dash pattern, and source color.
    ///
    /// Returns `None` for overlay-erase calls, which only clear and hide the
    /// overlay layer without painting anything.
    pub(crate) fn draw_context(&mut self, style: &DrawStyle) -> Result<Option<Context>, DrawError> {
        if style
            .opts
            .intersects(DrawOptions::CURSOR_REMOVE | DrawOptions::CURSOR_QUIT)
        {
            self.overlay.hide()?;
            self.queue_damage(None);
            return Ok(None);
        }

        let ctx = if style.opts.contains(DrawOptions::CURSOR) {
            self.overlay.begin_pass(self.width, self.height)?
        } else {
            let ctx = Context::new(&self.base)?;
            ctx.set_operator(Operator::Source);
            ctx
        };

        if !style.opts.contains(DrawOptions::NO_CLIP) {
            if let Some(clip) = self.clip_rect {
                ctx.rectangle(
                    clip.x as f64,
                    clip.y as f64,
                    clip.width as f64,
                    clip.height as f64,
                );
                ctx.clip();
            }
        }

        ctx.set_line_width(style.screen_width());
        ctx.set_line_cap(cairo::LineCap::Butt);
        match style.line.dash_pattern() {
            Some(pattern) => ctx.set_dash(pattern, 0.0),
            None => ctx.set_dash(&[], 0.0),
        }
        let color = self.colors.resolve(style.color);
        ctx.set_source_rgb(color.r, color.g, color.b);
        Ok(Some(ctx))
    }

    /// A bare context on the base surface, for measurement-only work.
    pub(crate) fn measuring_context(&self) -> Result<Context, DrawError> {
        Ok(Context::new(&self.base)?)
    }

    /// Read access to the committed raster, e.g. for PNG export.
    pub(crate) fn base_surface(&self) -> &ImageSurface {
        &self.base
    }

    /// Forwards a pointer/keyboard action to the handler, mapping the
    /// position into application space and remembering it.
    pub fn dispatch_action(
        &mut self,
        handler: &mut dyn CanvasHandler,
        action: Action,
        x: i32,
        y: i32,
    ) {
        let mapped_y = self.map_out(y);
        self.last_x = x;
        self.last_y = mapped_y;
        log::trace!("action {action} at ({x},{mapped_y})");
        handler.action(self, action, x, mapped_y);
    }

    /// The last pointer position seen by [`dispatch_action`](Self::dispatch_action),
    /// in application coordinates.
    pub fn last_position(&self) -> (i32, i32) {
        (self.last_x, self.last_y)
    }
}
