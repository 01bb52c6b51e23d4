//! Raster canvas integration tests: overlay compositing, snapshots,
//! bitmap bleed, and PNG export.

use cadcanvas::{
    Bitmap, BLACK, ColorId, ControlLookup, CornerType, DrawOptions, DrawStyle, Drawable,
    DrawSurface, LineStyle, PolygonVertex,
};
use cairo::{Context, Format, ImageSurface};

/// Composites the drawable into a fresh image surface and returns it.
fn composite(drawable: &Drawable) -> ImageSurface {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = drawable.size();
    let target = ImageSurface::create(Format::ARgb32, w, h).unwrap();
    let ctx = Context::new(&target).unwrap();
    let full = cadcanvas::util::Rect::new(0, 0, w, h).unwrap();
    drawable.composite_onto(&ctx, full).unwrap();
    drop(ctx);
    target
}

/// Reads back one pixel as (r, g, b). ARGB32 is stored native-endian.
fn pixel(surface: &mut ImageSurface, x: i32, y: i32) -> (u8, u8, u8) {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let off = y as usize * stride + x as usize * 4;
    (data[off + 2], data[off + 1], data[off])
}

#[test]
fn line_lands_on_flipped_row() {
    let mut canvas = Drawable::new(40, 40).unwrap();
    canvas
        .line(2, 10, 20, 10, &DrawStyle::solid(BLACK))
        .unwrap();

    let mut out = composite(&canvas);
    // Application y=10 maps to surface row 29.
    assert_eq!(pixel(&mut out, 10, 29), (0, 0, 0));
    assert_eq!(pixel(&mut out, 10, 10), (255, 255, 255));
}

#[test]
fn overlay_ink_leaves_base_untouched() {
    let mut canvas = Drawable::new(40, 40).unwrap();
    canvas.line(0, 20, 39, 20, &DrawStyle::solid(BLACK)).unwrap();

    let red = ColorId::from_rgb(255, 0, 0);
    canvas
        .filled_rectangle(5, 25, 10, 10, red, DrawOptions::CURSOR | DrawOptions::OPAQUE)
        .unwrap();

    let mut out = composite(&canvas);
    // Cursor ink composites above the base; the rect covers rows 4..14.
    assert_eq!(pixel(&mut out, 8, 8), (255, 0, 0));
    // Base line (application y=20, row 19) still present.
    assert_eq!(pixel(&mut out, 10, 19), (0, 0, 0));

    // Erasing the overlay restores the untouched base everywhere.
    canvas
        .point(0, 0, red, DrawOptions::CURSOR_REMOVE)
        .unwrap();
    let mut out = composite(&canvas);
    assert_eq!(pixel(&mut out, 8, 8), (255, 255, 255));
    assert_eq!(pixel(&mut out, 10, 19), (0, 0, 0));
}

#[test]
fn save_and_restore_round_trips_the_raster() {
    let mut canvas = Drawable::new(30, 30).unwrap();
    canvas.line(0, 15, 29, 15, &DrawStyle::solid(BLACK)).unwrap();
    canvas.save_image().unwrap();

    canvas.clear().unwrap();
    let mut out = composite(&canvas);
    assert_eq!(pixel(&mut out, 14, 14), (255, 255, 255));

    canvas.restore_image().unwrap();
    let mut out = composite(&canvas);
    assert_eq!(pixel(&mut out, 14, 14), (0, 0, 0));
}

#[test]
fn filled_rounded_polygon_inks_its_interior() {
    let mut canvas = Drawable::new(60, 60).unwrap();
    let square = [
        PolygonVertex::new(10, 10, CornerType::Rounded),
        PolygonVertex::new(50, 10, CornerType::Rounded),
        PolygonVertex::new(50, 50, CornerType::Rounded),
        PolygonVertex::new(10, 50, CornerType::Rounded),
    ];
    let style = DrawStyle::new(1, LineStyle::Solid, BLACK, DrawOptions::empty());
    canvas.polygon(&square, &style, true, false).unwrap();

    let mut out = composite(&canvas);
    assert_eq!(pixel(&mut out, 30, 30), (0, 0, 0));
    assert_eq!(pixel(&mut out, 2, 2), (255, 255, 255));
}

#[test]
fn clip_confines_drawing_until_clear() {
    let mut canvas = Drawable::new(40, 40).unwrap();
    canvas.clip(0, 0, 10, 10).unwrap();
    canvas.line(0, 5, 39, 5, &DrawStyle::solid(BLACK)).unwrap();

    let mut out = composite(&canvas);
    // Row for y=5 is 34; the clip covers application-space (0,0)-(10,10).
    assert_eq!(pixel(&mut out, 5, 34), (0, 0, 0));
    assert_eq!(pixel(&mut out, 30, 34), (255, 255, 255));

    canvas.clear().unwrap();
    canvas.line(0, 5, 39, 5, &DrawStyle::solid(BLACK)).unwrap();
    let mut out = composite(&canvas);
    assert_eq!(pixel(&mut out, 30, 34), (0, 0, 0));
}

struct SiblingLookup {
    sibling: Drawable,
}

impl ControlLookup for SiblingLookup {
    fn control_at(&mut self, x: i32, y: i32) -> Option<&mut Drawable> {
        let (ox, oy) = self.sibling.origin();
        let (w, h) = self.sibling.size();
        if x >= ox && x < ox + w && y >= oy && y < oy + h {
            Some(&mut self.sibling)
        } else {
            None
        }
    }
}

#[test]
fn unclipped_bitmap_pixels_bleed_into_sibling() {
    let mut canvas = Drawable::new(40, 40).unwrap();
    canvas.set_origin(0, 0);
    let mut sibling = Drawable::new(40, 40).unwrap();
    sibling.set_origin(40, 0);
    let mut lookup = SiblingLookup { sibling };

    // 2x2 solid bitmap straddling the right edge.
    let bitmap = Bitmap::new(2, 2, 0, 0, vec![0b11, 0b11]).unwrap();
    canvas
        .draw_bitmap(
            &bitmap,
            39,
            5,
            BLACK,
            DrawOptions::NO_CLIP,
            Some(&mut lookup),
        )
        .unwrap();

    // Rows for the bitmap: top = (39 - 5) - 2 = 32.
    let mut own = composite(&canvas);
    assert_eq!(pixel(&mut own, 39, 32), (0, 0, 0));

    let mut other = composite(&lookup.sibling);
    assert_eq!(pixel(&mut other, 0, 32), (0, 0, 0));
    assert_eq!(pixel(&mut other, 0, 33), (0, 0, 0));
    assert_eq!(pixel(&mut other, 5, 32), (255, 255, 255));
}

#[test]
fn clipped_bitmap_pixels_stop_at_the_edge() {
    let mut canvas = Drawable::new(40, 40).unwrap();
    let mut sibling = Drawable::new(40, 40).unwrap();
    sibling.set_origin(40, 0);
    let mut lookup = SiblingLookup { sibling };

    let bitmap = Bitmap::new(2, 2, 0, 0, vec![0b11, 0b11]).unwrap();
    canvas
        .draw_bitmap(&bitmap, 39, 5, BLACK, DrawOptions::empty(), Some(&mut lookup))
        .unwrap();

    let mut other = composite(&lookup.sibling);
    assert_eq!(pixel(&mut other, 0, 32), (255, 255, 255));
}

#[test]
fn png_export_writes_a_loadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.png");

    let mut canvas = Drawable::new(32, 32).unwrap();
    canvas.line(0, 16, 31, 16, &DrawStyle::solid(BLACK)).unwrap();
    canvas.write_png(&path).unwrap();

    assert!(path.metadata().unwrap().len() > 0);

    // The exported file is valid PNG: loading it back succeeds.
    let mut other = Drawable::new(32, 32).unwrap();
    other.set_background(Some(&path)).unwrap();
    other.show_background(0, 0, 0, 0.0, 0).unwrap();
}
