//! Color identifiers and the resolver that turns them into RGB components.

/// Opaque color identifier handed around by the application layer.
///
/// The identifier packs the color as `0xRRGGBB`. The packing is an
/// implementation detail of [`ColorTable`]; callers should treat the value as
/// opaque and obtain it from [`ColorId::from_rgb`] or the predefined
/// constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorId(pub u32);

impl ColorId {
    /// Builds a color identifier from 8-bit RGB components.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }
}

/// Black, the default drawing color.
pub const BLACK: ColorId = ColorId(0x000000);

/// White. Doubles as the background color; the print device suppresses any
/// draw call issued with it.
pub const WHITE: ColorId = ColorId(0xFFFFFF);

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    ///
    /// All values should be in the range 0.0 to 1.0.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

const NUM_GRAYS: i32 = 16;

/// Resolves opaque color identifiers to normalized RGB components.
///
/// The current table is a degenerate identity mapping (the identifier already
/// packs the RGB value); it exists as a type so a palette-backed resolver can
/// be substituted without touching call sites.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorTable;

impl ColorTable {
    /// Resolves a color identifier to its normal rendering color.
    pub fn resolve(&self, id: ColorId) -> Color {
        let r = ((id.0 >> 16) & 0xFF) as f64 / 255.0;
        let g = ((id.0 >> 8) & 0xFF) as f64 / 255.0;
        let b = (id.0 & 0xFF) as f64 / 255.0;
        Color { r, g, b, a: 1.0 }
    }

    /// Resolves a color identifier for inverted rendering, e.g. when drawing
    /// against a dark selection highlight. Components are complemented
    /// against white.
    pub fn resolve_inverted(&self, id: ColorId) -> Color {
        let normal = self.resolve(id);
        Color {
            r: 1.0 - normal.r,
            g: 1.0 - normal.g,
            b: 1.0 - normal.b,
            a: 1.0,
        }
    }

    /// Returns the identifier for a gray of the given brightness percentage.
    ///
    /// Grays are quantized to sixteen steps; values at or beyond the extremes
    /// collapse to black and white respectively.
    pub fn gray(&self, percent: i32) -> ColorId {
        let n = (percent * (NUM_GRAYS + 1)) / 100;
        if n <= 0 {
            BLACK
        } else if n > NUM_GRAYS {
            WHITE
        } else {
            let level = ((n * 256) / NUM_GRAYS).min(255) as u8;
            ColorId::from_rgb(level, level, level)
        }
    }
}
