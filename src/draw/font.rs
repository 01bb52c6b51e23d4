//! Font descriptors, the standard-font registry, and Pango layout glue.

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, weight, and style.
/// This descriptor is passed through the rendering pipeline so the same font
/// is used for measuring and painting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Serif", "Sans", "JetBrains Mono")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size"
    /// Example: "Serif Bold 32" or "Sans Italic 24"
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        // Add style if not normal
        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        // Add weight if not normal
        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        // Add size
        parts.push(format!("{}", size.round() as i32));

        parts.join(" ")
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Generic typeface classes for the standard fonts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontFace {
    Serif,
    SansSerif,
}

impl FontFace {
    fn family(self) -> &'static str {
        match self {
            FontFace::Serif => "Serif",
            FontFace::SansSerif => "Sans",
        }
    }
}

/// Process-wide registry of the standard fonts plus the current selection.
///
/// The eight standard fonts (serif/sans, regular/bold, upright/italic) are
/// built once at construction. The registry is created explicitly by the
/// application and passed by reference wherever fonts are needed; there is no
/// hidden global state. The "current" slot holds the font-selection dialog's
/// last choice.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    standard: [FontDescriptor; 8],
    current: FontDescriptor,
}

impl FontRegistry {
    /// Builds the registry with the eight standard fonts. The current font
    /// starts as upright sans-serif regular.
    pub fn new() -> Self {
        let build = |face: FontFace, bold: bool, italic: bool| {
            FontDescriptor::new(
                face.family().to_string(),
                if bold { "bold" } else { "normal" }.to_string(),
                if italic { "italic" } else { "normal" }.to_string(),
            )
        };
        let standard = [
            build(FontFace::Serif, false, false),
            build(FontFace::Serif, false, true),
            build(FontFace::Serif, true, false),
            build(FontFace::Serif, true, true),
            build(FontFace::SansSerif, false, false),
            build(FontFace::SansSerif, false, true),
            build(FontFace::SansSerif, true, false),
            build(FontFace::SansSerif, true, true),
        ];
        let current = standard[4].clone();
        Self { standard, current }
    }

    /// Returns the pre-built standard font for the given face and variant.
    pub fn standard(&self, face: FontFace, bold: bool, italic: bool) -> &FontDescriptor {
        let base = match face {
            FontFace::Serif => 0,
            FontFace::SansSerif => 4,
        };
        let index = base + (bold as usize) * 2 + (italic as usize);
        &self.standard[index]
    }

    /// The font most recently chosen through the font-selection dialog.
    pub fn current(&self) -> &FontDescriptor {
        &self.current
    }

    /// Records a new current font.
    pub fn set_current(&mut self, font: FontDescriptor) {
        self.current = font;
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Text extents and baseline information for one laid-out string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextMetrics {
    /// Layout width in device pixels.
    pub width: i32,
    /// Layout height in device pixels.
    pub height: i32,
    /// Distance from the layout top to the baseline.
    pub ascent: i32,
    /// Distance from the baseline to the layout bottom.
    pub descent: i32,
    /// Baseline offset in device pixels (equal to the ascent for single-line
    /// text).
    pub baseline: i32,
}

/// Realizes a Pango layout for `text` on the given context and measures it.
///
/// The returned layout is positioned at the context's current point when
/// shown; callers apply their own transform first.
pub(crate) fn realize_layout(
    ctx: &cairo::Context,
    font: &FontDescriptor,
    size: f64,
    text: &str,
) -> (pango::Layout, TextMetrics) {
    let layout = pangocairo::functions::create_layout(ctx);

    let desc = pango::FontDescription::from_string(&font.to_pango_string(size));
    layout.set_font_description(Some(&desc));
    layout.set_text(text);

    let (width, height) = layout.pixel_size();
    let baseline = layout.baseline() / pango::SCALE;
    let metrics = TextMetrics {
        width,
        height,
        ascent: baseline,
        descent: height - baseline,
        baseline,
    };
    (layout, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pango_string_bold() {
        let font = FontDescriptor::new(
            "Sans".to_string(),
            "bold".to_string(),
            "normal".to_string(),
        );
        assert_eq!(font.to_pango_string(32.0), "Sans Bold 32");
    }

    #[test]
    fn test_pango_string_italic() {
        let font = FontDescriptor::new(
            "Monospace".to_string(),
            "normal".to_string(),
            "italic".to_string(),
        );
        assert_eq!(font.to_pango_string(24.0), "Monospace Italic 24");
    }

    #[test]
    fn test_pango_string_custom() {
        let font = FontDescriptor::new(
            "JetBrains Mono".to_string(),
            "light".to_string(),
            "normal".to_string(),
        );
        assert_eq!(font.to_pango_string(16.0), "JetBrains Mono Light 16");
    }

    #[test]
    fn registry_builds_all_standard_variants() {
        let registry = FontRegistry::new();
        let serif_bold_italic = registry.standard(FontFace::Serif, true, true);
        assert_eq!(serif_bold_italic.family, "Serif");
        assert_eq!(serif_bold_italic.weight, "bold");
        assert_eq!(serif_bold_italic.style, "italic");

        let sans_regular = registry.standard(FontFace::SansSerif, false, false);
        assert_eq!(sans_regular.family, "Sans");
        assert_eq!(sans_regular.weight, "normal");
        assert_eq!(sans_regular.style, "normal");
    }

    #[test]
    fn registry_tracks_current_font() {
        let mut registry = FontRegistry::new();
        assert_eq!(registry.current().family, "Sans");

        let chosen = FontDescriptor::new(
            "Liberation Serif".to_string(),
            "bold".to_string(),
            "normal".to_string(),
        );
        registry.set_current(chosen.clone());
        assert_eq!(registry.current(), &chosen);
    }
}
