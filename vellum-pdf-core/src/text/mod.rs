mod encoding;
mod metrics;

pub use encoding::encode_win_ansi;
pub use metrics::{StandardFontMetrics, TextMeasurer, TextSize};

use bitflags::bitflags;
use std::hash::{Hash, Hasher};

bitflags! {
    /// Style flags for a font request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontStyle: u8 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
    }
}

impl FontStyle {
    /// No style flags set.
    pub const REGULAR: FontStyle = FontStyle::empty();
}

/// A font request: family name, point size, and style flags.
///
/// Drawing calls carrying value-equal specs on the same page share one font
/// resource entry, so `FontSpec` doubles as the dedup key. Equality and
/// hashing treat the size by its bit pattern, which is exact for the values
/// callers actually pass.
#[derive(Debug, Clone)]
pub struct FontSpec {
    /// Font family, e.g. "Helvetica", "Times", "Courier"
    pub family: String,
    /// Point size
    pub size: f64,
    /// Style flags
    pub style: FontStyle,
}

impl FontSpec {
    /// A regular-style font of the given family and size.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            style: FontStyle::REGULAR,
        }
    }

    /// A font with explicit style flags.
    pub fn with_style(family: impl Into<String>, size: f64, style: FontStyle) -> Self {
        Self {
            family: family.into(),
            size,
            style,
        }
    }

    /// Resolve this spec to a base-14 PostScript font name.
    pub fn base_font(&self) -> &'static str {
        base_font_name(&self.family, self.style)
    }

    /// Whether the resolved font is symbolic (no text encoding applies).
    pub fn is_symbolic(&self) -> bool {
        matches!(self.base_font(), "Symbol" | "ZapfDingbats")
    }
}

impl PartialEq for FontSpec {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.style == other.style
            && self.size.to_bits() == other.size.to_bits()
    }
}

impl Eq for FontSpec {}

impl Hash for FontSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.style.hash(state);
        self.size.to_bits().hash(state);
    }
}

/// Map a family name and style flags to a base-14 PostScript font name.
///
/// Resolution is total: families outside the standard set substitute
/// Helvetica, so a reader can always select something. Symbolic families
/// ignore style flags because no styled variants exist for them.
pub fn base_font_name(family: &str, style: FontStyle) -> &'static str {
    let bold = style.contains(FontStyle::BOLD);
    let italic = style.contains(FontStyle::ITALIC);

    match normalize_family(family) {
        Family::Helvetica => match (bold, italic) {
            (false, false) => "Helvetica",
            (true, false) => "Helvetica-Bold",
            (false, true) => "Helvetica-Oblique",
            (true, true) => "Helvetica-BoldOblique",
        },
        Family::Times => match (bold, italic) {
            (false, false) => "Times-Roman",
            (true, false) => "Times-Bold",
            (false, true) => "Times-Italic",
            (true, true) => "Times-BoldItalic",
        },
        Family::Courier => match (bold, italic) {
            (false, false) => "Courier",
            (true, false) => "Courier-Bold",
            (false, true) => "Courier-Oblique",
            (true, true) => "Courier-BoldOblique",
        },
        Family::Symbol => "Symbol",
        Family::ZapfDingbats => "ZapfDingbats",
    }
}

enum Family {
    Helvetica,
    Times,
    Courier,
    Symbol,
    ZapfDingbats,
}

fn normalize_family(family: &str) -> Family {
    // Common aliases from the Windows/CSS world map onto the metric-compatible
    // standard family.
    match family.to_ascii_lowercase().as_str() {
        "helvetica" | "arial" | "sans-serif" => Family::Helvetica,
        "times" | "times-roman" | "times new roman" | "serif" => Family::Times,
        "courier" | "courier new" | "monospace" => Family::Courier,
        "symbol" => Family::Symbol,
        "zapfdingbats" | "zapf dingbats" => Family::ZapfDingbats,
        _ => Family::Helvetica,
    }
}
