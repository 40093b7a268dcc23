//! Text measurement
//!
//! Rectangle-anchored drawing needs to know how much space a run of text
//! occupies before a baseline can be chosen. That capability is the
//! [`TextMeasurer`] trait; [`StandardFontMetrics`] implements it from the
//! AFM width tables of the standard Type 1 fonts.

use crate::text::FontSpec;
use std::collections::HashMap;

/// Measured extent of a run of text, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    /// Advance width of the whole run
    pub width: f64,
    /// Height of the text box (scaled font ascent)
    pub height: f64,
}

/// Text-measurement capability.
///
/// Supplied to a [`DrawingContext`](crate::DrawingContext) to enable
/// rectangle-anchored text placement. Implementations must be pure: the
/// same `(text, font)` input always yields the same size.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextSize;
}

/// Character width information for one standard font.
/// All widths are in 1/1000 of a unit (font size 1.0).
struct FontWidths {
    widths: HashMap<char, u16>,
    default_width: u16,
    ascent: u16,
}

impl FontWidths {
    fn new(default_width: u16, ascent: u16) -> Self {
        Self {
            widths: HashMap::new(),
            default_width,
            ascent,
        }
    }

    fn with_widths(mut self, widths: &[(char, u16)]) -> Self {
        for &(ch, width) in widths {
            self.widths.insert(ch, width);
        }
        self
    }

    fn char_width(&self, ch: char) -> u16 {
        self.widths.get(&ch).copied().unwrap_or(self.default_width)
    }
}

lazy_static::lazy_static! {
    static ref FONT_WIDTHS: HashMap<&'static str, FontWidths> = {
        let mut table = HashMap::new();

        table.insert("Helvetica", FontWidths::new(556, 718).with_widths(&[
            (' ', 278), ('!', 278), ('"', 355), ('#', 556), ('$', 556), ('%', 889),
            ('&', 667), ('\'', 191), ('(', 333), (')', 333), ('*', 389), ('+', 584),
            (',', 278), ('-', 333), ('.', 278), ('/', 278), ('0', 556), ('1', 556),
            ('2', 556), ('3', 556), ('4', 556), ('5', 556), ('6', 556), ('7', 556),
            ('8', 556), ('9', 556), (':', 278), (';', 278), ('<', 584), ('=', 584),
            ('>', 584), ('?', 556), ('@', 1015), ('A', 667), ('B', 667), ('C', 722),
            ('D', 722), ('E', 667), ('F', 611), ('G', 778), ('H', 722), ('I', 278),
            ('J', 500), ('K', 667), ('L', 556), ('M', 833), ('N', 722), ('O', 778),
            ('P', 667), ('Q', 778), ('R', 722), ('S', 667), ('T', 611), ('U', 722),
            ('V', 667), ('W', 944), ('X', 667), ('Y', 667), ('Z', 611), ('[', 278),
            ('\\', 278), (']', 278), ('^', 469), ('_', 556), ('`', 333), ('a', 556),
            ('b', 556), ('c', 500), ('d', 556), ('e', 556), ('f', 278), ('g', 556),
            ('h', 556), ('i', 222), ('j', 222), ('k', 500), ('l', 222), ('m', 833),
            ('n', 556), ('o', 556), ('p', 556), ('q', 556), ('r', 333), ('s', 500),
            ('t', 278), ('u', 556), ('v', 500), ('w', 722), ('x', 500), ('y', 500),
            ('z', 500), ('{', 334), ('|', 260), ('}', 334), ('~', 584),
        ]));

        table.insert("Helvetica-Bold", FontWidths::new(611, 718).with_widths(&[
            (' ', 278), ('!', 333), ('"', 474), ('#', 556), ('$', 556), ('%', 889),
            ('&', 722), ('\'', 238), ('(', 333), (')', 333), ('*', 389), ('+', 584),
            (',', 278), ('-', 333), ('.', 278), ('/', 278), ('0', 556), ('1', 556),
            ('2', 556), ('3', 556), ('4', 556), ('5', 556), ('6', 556), ('7', 556),
            ('8', 556), ('9', 556), (':', 333), (';', 333), ('<', 584), ('=', 584),
            ('>', 584), ('?', 611), ('@', 975), ('A', 722), ('B', 722), ('C', 722),
            ('D', 722), ('E', 667), ('F', 611), ('G', 778), ('H', 722), ('I', 278),
            ('J', 556), ('K', 722), ('L', 611), ('M', 833), ('N', 722), ('O', 778),
            ('P', 667), ('Q', 778), ('R', 722), ('S', 667), ('T', 611), ('U', 722),
            ('V', 667), ('W', 944), ('X', 667), ('Y', 667), ('Z', 611), ('[', 333),
            ('\\', 278), (']', 333), ('^', 584), ('_', 556), ('`', 333), ('a', 556),
            ('b', 611), ('c', 556), ('d', 611), ('e', 556), ('f', 333), ('g', 611),
            ('h', 611), ('i', 278), ('j', 278), ('k', 556), ('l', 278), ('m', 889),
            ('n', 611), ('o', 611), ('p', 611), ('q', 611), ('r', 389), ('s', 556),
            ('t', 333), ('u', 611), ('v', 556), ('w', 778), ('x', 556), ('y', 556),
            ('z', 500), ('{', 389), ('|', 280), ('}', 389), ('~', 584),
        ]));

        table.insert("Times-Roman", FontWidths::new(500, 683).with_widths(&[
            (' ', 250), ('!', 333), ('"', 408), ('#', 500), ('$', 500), ('%', 833),
            ('&', 778), ('\'', 180), ('(', 333), (')', 333), ('*', 500), ('+', 564),
            (',', 250), ('-', 333), ('.', 250), ('/', 278), ('0', 500), ('1', 500),
            ('2', 500), ('3', 500), ('4', 500), ('5', 500), ('6', 500), ('7', 500),
            ('8', 500), ('9', 500), (':', 278), (';', 278), ('<', 564), ('=', 564),
            ('>', 564), ('?', 444), ('@', 921), ('A', 722), ('B', 667), ('C', 667),
            ('D', 722), ('E', 611), ('F', 556), ('G', 722), ('H', 722), ('I', 333),
            ('J', 389), ('K', 722), ('L', 611), ('M', 889), ('N', 722), ('O', 722),
            ('P', 556), ('Q', 722), ('R', 667), ('S', 556), ('T', 611), ('U', 722),
            ('V', 722), ('W', 944), ('X', 722), ('Y', 722), ('Z', 611), ('[', 333),
            ('\\', 278), (']', 333), ('^', 469), ('_', 500), ('`', 333), ('a', 444),
            ('b', 500), ('c', 444), ('d', 500), ('e', 444), ('f', 333), ('g', 500),
            ('h', 500), ('i', 278), ('j', 278), ('k', 500), ('l', 278), ('m', 778),
            ('n', 500), ('o', 500), ('p', 500), ('q', 500), ('r', 333), ('s', 389),
            ('t', 278), ('u', 500), ('v', 500), ('w', 722), ('x', 500), ('y', 500),
            ('z', 444), ('{', 480), ('|', 200), ('}', 480), ('~', 541),
        ]));

        // Courier is fixed-pitch
        table.insert("Courier", FontWidths::new(600, 629));

        table
    };
}

fn widths_for(base_font: &str) -> &'static FontWidths {
    // Oblique/italic variants share their upright tables; the bold Times and
    // Courier faces are close enough for layout purposes, matching what the
    // upstream AFM subset here carries.
    let key = match base_font {
        "Helvetica" | "Helvetica-Oblique" => "Helvetica",
        "Helvetica-Bold" | "Helvetica-BoldOblique" => "Helvetica-Bold",
        "Times-Roman" | "Times-Bold" | "Times-Italic" | "Times-BoldItalic" => "Times-Roman",
        _ => "Courier",
    };
    &FONT_WIDTHS[key]
}

/// Built-in [`TextMeasurer`] backed by the standard Type 1 width tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontMetrics;

impl StandardFontMetrics {
    pub fn new() -> Self {
        StandardFontMetrics
    }
}

impl TextMeasurer for StandardFontMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> TextSize {
        if font.is_symbolic() {
            // No width tables for the symbol faces; approximate
            return TextSize {
                width: text.chars().count() as f64 * font.size * 0.6,
                height: font.size * 0.7,
            };
        }

        let widths = widths_for(font.base_font());
        let width_units: u32 = text
            .chars()
            .map(|ch| widths.char_width(ch) as u32)
            .sum();

        TextSize {
            width: (width_units as f64 / 1000.0) * font.size,
            height: (widths.ascent as f64 / 1000.0) * font.size,
        }
    }
}
