//! Named page size presets
//!
//! All dimensions are portrait (width, height) pairs in points. The registry
//! is fixed at compile time; lookup by name fails for anything outside it.

use crate::error::{Error, Result};
use std::fmt;

/// A named page size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
    /// ISO A3 (842 x 1191 pt)
    A3,
    /// ISO A4 (595 x 842 pt)
    A4,
    /// ISO A5 (420 x 595 pt)
    A5,
    /// US Letter (612 x 792 pt)
    Letter,
    /// US Legal (612 x 1008 pt)
    Legal,
    /// US Statement (396 x 612 pt)
    Statement,
    /// US Executive (540 x 720 pt)
    Executive,
    /// US Tabloid (792 x 1224 pt)
    Tabloid,
    /// US Ledger (1224 x 792 pt)
    Ledger,
}

impl PageSize {
    /// Every defined preset, in registry order.
    pub const ALL: [PageSize; 9] = [
        PageSize::A3,
        PageSize::A4,
        PageSize::A5,
        PageSize::Letter,
        PageSize::Legal,
        PageSize::Statement,
        PageSize::Executive,
        PageSize::Tabloid,
        PageSize::Ledger,
    ];

    /// Portrait (width, height) in points.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PageSize::A3 => (842.0, 1191.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::A5 => (420.0, 595.0),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Statement => (396.0, 612.0),
            PageSize::Executive => (540.0, 720.0),
            PageSize::Tabloid => (792.0, 1224.0),
            PageSize::Ledger => (1224.0, 792.0),
        }
    }

    /// The registry name of this preset.
    pub fn name(self) -> &'static str {
        match self {
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
            PageSize::Statement => "Statement",
            PageSize::Executive => "Executive",
            PageSize::Tabloid => "Tabloid",
            PageSize::Ledger => "Ledger",
        }
    }

    /// Look up a preset by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPreset`] for a name outside the registry.
    /// Unknown names are a caller error, never a silent default.
    pub fn from_name(name: &str) -> Result<Self> {
        PageSize::ALL
            .into_iter()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| Error::UnknownPreset(name.to_string()))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        assert_eq!(PageSize::A4.dimensions(), (595.0, 842.0));
        assert_eq!(PageSize::Letter.dimensions(), (612.0, 792.0));
        assert_eq!(PageSize::Statement.dimensions(), (396.0, 612.0));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(PageSize::from_name("Statement").unwrap(), PageSize::Statement);
        assert_eq!(PageSize::from_name("A4").unwrap(), PageSize::A4);
    }

    #[test]
    fn test_from_name_unknown() {
        let err = PageSize::from_name("Postcard").unwrap_err();
        match err {
            Error::UnknownPreset(name) => assert_eq!(name, "Postcard"),
            other => panic!("expected UnknownPreset, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_total_over_registry() {
        for preset in PageSize::ALL {
            assert_eq!(PageSize::from_name(preset.name()).unwrap(), preset);
        }
    }

    #[test]
    fn test_all_dimensions_positive() {
        for preset in PageSize::ALL {
            let (w, h) = preset.dimensions();
            assert!(w > 0.0 && h > 0.0, "{preset} has non-positive extent");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(PageSize::Statement.to_string(), "Statement");
        assert_eq!(format!("{} (landscape)", PageSize::Statement), "Statement (landscape)");
    }
}
