//! Text drawing against a page
//!
//! A [`DrawingContext`] is bound to exactly one page. Each `draw_text` call
//! resolves its anchor to an absolute baseline position, registers the font
//! on the page, and appends instructions to the page's content log.

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};
use crate::graphics::Color;
use crate::page::Page;
use crate::text::{FontSpec, TextMeasurer};

/// Horizontal placement of text within a rectangle anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

/// Vertical placement of text within a rectangle anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// One of the nine alignment combinations for rectangle-anchored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl TextLayout {
    pub const TOP_LEFT: TextLayout = TextLayout::new(HorizontalAlign::Left, VerticalAlign::Top);
    pub const TOP_CENTER: TextLayout = TextLayout::new(HorizontalAlign::Center, VerticalAlign::Top);
    pub const TOP_RIGHT: TextLayout = TextLayout::new(HorizontalAlign::Right, VerticalAlign::Top);
    pub const CENTER_LEFT: TextLayout =
        TextLayout::new(HorizontalAlign::Left, VerticalAlign::Middle);
    pub const CENTER: TextLayout = TextLayout::new(HorizontalAlign::Center, VerticalAlign::Middle);
    pub const CENTER_RIGHT: TextLayout =
        TextLayout::new(HorizontalAlign::Right, VerticalAlign::Middle);
    pub const BOTTOM_LEFT: TextLayout =
        TextLayout::new(HorizontalAlign::Left, VerticalAlign::Bottom);
    pub const BOTTOM_CENTER: TextLayout =
        TextLayout::new(HorizontalAlign::Center, VerticalAlign::Bottom);
    pub const BOTTOM_RIGHT: TextLayout =
        TextLayout::new(HorizontalAlign::Right, VerticalAlign::Bottom);

    pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl Default for TextLayout {
    fn default() -> Self {
        TextLayout::TOP_LEFT
    }
}

/// Where a run of text is placed on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    /// Baseline starts at the point, left-aligned.
    Point(Point),
    /// Text is placed inside the rectangle per the layout; requires a
    /// configured text measurer.
    Rect(Rect, TextLayout),
}

impl TextAnchor {
    pub fn point(x: f64, y: f64) -> Self {
        TextAnchor::Point(Point::new(x, y))
    }

    pub fn rect(rect: Rect, layout: TextLayout) -> Self {
        TextAnchor::Rect(rect, layout)
    }
}

/// Drawing surface bound to one page.
pub struct DrawingContext<'a> {
    page: &'a mut Page,
    measurer: Option<&'a dyn TextMeasurer>,
}

impl<'a> DrawingContext<'a> {
    /// Bind a context to a page without a text measurer.
    ///
    /// Point-anchored draws work; rectangle-anchored draws fail with
    /// [`Error::LayoutUnavailable`].
    pub fn new(page: &'a mut Page) -> Self {
        Self {
            page,
            measurer: None,
        }
    }

    /// Bind a context with a text-measurement capability.
    pub fn with_measurer(page: &'a mut Page, measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            page,
            measurer: Some(measurer),
        }
    }

    /// Draw a run of text.
    ///
    /// Appends exactly one `DrawText` instruction to the page, preceded by
    /// at most one `SetFont` and one `SetFillColor` when either changed.
    ///
    /// # Errors
    ///
    /// [`Error::LayoutUnavailable`] for a rectangle anchor with no measurer
    /// configured. The page is left untouched: no instruction is appended
    /// and no font is registered.
    pub fn draw_text(
        &mut self,
        text: &str,
        font: &FontSpec,
        brush: Color,
        anchor: TextAnchor,
    ) -> Result<()> {
        let position = self.resolve_anchor(text, font, anchor)?;
        let font_id = self.page.register_font(font);
        self.page
            .content_mut()
            .push_draw_text(font_id, font.size, brush, text.to_string(), position);
        Ok(())
    }

    /// Resolve an anchor to an absolute baseline position.
    ///
    /// For a rectangle anchor the measured text box is pinned inside the
    /// rectangle per the layout and the baseline is the bottom edge of the
    /// placed box.
    fn resolve_anchor(&self, text: &str, font: &FontSpec, anchor: TextAnchor) -> Result<Point> {
        match anchor {
            TextAnchor::Point(point) => Ok(point),
            TextAnchor::Rect(rect, layout) => {
                let measurer = self.measurer.ok_or(Error::LayoutUnavailable)?;
                let size = measurer.measure(text, font);

                let x = match layout.horizontal {
                    HorizontalAlign::Left => rect.lower_left.x,
                    HorizontalAlign::Center => {
                        rect.lower_left.x + (rect.width() - size.width) / 2.0
                    }
                    HorizontalAlign::Right => rect.upper_right.x - size.width,
                };
                let y = match layout.vertical {
                    VerticalAlign::Top => rect.upper_right.y - size.height,
                    VerticalAlign::Middle => {
                        rect.lower_left.y + (rect.height() - size.height) / 2.0
                    }
                    VerticalAlign::Bottom => rect.lower_left.y,
                };

                Ok(Point::new(x, y))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Instruction;
    use crate::geometry::Orientation;
    use crate::page_size::PageSize;
    use crate::text::{StandardFontMetrics, TextSize};

    fn test_page() -> Page {
        Page::new(PageSize::Letter, Orientation::Portrait)
    }

    /// Measurer with fixed output, so alignment math is easy to check.
    struct FixedMeasurer(TextSize);

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, _text: &str, _font: &FontSpec) -> TextSize {
            self.0
        }
    }

    #[test]
    fn test_point_anchor_carries_point_verbatim() {
        let mut page = test_page();
        let mut ctx = DrawingContext::new(&mut page);
        ctx.draw_text(
            "Testy Test Test",
            &FontSpec::new("Arial", 12.0),
            Color::black(),
            TextAnchor::point(12.0, 12.0),
        )
        .unwrap();

        let inst = page.content().unwrap().instructions().last().unwrap();
        match inst {
            Instruction::DrawText { position, .. } => {
                assert_eq!(*position, Point::new(12.0, 12.0));
            }
            other => panic!("expected DrawText, got {other:?}"),
        }
    }

    #[test]
    fn test_rect_anchor_without_measurer_fails_cleanly() {
        let mut page = test_page();
        let mut ctx = DrawingContext::new(&mut page);
        let result = ctx.draw_text(
            "centered",
            &FontSpec::new("Times", 25.0),
            Color::dark_red(),
            TextAnchor::rect(
                Rect::from_position_and_size(0.0, 0.0, 396.0, 612.0),
                TextLayout::CENTER,
            ),
        );

        assert!(matches!(result, Err(Error::LayoutUnavailable)));
        // Page untouched: no partial instruction, no font registered
        assert!(page.content().is_none());
        assert!(page.fonts().is_empty());
    }

    #[test]
    fn test_rect_anchor_center() {
        let mut page = test_page();
        let measurer = FixedMeasurer(TextSize {
            width: 100.0,
            height: 20.0,
        });
        let mut ctx = DrawingContext::with_measurer(&mut page, &measurer);
        ctx.draw_text(
            "x",
            &FontSpec::new("Helvetica", 20.0),
            Color::black(),
            TextAnchor::rect(
                Rect::from_position_and_size(0.0, 0.0, 400.0, 200.0),
                TextLayout::CENTER,
            ),
        )
        .unwrap();

        let inst = page.content().unwrap().instructions().last().unwrap();
        match inst {
            Instruction::DrawText { position, .. } => {
                assert_eq!(*position, Point::new(150.0, 90.0));
            }
            other => panic!("expected DrawText, got {other:?}"),
        }
    }

    #[test]
    fn test_rect_anchor_corners() {
        let rect = Rect::from_position_and_size(10.0, 10.0, 400.0, 200.0);
        let measurer = FixedMeasurer(TextSize {
            width: 100.0,
            height: 20.0,
        });
        let cases = [
            (TextLayout::TOP_LEFT, Point::new(10.0, 190.0)),
            (TextLayout::TOP_RIGHT, Point::new(310.0, 190.0)),
            (TextLayout::BOTTOM_LEFT, Point::new(10.0, 10.0)),
            (TextLayout::BOTTOM_RIGHT, Point::new(310.0, 10.0)),
        ];

        for (layout, expected) in cases {
            let mut page = test_page();
            let mut ctx = DrawingContext::with_measurer(&mut page, &measurer);
            ctx.draw_text(
                "x",
                &FontSpec::new("Helvetica", 20.0),
                Color::black(),
                TextAnchor::rect(rect, layout),
            )
            .unwrap();

            let inst = page.content().unwrap().instructions().last().unwrap();
            match inst {
                Instruction::DrawText { position, .. } => {
                    assert_eq!(*position, expected, "layout {layout:?}");
                }
                other => panic!("expected DrawText, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_same_font_twice_registers_once() {
        let mut page = test_page();
        let mut ctx = DrawingContext::new(&mut page);
        let font = FontSpec::new("Helvetica", 12.0);
        ctx.draw_text("a", &font, Color::black(), TextAnchor::point(0.0, 0.0))
            .unwrap();
        ctx.draw_text("b", &font, Color::black(), TextAnchor::point(0.0, 20.0))
            .unwrap();

        assert_eq!(page.fonts().len(), 1);
        // Second draw appended only the DrawText
        assert_eq!(page.content().unwrap().instructions().len(), 4);
    }

    #[test]
    fn test_standard_metrics_integration() {
        let mut page = test_page();
        let metrics = StandardFontMetrics::new();
        let mut ctx = DrawingContext::with_measurer(&mut page, &metrics);
        let result = ctx.draw_text(
            "Statement",
            &FontSpec::new("Times", 25.0),
            Color::dark_red(),
            TextAnchor::rect(
                Rect::from_position_and_size(0.0, 0.0, 396.0, 612.0),
                TextLayout::CENTER,
            ),
        );

        assert!(result.is_ok());
        let inst = page.content().unwrap().instructions().last().unwrap();
        match inst {
            Instruction::DrawText { position, .. } => {
                // Centered inside the page, so strictly inside its bounds
                assert!(position.x > 0.0 && position.x < 396.0);
                assert!(position.y > 0.0 && position.y < 612.0);
            }
            other => panic!("expected DrawText, got {other:?}"),
        }
    }
}
