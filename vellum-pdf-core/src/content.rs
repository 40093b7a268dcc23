//! Page content: an append-only log of drawing instructions
//!
//! The drawing context appends typed instructions; nothing is ever removed
//! or reordered. At save time the log is lowered to the content-stream
//! operator syntax in a single pass.

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::graphics::Color;
use crate::text::encode_win_ansi;
use std::fmt::Write;

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Select the page font resource at `font` (by registration index) at
    /// the given point size for subsequent text.
    SetFont { font: usize, size: f64 },
    /// Select the fill color for subsequent text.
    SetFillColor(Color),
    /// Show `text` with its baseline starting at `position`.
    DrawText { text: String, position: Point },
}

/// The instruction log owned by one page.
#[derive(Debug, Clone, Default)]
pub struct ContentStream {
    instructions: Vec<Instruction>,
    last_font: Option<(usize, u64)>,
    last_color: Option<Color>,
}

impl ContentStream {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append one text-drawing operation.
    ///
    /// Emits a `SetFont`/`SetFillColor` only when the requested state
    /// differs from the last instruction appended to this page, then exactly
    /// one `DrawText`.
    pub(crate) fn push_draw_text(
        &mut self,
        font: usize,
        size: f64,
        color: Color,
        text: String,
        position: Point,
    ) {
        if self.last_font != Some((font, size.to_bits())) {
            self.instructions.push(Instruction::SetFont { font, size });
            self.last_font = Some((font, size.to_bits()));
        }
        if self.last_color != Some(color) {
            self.instructions.push(Instruction::SetFillColor(color));
            self.last_color = Some(color);
        }
        self.instructions.push(Instruction::DrawText { text, position });
    }

    /// The instructions in append order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Largest font resource index any instruction references.
    pub(crate) fn max_font_index(&self) -> Option<usize> {
        self.instructions
            .iter()
            .filter_map(|inst| match inst {
                Instruction::SetFont { font, .. } => Some(*font),
                _ => None,
            })
            .max()
    }

    /// Lower the instruction log to content-stream operators.
    pub(crate) fn encode(&self) -> Result<Vec<u8>> {
        let mut ops = String::new();
        let mut current_font: Option<(usize, f64)> = None;

        for inst in &self.instructions {
            match inst {
                Instruction::SetFont { font, size } => {
                    current_font = Some((*font, *size));
                }
                Instruction::SetFillColor(color) => match color {
                    Color::Rgb(r, g, b) => {
                        writeln!(&mut ops, "{r:.3} {g:.3} {b:.3} rg").unwrap();
                    }
                    Color::Gray(g) => {
                        writeln!(&mut ops, "{g:.3} g").unwrap();
                    }
                    Color::Cmyk(c, m, y, k) => {
                        writeln!(&mut ops, "{c:.3} {m:.3} {y:.3} {k:.3} k").unwrap();
                    }
                },
                Instruction::DrawText { text, position } => {
                    let (font, size) = current_font.ok_or_else(|| {
                        Error::InternalConsistency(
                            "DrawText instruction with no font selected".to_string(),
                        )
                    })?;

                    ops.push_str("BT\n");
                    writeln!(&mut ops, "/F{font} {} Tf", format_number(size)).unwrap();
                    writeln!(
                        &mut ops,
                        "{:.2} {:.2} Td",
                        position.x, position.y
                    )
                    .unwrap();
                    push_literal_string(&mut ops, text);
                    ops.push_str(" Tj\n");
                    ops.push_str("ET\n");
                }
            }
        }

        Ok(ops.into_bytes())
    }
}

/// Append `text` as a parenthesized literal string, WinAnsi-encoded.
fn push_literal_string(ops: &mut String, text: &str) {
    ops.push('(');
    for &byte in &encode_win_ansi(text) {
        match byte {
            b'(' => ops.push_str("\\("),
            b')' => ops.push_str("\\)"),
            b'\\' => ops.push_str("\\\\"),
            b'\n' => ops.push_str("\\n"),
            b'\r' => ops.push_str("\\r"),
            b'\t' => ops.push_str("\\t"),
            0x20..=0x7E => ops.push(byte as char),
            _ => write!(ops, "\\{byte:03o}").unwrap(),
        }
    }
    ops.push(')');
}

/// Render a number without a trailing fractional part when it is integral.
pub(crate) fn format_number(value: f64) -> String {
    let formatted = format!("{value:.6}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
