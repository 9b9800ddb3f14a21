//! Font sources for single-line text rasterization.
//!
//! `BlockFont` is a tiny built-in block font (no font files needed) and is what headless runs
//! and tests use, since its metrics are exact integers. `TrueTypeFont` wraps `fontdue` for real
//! kiosk deployments.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::graphics::{Canvas, Color};
use crate::ui::Rect;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font {path}: {reason}")]
    Parse { path: String, reason: &'static str },
}

/// Renders a single line of text.
pub trait Font {
    /// Height of a rendered line, in pixels.
    fn line_height(&self) -> u32;

    /// Width of `text` when rendered, in pixels.
    fn measure(&self, text: &str) -> u32;

    /// Renders `text` onto a transparent canvas of `measure(text)` x `line_height()`.
    fn render(&self, text: &str, color: Color) -> Canvas;
}

const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

/// Fixed-advance 3x5 block glyphs, scaled by an integer factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockFont {
    scale: u32,
}

impl BlockFont {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Picks the scale whose line height comes closest to `px` without exceeding it.
    pub fn for_pixel_size(px: u32) -> Self {
        Self::new(px / (GLYPH_H + 1))
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    fn advance(&self) -> u32 {
        (GLYPH_W + 1) * self.scale
    }
}

impl Font for BlockFont {
    fn line_height(&self) -> u32 {
        (GLYPH_H + 1) * self.scale
    }

    fn measure(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.advance()
    }

    fn render(&self, text: &str, color: Color) -> Canvas {
        let mut canvas = Canvas::new(self.measure(text), self.line_height());
        let mut gfx = canvas.renderer();
        let s = self.scale;
        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let x0 = i as u32 * self.advance();
            for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1u8 << (GLYPH_W - 1 - col)) == 0 {
                        continue;
                    }
                    gfx.fill_rect(Rect::new(x0 + col * s, row as u32 * s, s, s), color);
                }
            }
        }
        canvas
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '&' => [0b010, 0b101, 0b010, 0b101, 0b011],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '"' => [0b101, 0b101, 0b000, 0b000, 0b000],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010], // '?'
    }
}

/// A TrueType/OpenType font rasterized with `fontdue` at a fixed pixel size.
pub struct TrueTypeFont {
    font: fontdue::Font,
    px: f32,
    ascent: f32,
    line_height: u32,
}

impl TrueTypeFont {
    pub fn from_bytes(bytes: &[u8], px: f32, label: &str) -> Result<Self, FontError> {
        let settings = fontdue::FontSettings {
            scale: px,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(bytes, settings).map_err(|reason| FontError::Parse {
            path: label.to_string(),
            reason,
        })?;
        let (ascent, line_height) = match font.horizontal_line_metrics(px) {
            Some(m) => (m.ascent, (m.ascent - m.descent).ceil().max(1.0) as u32),
            None => (px, px.ceil() as u32),
        };
        Ok(Self {
            font,
            px,
            ascent,
            line_height,
        })
    }

    pub fn load(path: impl AsRef<Path>, px: f32) -> Result<Self, FontError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| FontError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes, px, &path.display().to_string())
    }
}

impl Font for TrueTypeFont {
    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn measure(&self, text: &str) -> u32 {
        let width: f32 = text
            .chars()
            .map(|c| self.font.metrics(c, self.px).advance_width)
            .sum();
        width.ceil() as u32
    }

    fn render(&self, text: &str, color: Color) -> Canvas {
        let mut canvas = Canvas::new(self.measure(text), self.line_height);
        let mut gfx = canvas.renderer();
        let baseline = self.ascent.round() as i32;
        let mut cursor_x = 0.0f32;

        for c in text.chars() {
            let (metrics, coverage) = self.font.rasterize(c, self.px);
            let glyph_x = cursor_x.round() as i32 + metrics.xmin;
            let glyph_y = baseline - metrics.ymin - metrics.height as i32;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let alpha = coverage[row * metrics.width + col];
                    if alpha == 0 {
                        continue;
                    }
                    let [r, g, b, a] = color;
                    let a = (a as u32 * alpha as u32 / 255) as u8;
                    gfx.blend_pixel(glyph_x + col as i32, glyph_y + row as i32, [r, g, b, a]);
                }
            }
            cursor_x += metrics.advance_width;
        }
        canvas
    }
}
