use crate::graphics::{Canvas, Color};
use crate::font::Font;

/// Default marker standing in for a line break inside a single line of source text.
pub const LINE_BREAK_MARKER: char = '`';

/// Renders multi-line text into the smallest canvas that holds every line.
///
/// Lines are separated by a marker character instead of `\n`, so an activity list can keep
/// one entry per physical line. Each rendered line is centered horizontally; there is no
/// word wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    pub line_spacing: u32,
    pub marker: char,
}

impl TextRenderer {
    pub fn new(line_spacing: u32) -> Self {
        Self {
            line_spacing,
            marker: LINE_BREAK_MARKER,
        }
    }

    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn lines<'t>(&self, text: &'t str) -> std::str::Split<'t, char> {
        text.split(self.marker)
    }

    pub fn render(&self, text: &str, font: &dyn Font, color: Color) -> Canvas {
        let lines: Vec<Canvas> = self.lines(text).map(|line| font.render(line, color)).collect();

        let width = lines.iter().map(Canvas::width).max().unwrap_or(0);
        let gaps = lines.len().saturating_sub(1) as u32 * self.line_spacing;
        let height = lines.iter().map(Canvas::height).sum::<u32>() + gaps;

        let mut out = Canvas::new(width, height);
        let mut gfx = out.renderer();
        let mut y = 0u32;
        for line in &lines {
            let x = (width - line.width()) / 2;
            gfx.blit(line, x as i32, y as i32);
            y += line.height() + self.line_spacing;
        }
        out
    }
}
