use crate::surface::SurfaceSize;
use crate::ui::Rect;

pub type Color = [u8; 4];

pub const TRANSPARENT: Color = [0, 0, 0, 0];
pub const BLACK: Color = [0, 0, 0, 255];
pub const WHITE: Color = [255, 255, 255, 255];

/// Looks up one of the common CSS/pygame color names (case-insensitive).
pub fn named_color(name: &str) -> Option<Color> {
    let c = match name.to_ascii_lowercase().as_str() {
        "black" => BLACK,
        "white" => WHITE,
        "red" => [255, 0, 0, 255],
        "green" => [0, 255, 0, 255],
        "blue" => [0, 0, 255, 255],
        "yellow" => [255, 255, 0, 255],
        "orange" => [255, 165, 0, 255],
        "purple" => [160, 32, 240, 255],
        "cyan" => [0, 255, 255, 255],
        "magenta" => [255, 0, 255, 255],
        "gray" | "grey" => [190, 190, 190, 255],
        "darkgray" | "darkgrey" => [169, 169, 169, 255],
        "navy" => [0, 0, 128, 255],
        "gold" => [255, 215, 0, 255],
        _ => return None,
    };
    Some(c)
}

/// Parses `#rrggbb` / `#rrggbbaa` into a color.
pub fn hex_color(text: &str) -> Option<Color> {
    let digits = text.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    match digits.len() {
        6 => Some([channel(0)?, channel(2)?, channel(4)?, 255]),
        8 => Some([channel(0)?, channel(2)?, channel(4)?, channel(6)?]),
        _ => None,
    }
}

/// Source-over compositing of `src` onto `dst`.
fn composite(dst: &mut [u8], src: Color) {
    let sa = src[3] as u32;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        dst.copy_from_slice(&src);
        return;
    }

    let da = dst[3] as u32;
    let inv = 255 - sa;
    // Alpha scaled by 255 to keep the blend in integer math.
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        dst.copy_from_slice(&TRANSPARENT);
        return;
    }
    for i in 0..3 {
        let s = src[i] as u32 * sa * 255;
        let d = dst[i] as u32 * da * inv;
        dst[i] = ((s + d + out_a / 2) / out_a) as u8;
    }
    dst[3] = ((out_a + 127) / 255) as u8;
}

/// CPU renderer that draws into a borrowed RGBA frame buffer.
///
/// Both owned images (`Canvas`) and display surfaces are drawn through this type, so door
/// composition and screen presentation share one set of primitives.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size.width, self.size.height)
    }

    fn frame_ok(&self) -> bool {
        !self.size.is_empty() && self.frame.len() >= self.size.rgba_len()
    }

    fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + x as usize) * 4;
        self.frame.get_mut(idx..idx + 4)
    }

    pub fn clear(&mut self, color: Color) {
        let rect = self.bounds();
        self.fill_rect(rect, color);
    }

    /// Opaque fill; the rect is clipped to the frame.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if !self.frame_ok() {
            return;
        }
        let max_x = rect.x.saturating_add(rect.w).min(self.size.width);
        let max_y = rect.y.saturating_add(rect.h).min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y {
            return;
        }

        let stride = self.size.width as usize * 4;
        let row_bytes = (max_x - rect.x) as usize * 4;
        let mut row_start = rect.y as usize * stride + rect.x as usize * 4;
        for _ in rect.y..max_y {
            let row = &mut self.frame[row_start..row_start + row_bytes];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
            row_start += stride;
        }
    }

    /// Filled axis-aligned ellipse inscribed in `rect`.
    pub fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || !self.frame_ok() {
            return;
        }
        let rx = rect.w as f32 / 2.0;
        let ry = rect.h as f32 / 2.0;
        let cx = rect.x as f32 + rx;
        let cy = rect.y as f32 + ry;

        for py in rect.y..rect.y.saturating_add(rect.h).min(self.size.height) {
            let dy = (py as f32 + 0.5 - cy) / ry;
            if dy.abs() > 1.0 {
                continue;
            }
            let half = rx * (1.0 - dy * dy).sqrt();
            let x0 = (cx - half).round().max(0.0) as u32;
            let x1 = (cx + half).round().max(0.0) as u32;
            if x1 > x0 {
                self.fill_rect(Rect::new(x0, py, x1 - x0, 1), color);
            }
        }
    }

    /// Line segment with the given stroke thickness (in pixels).
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), thickness: u32, color: Color) {
        if !self.frame_ok() {
            return;
        }
        let half = thickness.max(1) as f32 / 2.0;
        let (ax, ay) = (from.0 as f32, from.1 as f32);
        let (bx, by) = (to.0 as f32, to.1 as f32);
        let (abx, aby) = (bx - ax, by - ay);
        let len_sq = abx * abx + aby * aby;

        let pad = half.ceil() as i32;
        let min_x = from.0.min(to.0).saturating_sub(pad).max(0);
        let min_y = from.1.min(to.1).saturating_sub(pad).max(0);
        let max_x = from.0.max(to.0).saturating_add(pad).min(self.size.width as i32 - 1);
        let max_y = from.1.max(to.1).saturating_add(pad).min(self.size.height as i32 - 1);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
                let t = if len_sq == 0.0 {
                    0.0
                } else {
                    (((cx - ax) * abx + (cy - ay) * aby) / len_sq).clamp(0.0, 1.0)
                };
                let (nx, ny) = (ax + abx * t - cx, ay + aby * t - cy);
                if nx * nx + ny * ny <= half * half {
                    if let Some(dst) = self.pixel_mut(px as u32, py as u32) {
                        dst.copy_from_slice(&color);
                    }
                }
            }
        }
    }

    /// Alpha-composites a single pixel; out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(dst) = self.pixel_mut(x as u32, y as u32) {
            composite(dst, color);
        }
    }

    /// Composites all of `src` with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, src: &Canvas, x: i32, y: i32) {
        self.blit_region(src, src.bounds(), x, y);
    }

    /// Composites the `area` of `src` with its top-left corner at `(x, y)`.
    pub fn blit_region(&mut self, src: &Canvas, area: Rect, x: i32, y: i32) {
        let max_x = area.x.saturating_add(area.w).min(src.size.width);
        let max_y = area.y.saturating_add(area.h).min(src.size.height);
        for sy in area.y..max_y {
            let dy = y + (sy - area.y) as i32;
            if dy < 0 {
                continue;
            }
            if dy as u32 >= self.size.height {
                break;
            }
            for sx in area.x..max_x {
                let dx = x + (sx - area.x) as i32;
                if let Some(px) = src.pixel(sx, sy) {
                    self.blend_pixel(dx, dy, px);
                }
            }
        }
    }
}

/// An owned RGBA image, transparent until drawn on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: SurfaceSize,
    buf: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let size = SurfaceSize::new(width, height);
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
        }
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let mut canvas = Self::new(width, height);
        canvas.renderer().clear(color);
        canvas
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size.width, self.size.height)
    }

    pub fn rgba(&self) -> &[u8] {
        &self.buf
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + x as usize) * 4;
        self.buf
            .get(idx..idx + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    pub fn renderer(&mut self) -> CpuRenderer<'_> {
        CpuRenderer::new(&mut self.buf, self.size)
    }

    /// True when any pixel has exactly `color`.
    pub fn contains_color(&self, color: Color) -> bool {
        self.buf.chunks_exact(4).any(|px| px == color)
    }
}
