//! Screen-space rectangles for door and board layout.

/// Axis-aligned pixel rectangle. Zero-area rectangles are valid and draw nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// A rectangle at the origin.
    pub fn from_size(w: u32, h: u32) -> Self {
        Self::new(0, 0, w, h)
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Pulls every edge in by `margin` pixels; collapses to zero area rather than wrapping.
    pub fn shrink(&self, margin: u32) -> Self {
        let twice = margin.saturating_mul(2);
        Self {
            x: self.x.saturating_add(margin),
            y: self.y.saturating_add(margin),
            w: self.w.saturating_sub(twice),
            h: self.h.saturating_sub(twice),
        }
    }

    /// A `w` x `h` box centered in this one, cut down to fit when larger.
    pub fn center(&self, w: u32, h: u32) -> Self {
        let w = w.min(self.w);
        let h = h.min(self.h);
        Self {
            x: self.x + (self.w - w) / 2,
            y: self.y + (self.h - h) / 2,
            w,
            h,
        }
    }

    /// Top-left corner that centers a `w` x `h` box in this one without cutting it down. A box
    /// larger than this one overhangs both edges by the same amount.
    pub fn centered_origin(&self, w: u32, h: u32) -> (i32, i32) {
        let offset = |start: u32, outer: u32, inner: u32| {
            (i64::from(start) + i64::from(outer / 2) - i64::from(inner / 2)) as i32
        };
        (offset(self.x, self.w, w), offset(self.y, self.h, h))
    }

    /// The centered box covering `percent` of each dimension (capped at 100).
    pub fn centered_fraction(&self, percent: u32) -> Self {
        let scale = |len: u32| (u64::from(len) * u64::from(percent.min(100)) / 100) as u32;
        self.center(scale(self.w), scale(self.h))
    }
}
