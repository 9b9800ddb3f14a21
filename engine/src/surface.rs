use std::convert::Infallible;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }

    /// Returns `true` when this size splits into `columns` x `rows` equal whole-pixel cells.
    pub fn divides_evenly(self, columns: u32, rows: u32) -> bool {
        columns > 0 && rows > 0 && self.width % columns == 0 && self.height % rows == 0
    }
}

/// A fixed-size RGBA display target.
///
/// This is the boundary between:
/// - drawing (writing RGBA pixels into `frame_mut()`), and
/// - presentation (flushing those pixels to a window, or nowhere at all).
///
/// Works the same for a real window and for headless runs.
pub trait Surface {
    type Error: std::fmt::Display;

    fn size(&self) -> SurfaceSize;
    fn frame(&self) -> &[u8];
    fn frame_mut(&mut self) -> &mut [u8];

    fn present(&mut self) -> Result<(), Self::Error>;

    /// The window backing this surface changed size. The logical frame size stays fixed.
    fn window_resized(&mut self, _size: SurfaceSize) {}
}

/// A simple in-memory RGBA surface for headless execution and tests.
#[derive(Debug, Clone)]
pub struct RgbaBufferSurface {
    size: SurfaceSize,
    buf: Vec<u8>,
    presents: usize,
}

impl RgbaBufferSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
            presents: 0,
        }
    }

    /// Number of times `present` has been called.
    pub fn present_count(&self) -> usize {
        self.presents
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + x as usize) * 4;
        self.buf
            .get(idx..idx + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}

impl Surface for RgbaBufferSurface {
    type Error = Infallible;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn frame(&self) -> &[u8] {
        &self.buf
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.presents += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_evenly_rejects_remainders_and_zero() {
        let size = SurfaceSize::new(1920, 1080);
        assert!(size.divides_evenly(4, 3));
        assert!(!size.divides_evenly(7, 3));
        assert!(!size.divides_evenly(4, 7));
        assert!(!size.divides_evenly(0, 3));
    }

    #[test]
    fn buffer_surface_counts_presents() {
        let mut surface = RgbaBufferSurface::new(SurfaceSize::new(2, 2));
        assert_eq!(surface.frame().len(), 16);
        surface.present().unwrap();
        surface.present().unwrap();
        assert_eq!(surface.present_count(), 2);
        assert_eq!(surface.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(2, 0), None);
    }
}
