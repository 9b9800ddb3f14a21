use kiosk_engine::graphics::{Canvas, Color, CpuRenderer};
use kiosk_engine::surface::{Surface, SurfaceSize};
use kiosk_engine::ui::Rect;

/// The display surface plus the board background color.
pub struct Screen<S: Surface> {
    surface: S,
    bg_color: Color,
}

impl<S: Surface> Screen<S> {
    pub fn new(surface: S, bg_color: Color) -> Self {
        Self { surface, bg_color }
    }

    pub fn size(&self) -> SurfaceSize {
        self.surface.size()
    }

    pub fn bounds(&self) -> Rect {
        let size = self.size();
        Rect::from_size(size.width, size.height)
    }

    pub fn bg_color(&self) -> Color {
        self.bg_color
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn frame(&self) -> &[u8] {
        self.surface.frame()
    }

    pub fn renderer(&mut self) -> CpuRenderer<'_> {
        let size = self.surface.size();
        CpuRenderer::new(self.surface.frame_mut(), size)
    }

    pub fn fill_bg(&mut self) {
        let bg = self.bg_color;
        self.renderer().clear(bg);
    }

    /// Copies `canvas` to the frame at `(x, y)`, compositing by alpha. Parts outside the frame
    /// are clipped.
    pub fn blit(&mut self, canvas: &Canvas, x: i32, y: i32) {
        self.renderer().blit(canvas, x, y);
    }

    /// Flushes the frame. Failures are logged; the next present retries.
    pub fn present(&mut self) {
        if let Err(err) = self.surface.present() {
            log::warn!("present failed: {err}");
        }
    }

    pub fn window_resized(&mut self, size: SurfaceSize) {
        log::debug!("window resized to {}x{}", size.width, size.height);
        self.surface.window_resized(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_engine::graphics::WHITE;
    use kiosk_engine::surface::RgbaBufferSurface;

    #[test]
    fn fill_blit_present() {
        let bg = [10, 20, 30, 255];
        let mut screen = Screen::new(RgbaBufferSurface::new(SurfaceSize::new(8, 4)), bg);
        screen.fill_bg();
        screen.blit(&Canvas::filled(2, 2, WHITE), 6, 3);
        screen.blit(&Canvas::filled(3, 3, WHITE), -2, -2);
        screen.present();

        let surface = screen.into_surface();
        assert_eq!(surface.pixel(7, 0), Some(bg));
        assert_eq!(surface.pixel(6, 3), Some(WHITE));
        assert_eq!(surface.pixel(5, 3), Some(bg));
        assert_eq!(surface.pixel(0, 0), Some(WHITE));
        assert_eq!(surface.pixel(1, 0), Some(bg));
        assert_eq!(surface.present_count(), 1);
    }
}
