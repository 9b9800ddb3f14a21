use kiosk_engine::{
    font::{BlockFont, Font},
    graphics::{BLACK, Canvas, TRANSPARENT, WHITE},
    surface::{RgbaBufferSurface, Surface, SurfaceSize},
    text::TextRenderer,
};

#[test]
fn marker_line_break_gives_two_lines_and_one_gap() {
    let font = BlockFont::new(3);
    let text = TextRenderer::new(8);
    let canvas = text.render("JUMP`TEN TIMES", &font, WHITE);

    assert_eq!(text.lines("JUMP`TEN TIMES").count(), 2);
    assert_eq!(canvas.width(), font.measure("TEN TIMES"));
    assert_eq!(canvas.height(), 2 * font.line_height() + 8);
}

#[test]
fn empty_segments_keep_their_line_height() {
    let font = BlockFont::new(1);
    let canvas = TextRenderer::new(2).render("A``B", &font, WHITE);
    assert_eq!(canvas.height(), 3 * font.line_height() + 2 * 2);
}

#[test]
fn rendered_text_composites_over_a_background() {
    let font = BlockFont::new(2);
    let text = TextRenderer::new(4).render("HI`THERE", &font, WHITE);

    let size = SurfaceSize::new(64, 48);
    let mut surface = RgbaBufferSurface::new(size);
    let mut backdrop = Canvas::filled(64, 48, BLACK);
    let at = backdrop.bounds().center(text.width(), text.height());
    backdrop.renderer().blit(&text, at.x as i32, at.y as i32);

    let frame = surface.frame_mut();
    frame.copy_from_slice(backdrop.rgba());
    surface.present().unwrap();

    // Corners stay background, untouched text pixels never leak transparency.
    assert_eq!(surface.pixel(0, 0), Some(BLACK));
    assert_eq!(surface.pixel(63, 47), Some(BLACK));
    assert!(!backdrop.contains_color(TRANSPARENT));
    assert!(backdrop.contains_color(WHITE));
    assert_eq!(surface.present_count(), 1);
}
