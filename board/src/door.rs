use std::rc::Rc;

use kiosk_engine::font::Font;
use kiosk_engine::graphics::{Canvas, Color};
use kiosk_engine::text::TextRenderer;
use kiosk_engine::ui::Rect;

use crate::config::DoorConfig;

/// Look and geometry shared by doors. Never mutated once built.
pub struct DoorProperties {
    pub width: u32,
    pub height: u32,

    pub bg_color: Color,
    pub selection_color: Color,
    pub panel_color: Color,
    pub ellipse_color: Color,
    pub number_color: Color,
    pub cross_color: Color,
    pub text_color: Color,
    pub unused_text_color: Color,

    pub number_font: Rc<dyn Font>,
    pub activity_font: Rc<dyn Font>,
    pub text: TextRenderer,

    /// Width of the selection frame around the panel.
    pub border: u32,
    pub ellipse_inset: u32,
    /// Vertical inset of the cross line endpoints.
    pub cross_inset: u32,
    pub cross_thickness: u32,
    /// Extra downward nudge of the door number from true center.
    pub number_offset_y: u32,
}

impl DoorProperties {
    pub fn from_config(
        config: &DoorConfig,
        width: u32,
        height: u32,
        marker: char,
        number_font: Rc<dyn Font>,
        activity_font: Rc<dyn Font>,
    ) -> Self {
        Self {
            width,
            height,
            bg_color: config.bg_color.0,
            selection_color: config.selection_color.0,
            panel_color: config.panel_color.0,
            ellipse_color: config.ellipse_color.0,
            number_color: config.number_color.0,
            cross_color: config.cross_color.0,
            text_color: config.text_color.0,
            unused_text_color: config.unused_text_color.0,
            number_font,
            activity_font,
            text: TextRenderer::new(config.line_spacing).with_marker(marker),
            border: config.border,
            ellipse_inset: config.ellipse_inset,
            cross_inset: config.cross_inset,
            cross_thickness: config.cross_thickness,
            number_offset_y: config.number_offset_y,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

/// One grid cell hiding one activity.
///
/// A door never draws to the display itself: `surface()` composes a fresh image from the
/// door's flags and the caller blits it at `(screen_x(), screen_y())`. Any setter that changes
/// what `surface()` would produce raises the `is_updated` dirty flag.
pub struct Door {
    index: usize,
    columns: usize,
    activity: String,
    props: Rc<DoorProperties>,

    is_selected: bool,
    is_open: bool,
    is_revealed: bool,
    is_hidden: bool,
    percent_open: u32,
    is_updated: bool,
}

impl Door {
    pub fn new(
        index: usize,
        columns: usize,
        activity: impl Into<String>,
        props: Rc<DoorProperties>,
        hidden: bool,
    ) -> Self {
        Self {
            index,
            columns: columns.max(1),
            activity: activity.into(),
            props,
            is_selected: false,
            is_open: false,
            is_revealed: false,
            is_hidden: hidden,
            percent_open: 0,
            is_updated: true,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn properties(&self) -> &DoorProperties {
        &self.props
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    pub fn percent_open(&self) -> u32 {
        self.percent_open
    }

    pub fn is_updated(&self) -> bool {
        self.is_updated
    }

    pub fn screen_x(&self) -> u32 {
        (self.index % self.columns) as u32 * self.props.width
    }

    pub fn screen_y(&self) -> u32 {
        (self.index / self.columns) as u32 * self.props.height
    }

    fn set_flag(flag: &mut bool, value: bool, updated: &mut bool) {
        if *flag != value {
            *flag = value;
            *updated = true;
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        Self::set_flag(&mut self.is_selected, selected, &mut self.is_updated);
    }

    pub fn set_open(&mut self, open: bool) {
        Self::set_flag(&mut self.is_open, open, &mut self.is_updated);
    }

    pub fn set_revealed(&mut self, revealed: bool) {
        Self::set_flag(&mut self.is_revealed, revealed, &mut self.is_updated);
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        Self::set_flag(&mut self.is_hidden, hidden, &mut self.is_updated);
    }

    /// Sets the wipe progress, clamped to `0..=100`.
    pub fn set_percent_open(&mut self, percent: u32) {
        let percent = percent.min(100);
        if self.percent_open != percent {
            self.percent_open = percent;
            self.is_updated = true;
        }
    }

    /// Forces a redraw on the next dirty-only pass.
    pub fn mark_updated(&mut self) {
        self.is_updated = true;
    }

    /// Clears the dirty flag once the door has been drawn.
    pub fn mark_drawn(&mut self) {
        self.is_updated = false;
    }

    /// Color the activity is written in once the board is revealed.
    pub fn reveal_text_color(&self) -> Color {
        if self.is_open {
            self.props.text_color
        } else {
            self.props.unused_text_color
        }
    }

    /// The activity text rendered in the small door font.
    pub fn activity_text(&self, color: Color) -> Canvas {
        self.props
            .text
            .render(&self.activity, self.props.activity_font.as_ref(), color)
    }

    /// Background-filled door-sized image with the activity text centered.
    pub fn activity_face(&self, color: Color) -> Canvas {
        let p = &*self.props;
        let mut face = Canvas::filled(p.width, p.height, p.bg_color);
        let text = self.activity_text(color);
        let (x, y) = p.bounds().centered_origin(text.width(), text.height());
        face.renderer().blit(&text, x, y);
        face
    }

    pub fn surface(&self) -> Canvas {
        let p = &*self.props;
        let bounds = p.bounds();
        let frame_color = if self.is_selected {
            p.selection_color
        } else {
            p.bg_color
        };

        if self.is_hidden {
            return Canvas::filled(p.width, p.height, p.bg_color);
        }

        if self.is_open && !self.is_revealed {
            let mut surf = Canvas::filled(p.width, p.height, frame_color);
            let mut gfx = surf.renderer();
            gfx.fill_rect(bounds.shrink(p.border), p.bg_color);

            let (left, right) = (p.border as i32, p.width.saturating_sub(p.border) as i32);
            let (top, bottom) = (
                p.cross_inset as i32,
                p.height.saturating_sub(p.cross_inset) as i32,
            );
            gfx.draw_line((left, top), (right, bottom), p.cross_thickness, p.cross_color);
            gfx.draw_line((left, bottom), (right, top), p.cross_thickness, p.cross_color);
            return surf;
        }

        if self.is_revealed {
            return self.activity_face(self.reveal_text_color());
        }

        let mut surf = Canvas::filled(p.width, p.height, frame_color);
        {
            let mut gfx = surf.renderer();
            gfx.fill_rect(bounds.shrink(p.border), p.panel_color);
            gfx.fill_ellipse(bounds.shrink(p.ellipse_inset), p.ellipse_color);

            let number = p
                .number_font
                .render(&(self.index + 1).to_string(), p.number_color);
            let (x, y) = bounds.centered_origin(number.width(), number.height());
            gfx.blit(&number, x, y + p.number_offset_y as i32);
        }

        if self.percent_open > 0 {
            let face = self.activity_face(p.text_color);
            let area = bounds.centered_fraction(self.percent_open);
            surf.renderer()
                .blit_region(&face, area, area.x as i32, area.y as i32);
        }

        surf
    }
}
