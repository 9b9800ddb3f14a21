#![allow(dead_code)]

use activity_board::config::{Config, FontSpec};
use activity_board::fonts::Fonts;
use activity_board::input::{Action, ScriptedInput};
use activity_board::screen::Screen;
use activity_board::sfx::RecordingSfx;
use activity_board::{ActivityBoard, State};
use kiosk_engine::clock::ManualClock;
use kiosk_engine::surface::{RgbaBufferSurface, Surface};

/// A 4x3 board of 120x90 doors with geometry scaled down to match.
pub fn small_config() -> Config {
    let mut config = Config::default();
    config.display.width = 480;
    config.display.height = 270;
    config.display.fullscreen = false;
    config.board.start_hidden = false;
    config.board.seed = Some(1);
    config.board.full_font = FontSpec::builtin(60);
    config.door.number_font = FontSpec::builtin(60);
    config.door.activity_font = FontSpec::builtin(12);
    config.door.border = 5;
    config.door.ellipse_inset = 10;
    config.door.cross_inset = 10;
    config.door.cross_thickness = 10;
    config.door.number_offset_y = 2;
    config
}

pub fn letters(count: usize) -> Vec<String> {
    (b'A'..=b'Z')
        .take(count)
        .map(|c| char::from(c).to_string())
        .collect()
}

/// Everything a board borrows except the screen.
pub struct Rig {
    pub config: Config,
    pub fonts: Fonts,
    pub sfx: RecordingSfx,
    pub clock: ManualClock,
    pub activities: Vec<String>,
}

impl Rig {
    pub fn new() -> Self {
        Self::with(|_| {})
    }

    pub fn with(tweak: impl FnOnce(&mut Config)) -> Self {
        let mut config = small_config();
        tweak(&mut config);
        Self {
            fonts: Fonts::builtin(&config),
            activities: letters(config.board.door_count()),
            config,
            sfx: RecordingSfx::new(),
            clock: ManualClock::new(),
        }
    }

    pub fn screen(&self) -> Screen<RgbaBufferSurface> {
        Screen::new(
            RgbaBufferSurface::new(self.config.display.size()),
            self.config.board.bg_color.0,
        )
    }

    pub fn board<'a, S: Surface>(&'a self, screen: &'a mut Screen<S>) -> ActivityBoard<'a, S> {
        ActivityBoard::new(
            screen,
            &self.config,
            &self.activities,
            &self.fonts,
            &self.sfx,
            &self.clock,
        )
        .expect("test board should build")
    }
}

pub fn play<S: Surface>(board: &mut ActivityBoard<'_, S>, actions: &[Action]) -> State {
    board.run_script(&mut ScriptedInput::from_actions(actions))
}
