//! Input sources for a real window and controller.

#[cfg(feature = "gamepad")]
pub mod gamepad;
pub mod input_adapter;

use kiosk_engine::app::KioskWindow;

use crate::input::{InputEvent, InputSource};

/// Keyboard/window events from the kiosk window, plus the first game controller when the
/// `gamepad` feature is enabled.
pub struct HeadfulInput<'w> {
    window: &'w mut KioskWindow,
    #[cfg(feature = "gamepad")]
    gamepad: Option<gamepad::Gamepad>,
}

impl<'w> HeadfulInput<'w> {
    pub fn new(window: &'w mut KioskWindow) -> Self {
        Self {
            window,
            #[cfg(feature = "gamepad")]
            gamepad: gamepad::Gamepad::open(),
        }
    }
}

impl InputSource for HeadfulInput<'_> {
    fn poll(&mut self) -> Vec<InputEvent> {
        #[allow(unused_mut)]
        let mut events: Vec<InputEvent> = self
            .window
            .poll()
            .into_iter()
            .map(input_adapter::map_window_input)
            .collect();
        #[cfg(feature = "gamepad")]
        if let Some(pad) = self.gamepad.as_mut() {
            events.extend(pad.poll());
        }
        events
    }

    fn discard_pending(&mut self) -> Vec<InputEvent> {
        self.poll()
    }
}
