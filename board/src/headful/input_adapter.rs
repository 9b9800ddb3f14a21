use kiosk_engine::app::WindowInput;

use crate::input::InputEvent;

pub fn map_window_input(input: WindowInput) -> InputEvent {
    match input {
        WindowInput::Key { key, pressed } => InputEvent::Key { key, pressed },
        WindowInput::Resized(size) => InputEvent::Resized(size),
        WindowInput::CloseRequested => InputEvent::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Action, InputTranslator};
    use kiosk_engine::surface::SurfaceSize;
    use winit::event::VirtualKeyCode;

    #[test]
    fn close_request_becomes_quit() {
        let mut translator = InputTranslator::new();
        let event = map_window_input(WindowInput::CloseRequested);
        assert_eq!(translator.translate(&event), Some(Action::Quit));
    }

    #[test]
    fn keys_and_resizes_pass_through() {
        assert_eq!(
            map_window_input(WindowInput::Key {
                key: VirtualKeyCode::Space,
                pressed: true
            }),
            InputEvent::Key {
                key: VirtualKeyCode::Space,
                pressed: true
            }
        );
        let size = SurfaceSize::new(1280, 720);
        assert_eq!(
            map_window_input(WindowInput::Resized(size)),
            InputEvent::Resized(size)
        );
    }
}
