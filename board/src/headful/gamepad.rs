use gilrs::{Axis, EventType, Gilrs};

use crate::input::{Button, InputEvent};

/// The first connected controller, read through gilrs.
pub struct Gamepad {
    gilrs: Gilrs,
    stick: (f32, f32),
}

impl Gamepad {
    /// Returns `None` (with a warning) when controller support is unavailable. A controller
    /// plugged in later is still picked up.
    pub fn open() -> Option<Self> {
        match Gilrs::new() {
            Ok(gilrs) => {
                let connected: Vec<String> =
                    gilrs.gamepads().map(|(_, pad)| pad.name().to_string()).collect();
                if connected.is_empty() {
                    log::warn!("no game controller found; keyboard only until one is connected");
                } else {
                    log::info!("game controllers: {}", connected.join(", "));
                }
                Some(Self {
                    gilrs,
                    stick: (0.0, 0.0),
                })
            }
            Err(err) => {
                log::warn!("game controller support disabled: {err}");
                None
            }
        }
    }

    pub fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(gilrs::Event { event, .. }) = self.gilrs.next_event() {
            let mapped = match event {
                EventType::ButtonPressed(button, _) => map_button(button).map(|button| {
                    InputEvent::Button {
                        button,
                        pressed: true,
                    }
                }),
                EventType::ButtonReleased(button, _) => map_button(button).map(|button| {
                    InputEvent::Button {
                        button,
                        pressed: false,
                    }
                }),
                EventType::AxisChanged(Axis::LeftStickX, value, _) => {
                    self.stick.0 = value;
                    Some(self.stick_event())
                }
                EventType::AxisChanged(Axis::LeftStickY, value, _) => {
                    self.stick.1 = value;
                    Some(self.stick_event())
                }
                EventType::Connected => {
                    log::info!("game controller connected");
                    None
                }
                EventType::Disconnected => {
                    log::warn!("game controller disconnected");
                    None
                }
                _ => None,
            };
            if let Some(mapped) = mapped {
                log::trace!("gamepad {mapped:?}");
                events.push(mapped);
            }
        }
        events
    }

    fn stick_event(&self) -> InputEvent {
        InputEvent::Stick {
            x: self.stick.0,
            y: self.stick.1,
        }
    }
}

/// Xbox-style layout: South is A, East is B, West is X, North is Y.
pub fn map_button(button: gilrs::Button) -> Option<Button> {
    use gilrs::Button as Pad;
    match button {
        Pad::South => Some(Button::A),
        Pad::East => Some(Button::B),
        Pad::West => Some(Button::X),
        Pad::North => Some(Button::Y),
        Pad::LeftTrigger => Some(Button::LeftShoulder),
        Pad::RightTrigger => Some(Button::RightShoulder),
        Pad::Select => Some(Button::Back),
        Pad::Start => Some(Button::Start),
        Pad::DPadUp => Some(Button::DPadUp),
        Pad::DPadDown => Some(Button::DPadDown),
        Pad::DPadLeft => Some(Button::DPadLeft),
        Pad::DPadRight => Some(Button::DPadRight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_buttons_follow_xbox_layout() {
        assert_eq!(map_button(gilrs::Button::South), Some(Button::A));
        assert_eq!(map_button(gilrs::Button::North), Some(Button::Y));
        assert_eq!(map_button(gilrs::Button::Select), Some(Button::Back));
        assert_eq!(map_button(gilrs::Button::LeftTrigger2), None);
    }
}
