//! Raw controller/keyboard events and their translation into board actions.
//!
//! Platform layers (winit, gilrs, test scripts) produce `InputEvent`s. `InputTranslator` turns
//! them into the closed `Action` set, tracking which buttons and keys are held so that the
//! destructive actions can require a chord.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use kiosk_engine::surface::SurfaceSize;
use thiserror::Error;
use winit::event::VirtualKeyCode;

/// Stick deflection past which a stick axis counts as pushed.
pub const STICK_DEADZONE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
    LeftShoulder,
    RightShoulder,
    Back,
    Start,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Button { button: Button, pressed: bool },
    Key { key: VirtualKeyCode, pressed: bool },
    /// Hat switch position; `y` is positive when pushed up.
    Hat { x: i8, y: i8 },
    /// Analog stick position in `-1.0..=1.0`; `y` is positive when pushed up.
    Stick { x: f32, y: f32 },
    Resized(SurfaceSize),
    /// The window was closed.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Open,
    Return,
    Reveal,
    Restart,
    Quit,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Open,
        Action::Return,
        Action::Reveal,
        Action::Restart,
        Action::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Open => "open",
            Action::Return => "return",
            Action::Reveal => "reveal",
            Action::Restart => "restart",
            Action::Quit => "quit",
        }
    }

    /// Grid delta as `(columns, rows)`; rows grow downwards.
    pub fn delta(self) -> Option<(i32, i32)> {
        match self {
            Action::Up => Some((0, -1)),
            Action::Down => Some((0, 1)),
            Action::Left => Some((-1, 0)),
            Action::Right => Some((1, 0)),
            _ => None,
        }
    }

    /// Controller events that produce this action from an idle controller.
    pub fn to_events(self) -> Vec<InputEvent> {
        let tap = |button| {
            vec![
                InputEvent::Button {
                    button,
                    pressed: true,
                },
                InputEvent::Button {
                    button,
                    pressed: false,
                },
            ]
        };
        let chord = |held: &[Button], trigger| {
            let mut events: Vec<InputEvent> = held
                .iter()
                .map(|&button| InputEvent::Button {
                    button,
                    pressed: true,
                })
                .collect();
            events.extend(tap(trigger));
            events.extend(held.iter().map(|&button| InputEvent::Button {
                button,
                pressed: false,
            }));
            events
        };
        let hat = |x, y| vec![InputEvent::Hat { x, y }, InputEvent::Hat { x: 0, y: 0 }];

        match self {
            Action::Up => hat(0, 1),
            Action::Down => hat(0, -1),
            Action::Left => hat(-1, 0),
            Action::Right => hat(1, 0),
            Action::Open => tap(Button::A),
            Action::Return => tap(Button::B),
            Action::Reveal => chord(&[Button::X], Button::Y),
            Action::Restart => tap(Button::Start),
            Action::Quit => chord(
                &[Button::LeftShoulder, Button::RightShoulder],
                Button::Back,
            ),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action {0:?} (expected one of up, down, left, right, open, return, reveal, restart, quit)")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Action::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Parses a comma-separated action list such as `"right,open,return"`.
pub fn parse_script(script: &str) -> Result<Vec<Action>, UnknownAction> {
    script
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Maps a single-axis direction (`y` up) to an action. Diagonals and the neutral position
/// yield nothing.
pub fn direction(x: i32, y: i32) -> Option<Action> {
    match (x.signum(), y.signum()) {
        (-1, 0) => Some(Action::Left),
        (1, 0) => Some(Action::Right),
        (0, 1) => Some(Action::Up),
        (0, -1) => Some(Action::Down),
        _ => None,
    }
}

fn stick_axis(value: f32) -> i32 {
    if value <= -STICK_DEADZONE {
        -1
    } else if value >= STICK_DEADZONE {
        1
    } else {
        0
    }
}

#[derive(Debug, Default)]
pub struct InputTranslator {
    buttons: HashSet<Button>,
    keys: HashSet<VirtualKeyCode>,
    stick: (i32, i32),
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.buttons.contains(&button)
    }

    pub fn is_key_held(&self, key: VirtualKeyCode) -> bool {
        self.keys.contains(&key)
    }

    fn shift_held(&self) -> bool {
        self.is_key_held(VirtualKeyCode::LShift) || self.is_key_held(VirtualKeyCode::RShift)
    }

    fn ctrl_held(&self) -> bool {
        self.is_key_held(VirtualKeyCode::LControl) || self.is_key_held(VirtualKeyCode::RControl)
    }

    /// Updates held state from `event` and returns the action it triggers, if any.
    pub fn translate(&mut self, event: &InputEvent) -> Option<Action> {
        let action = match *event {
            InputEvent::Button {
                button,
                pressed: true,
            } => self.button_action(button),
            InputEvent::Key { key, pressed: true } if !self.keys.contains(&key) => {
                self.key_action(key)
            }
            InputEvent::Hat { x, y } => direction(x.into(), y.into()),
            InputEvent::Stick { x, y } => {
                let stick = (stick_axis(x), stick_axis(y));
                if stick == self.stick {
                    None
                } else {
                    self.stick = stick;
                    direction(stick.0, stick.1)
                }
            }
            InputEvent::Quit => Some(Action::Quit),
            _ => None,
        };
        self.track(event);
        action
    }

    /// Updates held state only. Used for events that are discarded unhandled.
    pub fn track(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Button { button, pressed } => {
                if pressed {
                    self.buttons.insert(button);
                } else {
                    self.buttons.remove(&button);
                }
            }
            InputEvent::Key { key, pressed } => {
                if pressed {
                    self.keys.insert(key);
                } else {
                    self.keys.remove(&key);
                }
            }
            InputEvent::Stick { x, y } => self.stick = (stick_axis(x), stick_axis(y)),
            _ => {}
        }
    }

    fn button_action(&self, button: Button) -> Option<Action> {
        match button {
            Button::A => Some(Action::Open),
            Button::B => Some(Action::Return),
            Button::Y if self.is_held(Button::X) => Some(Action::Reveal),
            Button::Start => Some(Action::Restart),
            Button::Back
                if self.is_held(Button::LeftShoulder) && self.is_held(Button::RightShoulder) =>
            {
                Some(Action::Quit)
            }
            Button::DPadUp => Some(Action::Up),
            Button::DPadDown => Some(Action::Down),
            Button::DPadLeft => Some(Action::Left),
            Button::DPadRight => Some(Action::Right),
            _ => None,
        }
    }

    fn key_action(&self, key: VirtualKeyCode) -> Option<Action> {
        match key {
            VirtualKeyCode::Up => Some(Action::Up),
            VirtualKeyCode::Down => Some(Action::Down),
            VirtualKeyCode::Left => Some(Action::Left),
            VirtualKeyCode::Right => Some(Action::Right),
            VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter | VirtualKeyCode::Space => {
                Some(Action::Open)
            }
            VirtualKeyCode::Escape | VirtualKeyCode::Back => Some(Action::Return),
            VirtualKeyCode::R if self.shift_held() => Some(Action::Reveal),
            VirtualKeyCode::Q if self.ctrl_held() => Some(Action::Quit),
            VirtualKeyCode::F5 => Some(Action::Restart),
            _ => None,
        }
    }
}

/// Something the board can poll for input once per tick.
pub trait InputSource {
    /// Every event that arrived since the last call, without blocking.
    fn poll(&mut self) -> Vec<InputEvent>;

    /// Drops events that piled up while the board was busy, returning them so held-button
    /// state stays accurate. Sources with no backlog return nothing.
    fn discard_pending(&mut self) -> Vec<InputEvent> {
        Vec::new()
    }
}

/// Replays pre-recorded event batches, one batch per poll.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_actions(actions: &[Action]) -> Self {
        let mut input = Self::new();
        for &action in actions {
            input.push_action(action);
        }
        input
    }

    pub fn push_batch(&mut self, events: Vec<InputEvent>) {
        self.batches.push_back(events);
    }

    pub fn push_action(&mut self, action: Action) {
        self.push_batch(action.to_events());
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.batches.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.batches.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: Button) -> InputEvent {
        InputEvent::Button {
            button,
            pressed: true,
        }
    }

    fn release(button: Button) -> InputEvent {
        InputEvent::Button {
            button,
            pressed: false,
        }
    }

    fn key(key: VirtualKeyCode, pressed: bool) -> InputEvent {
        InputEvent::Key { key, pressed }
    }

    fn translate_all(events: &[InputEvent]) -> Vec<Action> {
        let mut t = InputTranslator::new();
        events.iter().filter_map(|e| t.translate(e)).collect()
    }

    #[test]
    fn every_action_round_trips_through_controller_events() {
        for action in Action::ALL {
            assert_eq!(translate_all(&action.to_events()), vec![action], "{action}");
        }
    }

    #[test]
    fn diagonal_hat_is_ignored() {
        assert_eq!(direction(1, 1), None);
        assert_eq!(direction(-1, 1), None);
        assert_eq!(direction(0, 0), None);
        assert_eq!(
            translate_all(&[InputEvent::Hat { x: 1, y: -1 }, InputEvent::Hat { x: 0, y: 1 }]),
            vec![Action::Up]
        );
    }

    #[test]
    fn reveal_and_quit_require_chords() {
        assert!(translate_all(&[press(Button::Y)]).is_empty());
        assert!(translate_all(&[press(Button::Back)]).is_empty());
        assert!(translate_all(&[press(Button::LeftShoulder), press(Button::Back)]).is_empty());
        assert!(
            translate_all(&[press(Button::X), release(Button::X), press(Button::Y)]).is_empty()
        );
        assert_eq!(
            translate_all(&[
                press(Button::RightShoulder),
                press(Button::LeftShoulder),
                press(Button::Back)
            ]),
            vec![Action::Quit]
        );
    }

    #[test]
    fn keyboard_chords_and_repeat() {
        use VirtualKeyCode::*;
        assert_eq!(
            translate_all(&[key(R, true), key(LShift, true), key(R, false), key(R, true)]),
            vec![Action::Reveal]
        );
        assert_eq!(
            translate_all(&[key(Q, true), key(RControl, true), key(Q, false), key(Q, true)]),
            vec![Action::Quit]
        );
        // OS key repeat delivers extra presses without releases.
        assert_eq!(
            translate_all(&[key(Right, true), key(Right, true), key(Right, false)]),
            vec![Action::Right]
        );
        assert_eq!(
            translate_all(&[key(Return, true), key(Escape, true), key(F5, true)]),
            vec![Action::Open, Action::Return, Action::Restart]
        );
    }

    #[test]
    fn stick_is_edge_triggered_with_deadzone() {
        let stick = |x, y| InputEvent::Stick { x, y };
        assert_eq!(
            translate_all(&[
                stick(0.3, 0.0),
                stick(0.9, 0.1),
                stick(1.0, 0.0),
                stick(0.0, 0.0),
                stick(0.7, 0.7),
                stick(0.0, -0.8),
            ]),
            vec![Action::Right, Action::Down]
        );
    }

    #[test]
    fn window_close_quits() {
        assert_eq!(translate_all(&[InputEvent::Quit]), vec![Action::Quit]);
    }

    #[test]
    fn script_parsing() {
        assert_eq!(
            parse_script("right, Open,return,").unwrap(),
            vec![Action::Right, Action::Open, Action::Return]
        );
        assert_eq!(
            parse_script("right,jump").unwrap_err(),
            UnknownAction("jump".into())
        );
    }

    #[test]
    fn scripted_input_yields_one_batch_per_poll() {
        let mut input = ScriptedInput::from_actions(&[Action::Left, Action::Open]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.poll(), Action::Left.to_events());
        assert!(input.discard_pending().is_empty());
        assert_eq!(input.poll(), Action::Open.to_events());
        assert!(input.poll().is_empty());
        assert!(input.is_exhausted());
    }
}
