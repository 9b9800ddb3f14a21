//! The activity board: door grid, round state machine and animations.
//!
//! One `ActivityBoard` plays one round. The driver builds a board over a `Screen`, calls
//! [`ActivityBoard::run`], and starts a new board when it returns `true`.
//!
//! The board advances in ticks. A tick either performs one animation step (draw, present,
//! sleep through the injected `Clock`) or polls the input source once and dispatches the
//! translated actions. Input that arrives while an action or animation is being handled is
//! discarded afterwards so it cannot replay.

use std::rc::Rc;
use std::time::Duration;

use kiosk_engine::clock::Clock;
use kiosk_engine::font::Font;
use kiosk_engine::graphics::Color;
use kiosk_engine::surface::Surface;
use kiosk_engine::text::TextRenderer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::activities::distinct;
use crate::animation::{Animation, IntroReveal, Wipe};
use crate::config::{BoardConfig, Config};
use crate::door::{Door, DoorProperties};
use crate::error::{BoardError, Result};
use crate::fonts::Fonts;
use crate::input::{Action, InputEvent, InputSource, InputTranslator, ScriptedInput};
use crate::screen::Screen;
use crate::sfx::{Sfx, SoundGroup};

/// How long an input poll that found nothing waits before the next one.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Start,
    Selecting,
    InProgress,
    AllRevealed,
    GameOver,
}

/// New selection after moving one cell; moves that would leave the grid are rejected.
pub fn move_selection(index: usize, columns: usize, rows: usize, action: Action) -> usize {
    let Some((dx, dy)) = action.delta() else {
        return index;
    };
    let (row, col) = ((index / columns) as i64, (index % columns) as i64);

    let mut new_col = col + dx as i64;
    if new_col < 0 || new_col >= columns as i64 {
        new_col = col;
    }
    let mut new_row = row + dy as i64;
    if new_row < 0 || new_row >= rows as i64 {
        new_row = row;
    }
    new_row as usize * columns + new_col as usize
}

pub struct ActivityBoard<'a, S: Surface> {
    screen: &'a mut Screen<S>,
    config: &'a BoardConfig,
    sfx: &'a dyn Sfx,
    clock: &'a dyn Clock,

    full_font: Rc<dyn Font>,
    full_text: TextRenderer,
    text_color: Color,

    doors: Vec<Door>,
    columns: usize,
    rows: usize,
    selected: usize,
    state: State,
    animation: Option<Animation>,
    translator: InputTranslator,
    rng: StdRng,
    play_again: bool,
}

impl<'a, S: Surface> ActivityBoard<'a, S> {
    /// Deals `rows * columns` distinct activities onto a fresh door grid.
    ///
    /// Fails when the grid is empty, does not evenly divide the screen, or there are fewer
    /// distinct activities than doors.
    pub fn new(
        screen: &'a mut Screen<S>,
        config: &'a Config,
        activities: &[String],
        fonts: &Fonts,
        sfx: &'a dyn Sfx,
        clock: &'a dyn Clock,
    ) -> Result<Self> {
        let board = &config.board;
        let (columns, rows) = (board.columns, board.rows);
        if columns == 0 || rows == 0 {
            return Err(BoardError::EmptyGrid { columns, rows });
        }
        let size = screen.size();
        if !size.divides_evenly(columns, rows) {
            return Err(BoardError::GridMismatch {
                width: size.width,
                height: size.height,
                columns,
                rows,
            });
        }

        let needed = board.door_count();
        let mut pool = distinct(activities);
        if pool.len() < needed {
            return Err(BoardError::NotEnoughActivities {
                needed,
                available: pool.len(),
            });
        }

        let mut rng = match board.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        pool.shuffle(&mut rng);
        pool.truncate(needed);

        let props = Rc::new(DoorProperties::from_config(
            &config.door,
            size.width / columns,
            size.height / rows,
            board.line_break_marker,
            fonts.number.clone(),
            fonts.activity.clone(),
        ));
        let mut doors: Vec<Door> = pool
            .into_iter()
            .enumerate()
            .map(|(index, activity)| {
                Door::new(
                    index,
                    columns as usize,
                    activity,
                    props.clone(),
                    board.start_hidden,
                )
            })
            .collect();
        doors[0].set_selected(true);

        log::debug!(
            "dealt {needed} doors ({columns}x{rows}, {}x{} px each)",
            props.width,
            props.height
        );

        Ok(Self {
            screen,
            config: board,
            sfx,
            clock,
            full_font: fonts.full.clone(),
            full_text: TextRenderer::new(board.full_line_spacing)
                .with_marker(board.line_break_marker),
            text_color: config.door.text_color.0,
            doors,
            columns: columns as usize,
            rows: rows as usize,
            selected: 0,
            state: State::Start,
            animation: None,
            translator: InputTranslator::new(),
            rng,
            play_again: false,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door(&self, index: usize) -> Option<&Door> {
        self.doors.get(index)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_door(&self) -> &Door {
        &self.doors[self.selected]
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn play_again(&self) -> bool {
        self.play_again
    }

    pub fn screen(&self) -> &Screen<S> {
        &*self.screen
    }

    /// Plays the round to the end and returns whether another round should follow.
    pub fn run(&mut self, input: &mut dyn InputSource) -> bool {
        log::info!("round started with {} doors", self.doors.len());
        while self.state != State::GameOver {
            self.tick(input);
        }
        log::info!("round over (play again: {})", self.play_again);
        self.play_again
    }

    /// Ticks until the script is used up and nothing is animating, or the round ends.
    pub fn run_script(&mut self, input: &mut ScriptedInput) -> State {
        loop {
            let idle = !self.is_animating() && self.state != State::Start;
            if self.state == State::GameOver || (idle && input.is_exhausted()) {
                return self.state;
            }
            self.tick(input);
        }
    }

    /// Advances the board by one animation step or one input poll.
    pub fn tick(&mut self, input: &mut dyn InputSource) {
        if let Some(animation) = self.animation.take() {
            self.step_animation(animation, input);
            return;
        }
        match self.state {
            State::Start => self.start(),
            State::GameOver => {}
            State::Selecting | State::InProgress | State::AllRevealed => {
                self.process_input(input)
            }
        }
    }

    /// Applies one action to the state machine. Returns whether the current state handles it.
    pub fn handle_action(&mut self, action: Action) -> bool {
        log::debug!("{:?}: {action}", self.state);
        match (self.state, action) {
            (State::Selecting, Action::Up | Action::Down | Action::Left | Action::Right) => {
                self.move_selection(action);
                true
            }
            (State::Selecting, Action::Open) => {
                self.open_selected();
                true
            }
            (State::Selecting, Action::Reveal) => {
                self.reveal_all();
                true
            }
            (State::InProgress, Action::Return) => {
                self.redraw_all();
                self.set_state(State::Selecting);
                true
            }
            (State::Selecting | State::AllRevealed, Action::Restart) => {
                self.game_over(true);
                true
            }
            (State::Selecting | State::InProgress | State::AllRevealed, Action::Quit) => {
                self.game_over(false);
                true
            }
            _ => false,
        }
    }

    fn set_state(&mut self, state: State) {
        if self.state != state {
            log::info!("board state {:?} -> {state:?}", self.state);
            self.state = state;
        }
    }

    fn game_over(&mut self, play_again: bool) {
        self.play_again = play_again;
        self.set_state(State::GameOver);
    }

    fn start(&mut self) {
        self.sfx.play(SoundGroup::Start);
        self.screen.fill_bg();

        let hidden: Vec<usize> = self
            .doors
            .iter()
            .filter(|d| d.is_hidden())
            .map(Door::index)
            .collect();
        if hidden.is_empty() {
            self.redraw_all();
            self.set_state(State::Selecting);
        } else {
            self.animation = Some(Animation::Intro(IntroReveal::new(hidden)));
        }
    }

    fn process_input(&mut self, input: &mut dyn InputSource) {
        let events = input.poll();
        if events.is_empty() {
            self.clock.sleep(IDLE_POLL_INTERVAL);
            return;
        }

        let mut events = events.into_iter();
        while let Some(event) = events.next() {
            if let InputEvent::Resized(size) = event {
                self.screen.window_resized(size);
                self.screen.present();
                continue;
            }
            let Some(action) = self.translator.translate(&event) else {
                continue;
            };
            if self.handle_action(action) {
                for rest in events.by_ref() {
                    self.translator.track(&rest);
                }
                if self.animation.is_none() {
                    self.discard_pending(input);
                }
                return;
            }
        }
    }

    fn discard_pending(&mut self, input: &mut dyn InputSource) {
        for event in input.discard_pending() {
            self.translator.track(&event);
        }
    }

    fn move_selection(&mut self, action: Action) {
        let new = move_selection(self.selected, self.columns, self.rows, action);
        if new == self.selected {
            return;
        }
        self.doors[self.selected].set_selected(false);
        self.doors[new].set_selected(true);
        self.selected = new;
        self.sfx.play(SoundGroup::Move);
        self.redraw_dirty();
    }

    fn open_selected(&mut self) {
        if self.doors[self.selected].is_open() {
            self.sfx.play(SoundGroup::Oops);
            return;
        }
        self.sfx.play(SoundGroup::Open);
        self.animation = Some(Animation::OpenDoor {
            door: self.selected,
            wipe: Wipe::new(self.config.door_open_step),
        });
    }

    fn reveal_all(&mut self) {
        self.sfx.play(SoundGroup::RevealAll);
        for door in self.doors.iter_mut().filter(|d| d.is_open()) {
            door.set_revealed(true);
        }
        self.redraw_dirty();
        self.animation = Some(Animation::RevealAll(Wipe::new(self.config.reveal_all_step)));
    }

    fn step_animation(&mut self, animation: Animation, input: &mut dyn InputSource) {
        match animation {
            Animation::Intro(mut intro) => {
                self.clock.sleep(self.config.intro_step_delay());
                if let Some(index) = intro.next_door(&mut self.rng) {
                    self.doors[index].set_hidden(false);
                    self.redraw_dirty();
                }
                if intro.remaining() > 0 {
                    self.animation = Some(Animation::Intro(intro));
                } else {
                    self.redraw_all();
                    self.set_state(State::Selecting);
                    self.discard_pending(input);
                }
            }
            Animation::OpenDoor { door, mut wipe } => match wipe.advance() {
                Some(percent) => {
                    self.doors[door].set_percent_open(percent);
                    self.redraw_dirty();
                    self.clock.sleep(self.config.door_open_step_delay());
                    self.animation = Some(Animation::OpenDoor { door, wipe });
                }
                None => {
                    let opened = &mut self.doors[door];
                    opened.set_percent_open(0);
                    opened.set_open(true);
                    self.show_full_screen(door);
                    self.set_state(State::InProgress);
                    self.discard_pending(input);
                }
            },
            Animation::RevealAll(mut wipe) => match wipe.advance() {
                Some(percent) => {
                    for d in self.doors.iter_mut().filter(|d| !d.is_open()) {
                        d.set_percent_open(percent);
                    }
                    self.redraw_dirty();
                    self.animation = Some(Animation::RevealAll(wipe));
                }
                None => {
                    for d in &mut self.doors {
                        d.set_percent_open(0);
                        d.set_revealed(true);
                    }
                    self.redraw_dirty();
                    self.set_state(State::AllRevealed);
                    self.discard_pending(input);
                }
            },
        }
    }

    /// Replaces the grid with one activity in the large font.
    fn show_full_screen(&mut self, index: usize) {
        let text = self.full_text.render(
            self.doors[index].activity(),
            self.full_font.as_ref(),
            self.text_color,
        );
        let (x, y) = self.screen.bounds().centered_origin(text.width(), text.height());
        self.screen.fill_bg();
        self.screen.blit(&text, x, y);
        self.screen.present();
    }

    /// Draws every door whose dirty flag is set, then presents.
    fn redraw_dirty(&mut self) {
        for door in self.doors.iter_mut().filter(|d| d.is_updated()) {
            let canvas = door.surface();
            self.screen
                .blit(&canvas, door.screen_x() as i32, door.screen_y() as i32);
            door.mark_drawn();
        }
        self.screen.present();
    }

    fn redraw_all(&mut self) {
        self.screen.fill_bg();
        for door in &mut self.doors {
            door.mark_updated();
        }
        self.redraw_dirty();
    }
}
