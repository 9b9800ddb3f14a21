mod common;

use std::collections::HashSet;
use std::time::Duration;

use activity_board::board::IDLE_POLL_INTERVAL;
use activity_board::input::{Action, InputEvent, InputSource, ScriptedInput};
use activity_board::sfx::SoundGroup;
use activity_board::{ActivityBoard, BoardError, State};
use common::{Rig, letters, play};
use kiosk_engine::clock::ManualClock;
use kiosk_engine::graphics::Canvas;
use kiosk_engine::surface::Surface;
use kiosk_engine::text::TextRenderer;

fn started<S: Surface>(board: &mut ActivityBoard<'_, S>) {
    let state = play(board, &[]);
    assert_eq!(state, State::Selecting);
}

/// What the screen should hold while `activity` is shown full-screen.
fn full_screen_frame(rig: &Rig, activity: &str) -> Canvas {
    let config = &rig.config;
    let text = TextRenderer::new(config.board.full_line_spacing)
        .with_marker(config.board.line_break_marker)
        .render(activity, rig.fonts.full.as_ref(), config.door.text_color.0);
    let mut frame = Canvas::filled(
        config.display.width,
        config.display.height,
        config.board.bg_color.0,
    );
    let (x, y) = frame.bounds().centered_origin(text.width(), text.height());
    frame.renderer().blit(&text, x, y);
    frame
}

fn selected_count<S: Surface>(board: &ActivityBoard<'_, S>) -> usize {
    board.doors().iter().filter(|d| d.is_selected()).count()
}

#[test]
fn right_open_return_scenario() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    assert!(board.door(0).unwrap().is_selected());
    started(&mut board);

    play(&mut board, &[Action::Right]);
    assert_eq!(board.selected_index(), 1);
    assert!(board.door(1).unwrap().is_selected());
    assert!(!board.door(0).unwrap().is_selected());
    assert_eq!(rig.sfx.played(), vec![SoundGroup::Start, SoundGroup::Move]);

    assert_eq!(play(&mut board, &[Action::Open]), State::InProgress);
    assert!(board.door(1).unwrap().is_open());
    assert_eq!(board.door(1).unwrap().percent_open(), 0);
    assert_eq!(rig.sfx.count(SoundGroup::Open), 1);
    // 2% per step, 20ms per step.
    assert_eq!(rig.clock.elapsed(), Duration::from_millis(1000));

    let shown = board.screen().frame();
    let activity = board.door(1).unwrap().activity();
    assert_eq!(shown, full_screen_frame(&rig, activity).rgba());
    let other = board.door(0).unwrap().activity();
    assert_ne!(shown, full_screen_frame(&rig, other).rgba());

    assert_eq!(play(&mut board, &[Action::Return]), State::Selecting);
    assert!(board.door(1).unwrap().is_open());
    assert_eq!(board.selected_index(), 1);
    let frame = board.screen().surface();
    assert_eq!(frame.pixel(180, 45), Some(rig.config.door.cross_color.0));
    assert_eq!(frame.pixel(20, 45), Some(rig.config.door.ellipse_color.0));
}

#[test]
fn overflowing_activity_is_centered_full_screen() {
    let mut rig = Rig::new();
    rig.activities = (1..=12).map(|n| format!("JUMPING JACKS X{n}")).collect();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);

    assert_eq!(play(&mut board, &[Action::Open]), State::InProgress);
    let activity = board.door(0).unwrap().activity();
    let text = rig.fonts.full.measure(activity);
    assert!(text > rig.config.display.width, "{activity} should overflow");
    assert_eq!(
        board.screen().frame(),
        full_screen_frame(&rig, activity).rgba()
    );
}

#[test]
fn exactly_one_door_stays_selected() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    assert_eq!(selected_count(&board), 1);
    started(&mut board);

    let path = [
        Action::Right,
        Action::Right,
        Action::Down,
        Action::Left,
        Action::Down,
        Action::Down,
        Action::Right,
        Action::Right,
        Action::Right,
        Action::Up,
        Action::Left,
    ];
    for action in path {
        play(&mut board, &[action]);
        assert_eq!(selected_count(&board), 1, "after {action}");
        assert!(board.selected_door().is_selected());
    }
    assert_eq!(board.selected_index(), 6);
}

#[test]
fn dealt_activities_are_distinct() {
    let mut rig = Rig::new();
    rig.activities = letters(20);
    rig.activities.extend(letters(5));

    for seed in 0..10 {
        rig.config.board.seed = Some(seed);
        let mut screen = rig.screen();
        let board = rig.board(&mut screen);
        let dealt: HashSet<&str> = board.doors().iter().map(|d| d.activity()).collect();
        assert_eq!(dealt.len(), 12);
        assert!(dealt.iter().all(|a| rig.activities.iter().any(|p| p.as_str() == *a)));
    }
}

#[test]
fn same_seed_deals_same_board() {
    let rig = Rig::new();
    let deal = || {
        let mut screen = rig.screen();
        let board = rig.board(&mut screen);
        board
            .doors()
            .iter()
            .map(|d| d.activity().to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(deal(), deal());
}

#[test]
fn left_from_first_column_does_nothing() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);

    play(&mut board, &[Action::Left, Action::Up]);
    assert_eq!(board.selected_index(), 0);
    assert_eq!(rig.sfx.count(SoundGroup::Move), 0);

    play(&mut board, &[Action::Down, Action::Down, Action::Down, Action::Right]);
    assert_eq!(board.selected_index(), 9);
    assert_eq!(rig.sfx.count(SoundGroup::Move), 3);
}

#[test]
fn opening_an_open_door_says_oops() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);

    play(&mut board, &[Action::Open, Action::Return]);
    let elapsed = rig.clock.elapsed();
    assert_eq!(play(&mut board, &[Action::Open]), State::Selecting);
    assert!(board.door(0).unwrap().is_open());
    assert_eq!(rig.sfx.count(SoundGroup::Open), 1);
    assert_eq!(rig.sfx.count(SoundGroup::Oops), 1);
    assert_eq!(rig.clock.elapsed(), elapsed, "no wipe for an open door");
}

#[test]
fn in_progress_ignores_everything_but_return_and_quit() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);

    play(&mut board, &[Action::Open]);
    let state = play(
        &mut board,
        &[Action::Right, Action::Open, Action::Reveal, Action::Restart],
    );
    assert_eq!(state, State::InProgress);
    assert_eq!(board.selected_index(), 0);

    assert_eq!(play(&mut board, &[Action::Quit]), State::GameOver);
    assert!(!board.play_again());
}

#[test]
fn reveal_all_keeps_opened_doors_in_normal_color() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);

    play(&mut board, &[Action::Right, Action::Open, Action::Return]);
    assert_eq!(play(&mut board, &[Action::Reveal]), State::AllRevealed);
    assert_eq!(rig.sfx.count(SoundGroup::RevealAll), 1);

    let doors = board.doors();
    assert!(doors.iter().all(|d| d.is_revealed() && d.percent_open() == 0));
    assert!(doors[1].is_open());
    assert_eq!(doors[1].reveal_text_color(), rig.config.door.text_color.0);
    for door in doors.iter().filter(|d| d.index() != 1) {
        assert!(!door.is_open());
        assert_eq!(door.reveal_text_color(), rig.config.door.unused_text_color.0);
    }

    // The selection frame is gone once a door is revealed.
    let frame = board.screen().surface();
    assert_eq!(frame.pixel(125, 5), Some(rig.config.door.bg_color.0));
}

#[test]
fn reveal_all_with_nothing_opened() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);

    assert_eq!(play(&mut board, &[Action::Reveal]), State::AllRevealed);
    for door in board.doors() {
        assert!(door.is_revealed());
        assert!(!door.is_open());
        assert_eq!(door.reveal_text_color(), rig.config.door.unused_text_color.0);
    }
    assert_eq!(rig.clock.elapsed(), Duration::ZERO, "reveal-all runs without delays");
}

#[test]
fn all_revealed_only_restarts_or_quits() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);
    play(&mut board, &[Action::Reveal]);

    let state = play(
        &mut board,
        &[Action::Open, Action::Right, Action::Return, Action::Reveal],
    );
    assert_eq!(state, State::AllRevealed);
    assert_eq!(board.selected_index(), 0);
    assert_eq!(rig.sfx.count(SoundGroup::RevealAll), 1);

    assert_eq!(play(&mut board, &[Action::Restart]), State::GameOver);
    assert!(board.play_again());
}

#[test]
fn run_returns_play_again() {
    let rig = Rig::new();
    let mut screen = rig.screen();

    {
        let mut board = rig.board(&mut screen);
        let mut input = ScriptedInput::from_actions(&[Action::Right, Action::Restart]);
        assert!(board.run(&mut input));
    }
    {
        let mut board = rig.board(&mut screen);
        let mut input = ScriptedInput::from_actions(&[Action::Quit]);
        assert!(!board.run(&mut input));
    }
}

#[test]
fn intro_reveals_one_door_per_step() {
    let rig = Rig::with(|c| c.board.start_hidden = true);
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    assert!(board.doors().iter().all(|d| d.is_hidden()));

    let mut input = ScriptedInput::new();
    board.tick(&mut input);
    assert!(board.is_animating());
    assert_eq!(board.state(), State::Start);

    for step in 1..=12 {
        board.tick(&mut input);
        let shown = board.doors().iter().filter(|d| !d.is_hidden()).count();
        assert_eq!(shown, step);
    }
    assert_eq!(board.state(), State::Selecting);
    assert!(!board.is_animating());
    assert_eq!(rig.clock.elapsed(), Duration::from_millis(75 * 12));
    assert_eq!(rig.sfx.played(), vec![SoundGroup::Start]);
}

#[test]
fn idle_polls_sleep_instead_of_spinning() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);

    let mut input = ScriptedInput::new();
    board.tick(&mut input);
    board.tick(&mut input);
    assert_eq!(rig.clock.elapsed(), IDLE_POLL_INTERVAL * 2);
}

#[test]
fn bad_configurations_are_rejected() {
    let build = |rig: &Rig| {
        let mut screen = rig.screen();
        let clock = ManualClock::new();
        ActivityBoard::new(
            &mut screen,
            &rig.config,
            &rig.activities,
            &rig.fonts,
            &rig.sfx,
            &clock,
        )
        .err()
    };

    let rig = Rig::with(|c| c.board.columns = 7);
    assert!(matches!(
        build(&rig),
        Some(BoardError::GridMismatch { columns: 7, rows: 3, .. })
    ));

    let rig = Rig::with(|c| c.board.rows = 0);
    assert!(matches!(build(&rig), Some(BoardError::EmptyGrid { .. })));

    let mut rig = Rig::new();
    rig.activities = letters(11);
    rig.activities.push("A".to_string());
    assert!(matches!(
        build(&rig),
        Some(BoardError::NotEnoughActivities {
            needed: 12,
            available: 11
        })
    ));
}

/// Delivers every queued event at once, like a window that piled up events during an
/// animation.
#[derive(Default)]
struct BurstInput {
    now: Vec<InputEvent>,
    later: Vec<InputEvent>,
}

impl InputSource for BurstInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.now)
    }

    fn discard_pending(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.later)
    }
}

#[test]
fn input_after_a_handled_action_is_dropped() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);

    let mut input = BurstInput::default();
    input.now.extend(Action::Right.to_events());
    input.now.extend(Action::Right.to_events());
    input.later.extend(Action::Down.to_events());
    board.tick(&mut input);

    assert_eq!(board.selected_index(), 1);
    assert!(input.later.is_empty());
    assert_eq!(rig.sfx.count(SoundGroup::Move), 1);
}

#[test]
fn input_during_an_animation_is_dropped() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);

    let mut input = BurstInput::default();
    input.now.extend(Action::Open.to_events());
    input.later.extend(Action::Return.to_events());
    while {
        board.tick(&mut input);
        board.is_animating()
    } {}

    assert_eq!(board.state(), State::InProgress);
    assert!(input.later.is_empty());
}

#[test]
fn unhandled_actions_do_not_drop_the_rest_of_the_batch() {
    let rig = Rig::new();
    let mut screen = rig.screen();
    let mut board = rig.board(&mut screen);
    started(&mut board);

    let mut input = ScriptedInput::new();
    let mut batch = Action::Return.to_events();
    batch.extend(Action::Down.to_events());
    input.push_batch(batch);
    board.tick(&mut input);
    assert_eq!(board.selected_index(), 4);
}
