//! Activity board kiosk.
//!
//! ```bash
//! # Full-screen board driven by a game controller and the keyboard
//! activity-board config.json
//!
//! # Keyboard-only build (no gilrs/libudev)
//! cargo build --release --no-default-features
//!
//! # Scripted round without a window; prints the final frame hash
//! activity-board config.json --headless --seed 7 --script right,open,return,reveal
//! ```

use std::path::PathBuf;

use activity_board::activities::load_activities;
use activity_board::config::Config;
use activity_board::fonts::Fonts;
use activity_board::headful::HeadfulInput;
use activity_board::input::{ScriptedInput, parse_script};
use activity_board::screen::Screen;
use activity_board::sfx::{RecordingSfx, RodioSfx, SilentSfx, Sfx, SoundGroup};
use activity_board::ActivityBoard;
use anyhow::{Context, Result};
use clap::Parser;
use kiosk_engine::app::{AppConfig, open_window};
use kiosk_engine::clock::{ManualClock, SystemClock};
use kiosk_engine::regression::rgba_sha256_hex;
use kiosk_engine::surface::RgbaBufferSurface;

#[derive(Parser)]
#[command(name = "activity-board")]
#[command(version)]
#[command(about = "Pick-a-door activity board for a TV and a game controller")]
struct Cli {
    /// Configuration file
    #[arg(default_value = "config.json")]
    config: PathBuf,

    /// Play a scripted round against an in-memory frame instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Comma-separated actions for --headless (up, down, left, right, open, return, reveal,
    /// restart, quit)
    #[arg(long, requires = "headless")]
    script: Option<String>,

    /// Seed for the door shuffle and intro order
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading configuration {}", cli.config.display()))?;
    if cli.seed.is_some() {
        config.board.seed = cli.seed;
    }

    if cli.headless {
        run_headless(&config, cli.script.as_deref().unwrap_or(""))
    } else {
        run_windowed(&config)
    }
}

fn run_windowed(config: &Config) -> Result<()> {
    let fonts = Fonts::load(config).context("loading fonts")?;
    let sfx: Box<dyn Sfx> = match RodioSfx::load(&config.sounds) {
        Ok(sfx) => Box::new(sfx),
        Err(err) => {
            log::warn!("audio disabled: {err}");
            Box::new(SilentSfx)
        }
    };

    let app = AppConfig {
        title: "Activity Board".to_string(),
        size: config.display.size(),
        fullscreen: config.display.fullscreen,
        vsync: Some(true),
        hide_cursor: true,
    };
    let (mut window, surface) = open_window(&app).context("opening display")?;
    let mut screen = Screen::new(surface, config.board.bg_color.0);
    let mut input = HeadfulInput::new(&mut window);
    let clock = SystemClock;

    for round in 0u64.. {
        // Re-read the list every round so it can be edited between games.
        let activities = load_activities(&config.board.activities_file)?;
        let mut round_config = config.clone();
        round_config.board.seed = config.board.seed.map(|seed| seed.wrapping_add(round));

        let mut board = ActivityBoard::new(
            &mut screen,
            &round_config,
            &activities,
            &fonts,
            sfx.as_ref(),
            &clock,
        )?;
        if !board.run(&mut input) {
            break;
        }
    }
    Ok(())
}

fn run_headless(config: &Config, script: &str) -> Result<()> {
    let actions = parse_script(script)?;
    let activities = load_activities(&config.board.activities_file)?;
    let fonts = Fonts::load(config).context("loading fonts")?;
    let mut screen = Screen::new(
        RgbaBufferSurface::new(config.display.size()),
        config.board.bg_color.0,
    );
    let sfx = RecordingSfx::new();
    let clock = ManualClock::new();
    let mut input = ScriptedInput::from_actions(&actions);

    let (state, play_again, opened) = {
        let mut board = ActivityBoard::new(&mut screen, config, &activities, &fonts, &sfx, &clock)?;
        let state = board.run_script(&mut input);
        let opened: Vec<String> = board
            .doors()
            .iter()
            .filter(|d| d.is_open())
            .map(|d| format!("{}:{}", d.index() + 1, d.activity()))
            .collect();
        (state, board.play_again(), opened)
    };

    println!("state: {state:?}");
    println!("play again: {play_again}");
    println!("opened: [{}]", opened.join(", "));
    let cues: Vec<String> = sfx.played().iter().map(SoundGroup::to_string).collect();
    println!("sounds: [{}]", cues.join(", "));
    println!("animation time: {:?}", clock.elapsed());
    println!("frame sha256: {}", rgba_sha256_hex(screen.frame()));
    Ok(())
}
