//! The kiosk configuration document (JSON).
//!
//! Every section has defaults matching the classic 1920x1080, 4x3 board, so a config file only
//! needs to list what differs. Relative paths are resolved against the config file's directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use kiosk_engine::graphics::{self, Color};
use kiosk_engine::surface::SurfaceSize;
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};

/// A color as written in the config: a name, `#rrggbb[aa]`, or an `[r, g, b(, a)]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum RawColor {
    Text(String),
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawColor", into = "RawColor")]
pub struct ConfigColor(pub Color);

impl TryFrom<RawColor> for ConfigColor {
    type Error = String;

    fn try_from(raw: RawColor) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawColor::Rgb([r, g, b]) => Ok(Self([r, g, b, 255])),
            RawColor::Rgba(c) => Ok(Self(c)),
            RawColor::Text(text) => graphics::named_color(&text)
                .or_else(|| graphics::hex_color(&text))
                .map(Self)
                .ok_or_else(|| format!("unknown color {text:?}")),
        }
    }
}

impl From<ConfigColor> for RawColor {
    fn from(color: ConfigColor) -> Self {
        RawColor::Rgba(color.0)
    }
}

fn named(name: &str) -> ConfigColor {
    ConfigColor(graphics::named_color(name).unwrap_or(graphics::WHITE))
}

/// A font file and pixel size. Without a file the built-in block font is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default)]
    pub file: Option<PathBuf>,
    pub size: u32,
}

impl FontSpec {
    pub fn builtin(size: u32) -> Self {
        Self { file: None, size }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fullscreen: true,
        }
    }
}

impl DisplayConfig {
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: u32,
    pub columns: u32,
    pub bg_color: ConfigColor,
    pub start_hidden: bool,
    pub activities_file: PathBuf,
    pub line_break_marker: char,
    /// Font for the full-screen activity display.
    pub full_font: FontSpec,
    pub full_line_spacing: u32,
    pub intro_step_delay_ms: u64,
    pub door_open_step_delay_ms: u64,
    /// Percent added per door-open wipe step.
    pub door_open_step: u32,
    /// Percent added per reveal-all wipe step.
    pub reveal_all_step: u32,
    /// Fixed RNG seed; rounds are shuffled from entropy when unset.
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 4,
            bg_color: named("black"),
            start_hidden: true,
            activities_file: PathBuf::from("activities.txt"),
            line_break_marker: '`',
            full_font: FontSpec::builtin(240),
            full_line_spacing: 16,
            intro_step_delay_ms: 75,
            door_open_step_delay_ms: 20,
            door_open_step: 2,
            reveal_all_step: 5,
            seed: None,
        }
    }
}

impl BoardConfig {
    pub fn door_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub fn intro_step_delay(&self) -> Duration {
        Duration::from_millis(self.intro_step_delay_ms)
    }

    pub fn door_open_step_delay(&self) -> Duration {
        Duration::from_millis(self.door_open_step_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    pub bg_color: ConfigColor,
    pub selection_color: ConfigColor,
    pub panel_color: ConfigColor,
    pub ellipse_color: ConfigColor,
    pub number_color: ConfigColor,
    pub cross_color: ConfigColor,
    pub text_color: ConfigColor,
    pub unused_text_color: ConfigColor,
    pub number_font: FontSpec,
    pub activity_font: FontSpec,
    pub line_spacing: u32,
    pub border: u32,
    pub ellipse_inset: u32,
    pub cross_inset: u32,
    pub cross_thickness: u32,
    pub number_offset_y: u32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            bg_color: named("black"),
            selection_color: named("orange"),
            panel_color: named("red"),
            ellipse_color: named("yellow"),
            number_color: named("red"),
            cross_color: named("red"),
            text_color: named("white"),
            unused_text_color: named("gray"),
            number_font: FontSpec::builtin(260),
            activity_font: FontSpec::builtin(65),
            line_spacing: 8,
            border: 20,
            ellipse_inset: 40,
            cross_inset: 40,
            cross_thickness: 40,
            number_offset_y: 10,
        }
    }
}

/// Sound files per cue group; one file of a group is picked at random per cue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    #[serde(rename = "move")]
    pub move_sounds: Vec<PathBuf>,
    pub open: Vec<PathBuf>,
    pub oops: Vec<PathBuf>,
    pub start: Vec<PathBuf>,
    pub reveal_all: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub board: BoardConfig,
    pub door: DoorConfig,
    pub sounds: SoundConfig,
}

impl Config {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Reads a config file and resolves its relative paths against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BoardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text).map_err(|source| BoardError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.with_base_dir(base))
    }

    pub fn with_base_dir(mut self, base: &Path) -> Self {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.board.activities_file);
        for font in [
            &mut self.board.full_font,
            &mut self.door.number_font,
            &mut self.door.activity_font,
        ] {
            if let Some(file) = font.file.as_mut() {
                resolve(file);
            }
        }
        let sounds = &mut self.sounds;
        for group in [
            &mut sounds.move_sounds,
            &mut sounds.open,
            &mut sounds.oops,
            &mut sounds.start,
            &mut sounds.reveal_all,
        ] {
            group.iter_mut().for_each(resolve);
        }
        self
    }
}
