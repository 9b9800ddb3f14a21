pub mod activities;
pub mod animation;
pub mod board;
pub mod config;
pub mod door;
pub mod error;
pub mod fonts;
pub mod headful;
pub mod input;
pub mod screen;
pub mod sfx;

pub use board::{ActivityBoard, State};
pub use config::Config;
pub use error::{BoardError, Result};
