//! Frame-hash goldens for headless runs.
//!
//! A [`FrameLog`] keeps the SHA-256 of every presented frame. Tests compare the log against a
//! JSON file under `tests/goldens/`; a missing file is created, and setting
//! `ACTIVITY_BOARD_UPDATE_GOLDENS=1` rewrites existing ones.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::surface::SurfaceSize;

pub const UPDATE_GOLDENS_VAR: &str = "ACTIVITY_BOARD_UPDATE_GOLDENS";

const FORMAT_VERSION: u32 = 1;

/// True when `name` is set to one of `1`, `true`, `yes`, `on` (any case).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| {
        ["1", "true", "yes", "on"]
            .iter()
            .any(|on| value.eq_ignore_ascii_case(on))
    })
}

pub fn update_goldens_enabled() -> bool {
    env_flag(UPDATE_GOLDENS_VAR)
}

pub fn rgba_sha256_hex(rgba: &[u8]) -> String {
    hex::encode(Sha256::digest(rgba))
}

/// `<manifest_dir>/tests/goldens/<name>.json`, with anything outside `[A-Za-z0-9_-]` in
/// `name` replaced by `_`.
pub fn golden_path(manifest_dir: impl AsRef<Path>, name: &str) -> PathBuf {
    let stem: String = name
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    manifest_dir
        .as_ref()
        .join("tests")
        .join("goldens")
        .join(stem + ".json")
}

#[derive(Debug, Error)]
pub enum GoldenError {
    #[error("golden {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("golden {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "golden {path} was recorded at {expected}, this run is {actual} (set ACTIVITY_BOARD_UPDATE_GOLDENS=1 to rewrite)"
    )]
    Shape {
        path: String,
        expected: String,
        actual: String,
    },

    #[error(
        "golden {path} differs at frame {frame}: expected {expected}, got {actual} (set ACTIVITY_BOARD_UPDATE_GOLDENS=1 to rewrite)"
    )]
    Frame {
        path: String,
        frame: usize,
        expected: String,
        actual: String,
    },
}

/// Ordered hashes of presented frames plus what is needed to tell two recordings apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLog {
    pub version: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub frames: Vec<String>,
}

impl FrameLog {
    pub fn new(name: impl Into<String>, size: SurfaceSize) -> Self {
        Self {
            version: FORMAT_VERSION,
            name: name.into(),
            width: size.width,
            height: size.height,
            frames: Vec::new(),
        }
    }

    pub fn record(&mut self, rgba: &[u8]) {
        self.frames.push(rgba_sha256_hex(rgba));
    }

    fn shape(&self) -> String {
        format!("v{} {}x{}", self.version, self.width, self.height)
    }

    pub fn read(path: &Path) -> Result<Self, GoldenError> {
        let file = fs::File::open(path).map_err(|source| GoldenError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| GoldenError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), GoldenError> {
        let io_err = |source| GoldenError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let mut out = BufWriter::new(fs::File::create(path).map_err(io_err)?);
        serde_json::to_writer_pretty(&mut out, self).map_err(|source| GoldenError::Json {
            path: path.display().to_string(),
            source,
        })?;
        out.flush().map_err(io_err)
    }

    /// Compares against the golden at `path`, or (re)writes it when `update` is set or the
    /// file does not exist yet.
    pub fn check(&self, path: &Path, update: bool) -> Result<(), GoldenError> {
        if update || !path.exists() {
            self.write(path)?;
            log::info!("wrote golden {}", path.display());
            return Ok(());
        }

        let golden = Self::read(path)?;
        let shown = || path.display().to_string();
        if golden.shape() != self.shape() {
            return Err(GoldenError::Shape {
                path: shown(),
                expected: golden.shape(),
                actual: self.shape(),
            });
        }

        let missing = "<none>".to_string();
        let frames = golden.frames.len().max(self.frames.len());
        for frame in 0..frames {
            let expected = golden.frames.get(frame).unwrap_or(&missing);
            let actual = self.frames.get(frame).unwrap_or(&missing);
            if expected != actual {
                return Err(GoldenError::Frame {
                    path: shown(),
                    frame,
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
        }
        Ok(())
    }
}
