use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::config::SoundConfig;
use crate::error::{BoardError, Result};

/// Playback volume for every cue (0.0..=1.0).
pub const CUE_VOLUME: f32 = 0.8;

/// The events the board plays a sound for. Each group may hold several files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundGroup {
    Move,
    Open,
    Oops,
    Start,
    RevealAll,
}

impl SoundGroup {
    pub const ALL: [SoundGroup; 5] = [
        SoundGroup::Move,
        SoundGroup::Open,
        SoundGroup::Oops,
        SoundGroup::Start,
        SoundGroup::RevealAll,
    ];

    fn files(self, config: &SoundConfig) -> &[PathBuf] {
        match self {
            SoundGroup::Move => &config.move_sounds,
            SoundGroup::Open => &config.open,
            SoundGroup::Oops => &config.oops,
            SoundGroup::Start => &config.start,
            SoundGroup::RevealAll => &config.reveal_all,
        }
    }
}

impl fmt::Display for SoundGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoundGroup::Move => "move",
            SoundGroup::Open => "open",
            SoundGroup::Oops => "oops",
            SoundGroup::Start => "start",
            SoundGroup::RevealAll => "reveal_all",
        };
        f.write_str(name)
    }
}

/// Fire-and-forget sound cues. Playback never blocks the caller.
pub trait Sfx {
    fn play(&self, group: SoundGroup);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSfx;

impl Sfx for SilentSfx {
    fn play(&self, group: SoundGroup) {
        log::trace!("sfx {group} (silent)");
    }
}

/// Remembers every cue in order; used by tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingSfx {
    played: RefCell<Vec<SoundGroup>>,
}

impl RecordingSfx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<SoundGroup> {
        self.played.borrow().clone()
    }

    pub fn count(&self, group: SoundGroup) -> usize {
        self.played.borrow().iter().filter(|&&g| g == group).count()
    }

    pub fn clear(&self) {
        self.played.borrow_mut().clear();
    }
}

impl Sfx for RecordingSfx {
    fn play(&self, group: SoundGroup) {
        self.played.borrow_mut().push(group);
    }
}

/// Encoded clips per group, already checked to decode.
pub type Clips = HashMap<SoundGroup, Vec<Arc<[u8]>>>;

/// Reads every configured clip into memory.
///
/// Clips that cannot be decoded are skipped with a warning; an unreadable file is an error.
pub fn load_clips(config: &SoundConfig) -> Result<Clips> {
    let mut clips = HashMap::new();
    for group in SoundGroup::ALL {
        let mut loaded: Vec<Arc<[u8]>> = Vec::new();
        for path in group.files(config) {
            let bytes = fs::read(path).map_err(|source| BoardError::Io {
                path: path.clone(),
                source,
            })?;
            let bytes: Arc<[u8]> = bytes.into();
            if let Err(err) = Decoder::new(Cursor::new(bytes.clone())) {
                log::warn!("skipping undecodable {group} sound {}: {err}", path.display());
                continue;
            }
            loaded.push(bytes);
        }
        if loaded.is_empty() {
            log::warn!("no {group} sounds configured");
        }
        clips.insert(group, loaded);
    }
    Ok(clips)
}

/// Plays one randomly chosen clip of the requested group on the default output device.
pub struct RodioSfx {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clips: Clips,
}

impl RodioSfx {
    /// Loads the configured clips and opens the default output device.
    pub fn load(config: &SoundConfig) -> Result<Self> {
        let clips = load_clips(config)?;
        let (stream, handle) =
            OutputStream::try_default().map_err(|err| BoardError::Audio(err.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            clips,
        })
    }
}

impl Sfx for RodioSfx {
    fn play(&self, group: SoundGroup) {
        let Some(clip) = self
            .clips
            .get(&group)
            .and_then(|clips| clips.choose(&mut rand::thread_rng()))
        else {
            return;
        };
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        sink.set_volume(CUE_VOLUME);

        let Ok(source) = Decoder::new(Cursor::new(clip.clone())) else {
            return;
        };
        sink.append(source);
        sink.detach();
    }
}
