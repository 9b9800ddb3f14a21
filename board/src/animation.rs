//! Step state for the board's multi-frame animations.
//!
//! Each animation is advanced one step per board tick; the board draws and sleeps between
//! steps, so an animation is still blocking from the player's point of view.

use rand::Rng;

/// Percent progress from 0 to 100 in fixed increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wipe {
    percent: u32,
    step: u32,
}

impl Wipe {
    pub fn new(step: u32) -> Self {
        Self {
            percent: 0,
            step: step.clamp(1, 100),
        }
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// The next progress value, ending with exactly 100. `None` once 100 has been returned.
    pub fn advance(&mut self) -> Option<u32> {
        if self.percent >= 100 {
            return None;
        }
        self.percent = (self.percent + self.step).min(100);
        Some(self.percent)
    }

    /// Number of `advance` calls that yield a value.
    pub fn total_steps(&self) -> u32 {
        100u32.div_ceil(self.step)
    }
}

/// Doors still waiting to appear during the intro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroReveal {
    pending: Vec<usize>,
}

impl IntroReveal {
    pub fn new(pending: Vec<usize>) -> Self {
        Self { pending }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Picks one pending door uniformly at random and removes it.
    pub fn next_door(&mut self, rng: &mut impl Rng) -> Option<usize> {
        if self.pending.is_empty() {
            return None;
        }
        let pick = rng.gen_range(0..self.pending.len());
        Some(self.pending.swap_remove(pick))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Animation {
    Intro(IntroReveal),
    OpenDoor { door: usize, wipe: Wipe },
    RevealAll(Wipe),
}
