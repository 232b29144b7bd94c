#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use card::*;
pub use controller::*;
pub use error::*;
pub use notify::*;
pub use sim::*;
pub use timer::*;
pub use types::*;

mod board;
mod card;
mod controller;
mod error;
mod notify;
mod sim;
mod timer;
mod types;

/// Number of distinct faces on a standard board.
pub const DEFAULT_PAIRS: PairCount = 8;

/// How long every card stays face up before play begins.
pub const PREVIEW_DELAY: Duration = Duration::from_secs(5);

/// How long a mismatched pair stays visible before flipping back.
pub const UNFLIP_DELAY: Duration = Duration::from_secs(1);

/// Period of the countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

pub const COUNTDOWN_SECS: Seconds = 120;
pub const MATCH_REWARD: Points = 10;
pub const MISMATCH_PENALTY: Points = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub pairs: PairCount,
    pub preview_delay: Duration,
    pub unflip_delay: Duration,
    pub countdown_secs: Seconds,
    pub match_reward: Points,
    pub mismatch_penalty: Points,
}

impl GameConfig {
    pub const DEFAULT: Self = Self::new_unchecked(DEFAULT_PAIRS);

    pub const fn new_unchecked(pairs: PairCount) -> Self {
        Self {
            pairs,
            preview_delay: PREVIEW_DELAY,
            unflip_delay: UNFLIP_DELAY,
            countdown_secs: COUNTDOWN_SECS,
            match_reward: MATCH_REWARD,
            mismatch_penalty: MISMATCH_PENALTY,
        }
    }

    pub fn new(pairs: PairCount) -> Self {
        let pairs = pairs.clamp(1, MAX_PAIRS);
        Self::new_unchecked(pairs)
    }

    pub const fn total_cards(&self) -> usize {
        self.pairs as usize * 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
