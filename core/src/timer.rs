use core::time::Duration;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// One-shot end of the face-up preview.
    Preview,
    /// Recurring one-second countdown tick.
    Countdown,
    /// One-shot flip back of a mismatched pair.
    Unflip,
}

/// Identifies a scheduled callback. `round` is the reset generation the timer was armed in, so a
/// callback from before a reset can be told apart from a current one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub round: u32,
}

impl TimerToken {
    pub const fn new(kind: TimerKind, round: u32) -> Self {
        Self { kind, round }
    }
}

/// Arms timers on behalf of the controller. When a timer fires the host must hand its token back
/// through `GameController::on_timer`.
///
/// Dropping a handle cancels its timer.
pub trait Scheduler {
    type Handle;

    fn once(&mut self, token: TimerToken, delay: Duration) -> Self::Handle;

    fn every(&mut self, token: TimerToken, period: Duration) -> Self::Handle;
}
