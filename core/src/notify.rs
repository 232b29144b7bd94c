use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

pub const STATUS_WON: &str = "You found all pairs!";
pub const STATUS_TIMED_OUT: &str = "Time's up! Game Over!";

/// State changes a renderer needs to know about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    BoardRendered(Vec<CardView>),
    ScoreChanged(Points),
    TimeChanged(Seconds),
    StatusChanged(String),
    GameOver,
}

impl Notification {
    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver)
    }
}

pub trait Observer {
    fn notify(&mut self, notification: Notification);
}

impl Observer for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification)
    }
}
