use core::time::Duration;
use gloo::timers::callback::{Interval, Timeout};
use pairs_core::{Scheduler, TimerToken};
use yew::html::Scope;

use crate::game::{GameView, Msg};

/// Keeps a browser timer alive. Dropping it clears the timer.
pub(crate) enum TimerHandle {
    Once { _timeout: Timeout },
    Every { _interval: Interval },
}

/// Arms gloo timers that post their token back to the game component.
pub(crate) struct GlooScheduler {
    link: Scope<GameView>,
}

impl GlooScheduler {
    pub(crate) fn new(link: Scope<GameView>) -> Self {
        Self { link }
    }
}

fn to_millis(duration: Duration) -> u32 {
    duration.as_millis().try_into().unwrap_or(u32::MAX)
}

impl Scheduler for GlooScheduler {
    type Handle = TimerHandle;

    fn once(&mut self, token: TimerToken, delay: Duration) -> Self::Handle {
        let link = self.link.clone();
        log::trace!("arming {:?} in {:?}", token, delay);
        TimerHandle::Once {
            _timeout: Timeout::new(to_millis(delay), move || link.send_message(Msg::Timer(token))),
        }
    }

    fn every(&mut self, token: TimerToken, period: Duration) -> Self::Handle {
        let link = self.link.clone();
        log::trace!("arming {:?} every {:?}", token, period);
        TimerHandle::Every {
            _interval: Interval::new(to_millis(period), move || {
                link.send_message(Msg::Timer(token))
            }),
        }
    }
}
