use alloc::collections::BTreeMap;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::time::Duration;

use crate::*;

#[derive(Copy, Clone, Debug)]
struct SimEntry {
    token: TimerToken,
    due: Duration,
    period: Option<Duration>,
}

#[derive(Debug, Default)]
struct SimQueue {
    now: Duration,
    next_id: u64,
    entries: BTreeMap<u64, SimEntry>,
}

impl SimQueue {
    fn insert(&mut self, token: TimerToken, delay: Duration, period: Option<Duration>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            id,
            SimEntry {
                token,
                due: self.now + delay,
                period,
            },
        );
        id
    }

    fn pop_due(&mut self, until: Duration) -> Option<TimerToken> {
        let (&id, &entry) = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(id, entry)| (entry.due, **id))?;

        self.now = entry.due;
        match entry.period {
            Some(period) => {
                if let Some(slot) = self.entries.get_mut(&id) {
                    slot.due += period;
                }
            }
            None => {
                self.entries.remove(&id);
            }
        }
        Some(entry.token)
    }
}

/// Virtual-time [`Scheduler`]. Clones share one timer queue, so a host keeps a clone to drive the
/// clock while the controller owns another.
#[derive(Clone, Debug, Default)]
pub struct SimScheduler {
    queue: Rc<RefCell<SimQueue>>,
}

/// Cancels its timer when dropped.
#[derive(Debug)]
pub struct SimHandle {
    id: u64,
    queue: Weak<RefCell<SimQueue>>,
}

impl Drop for SimHandle {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().entries.remove(&self.id);
        }
    }
}

impl SimScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.queue
            .borrow()
            .entries
            .values()
            .any(|entry| entry.token.kind == kind)
    }

    /// Moves the clock forward by `by`, delivering every timer that comes due to `controller` in
    /// firing order.
    pub fn advance<O: Observer>(
        &self,
        controller: &mut GameController<SimScheduler, O>,
        by: Duration,
    ) {
        let until = self.now() + by;
        loop {
            // the borrow must end before the controller drops or arms handles
            let next = self.queue.borrow_mut().pop_due(until);
            let Some(token) = next else {
                break;
            };
            log::trace!("sim timer due at {:?}: {:?}", self.now(), token);
            controller.on_timer(token);
        }
        self.queue.borrow_mut().now = until;
    }
}

impl Scheduler for SimScheduler {
    type Handle = SimHandle;

    fn once(&mut self, token: TimerToken, delay: Duration) -> Self::Handle {
        let id = self.queue.borrow_mut().insert(token, delay, None);
        SimHandle {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }

    fn every(&mut self, token: TimerToken, period: Duration) -> Self::Handle {
        let period = period.max(Duration::from_millis(1));
        let id = self.queue.borrow_mut().insert(token, period, Some(period));
        SimHandle {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }
}
