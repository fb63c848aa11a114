//! Repeating timers behind a swappable scheduler.
//!
//! The carousel never registers callbacks directly. It asks a [`Scheduler`]
//! for a repeating timer and gets back a [`TimerId`]; the host later delivers
//! ticks tagged with that id. Cancelling a timer invalidates its id, so ticks
//! that were already queued can be recognized and dropped.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::event::CarouselEvent;

/// Shortest period a scheduler will honor. Zero periods are raised to this.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Most ticks [`ManualScheduler::advance`] returns from one call.
pub const MAX_TICKS_PER_ADVANCE: usize = 10_000;

/// Identifier of one repeating timer. Never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Source of repeating timers.
pub trait Scheduler {
    /// Start a timer that ticks every `period`, first tick one period from now.
    fn start_repeating(&mut self, period: Duration) -> TimerId;

    /// Stop a timer. Unknown or already cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn start_repeating(&mut self, period: Duration) -> TimerId {
        (**self).start_repeating(period)
    }

    fn cancel(&mut self, id: TimerId) {
        (**self).cancel(id);
    }
}

#[derive(Debug, Clone, Copy)]
struct ManualTimer {
    period: Duration,
    /// `None` once the next tick would fall past `Duration::MAX`.
    next_fire: Option<Duration>,
}

/// Scheduler driven by an explicit clock, for tests and simulations.
///
/// Time only moves when [`ManualScheduler::advance`] is called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, ManualTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live timers.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Move the clock forward and return every tick that fell due, in order.
    ///
    /// Ticks due at the same instant are ordered by timer id. At most
    /// [`MAX_TICKS_PER_ADVANCE`] ticks are returned; when the cap is hit the
    /// clock stops at the last returned tick and the rest stay pending.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        let target = self.now.saturating_add(by);
        let mut fired = Vec::new();

        while fired.len() < MAX_TICKS_PER_ADVANCE {
            let due = self
                .timers
                .iter()
                .filter_map(|(id, t)| t.next_fire.map(|at| (*id, at)))
                .filter(|(_, at)| *at <= target)
                .min_by_key(|(id, at)| (*at, *id));

            let Some((id, at)) = due else {
                self.now = target;
                return fired;
            };

            self.now = at;
            if let Some(timer) = self.timers.get_mut(&id) {
                timer.next_fire = at.checked_add(timer.period);
            }
            fired.push(id);
        }

        log::warn!(
            "Manual clock stopped at {:?} after {} ticks",
            self.now,
            MAX_TICKS_PER_ADVANCE
        );
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn start_repeating(&mut self, period: Duration) -> TimerId {
        let period = period.max(MIN_PERIOD);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            ManualTimer {
                period,
                next_fire: self.now.checked_add(period),
            },
        );
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

/// Scheduler backed by tokio tasks.
///
/// Each timer is a task that pushes [`CarouselEvent::Tick`] into the host's
/// event channel. Must be used from inside a tokio runtime.
pub struct TokioScheduler {
    events: mpsc::UnboundedSender<CarouselEvent>,
    next_id: u64,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(events: mpsc::UnboundedSender<CarouselEvent>) -> Self {
        Self {
            events,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Number of live timer tasks.
    pub fn active_timers(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn start_repeating(&mut self, period: Duration) -> TimerId {
        let period = period.max(MIN_PERIOD);
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(CarouselEvent::Tick(id)).is_err() {
                    // Receiver gone, host loop has exited
                    break;
                }
            }
        });

        log::debug!("Started carousel timer {:?} ({:?})", id, period);
        self.tasks.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            log::debug!("Cancelled carousel timer {:?}", id);
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
