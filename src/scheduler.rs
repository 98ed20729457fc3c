use std::time::{Duration, Instant};

/// Repeating tick timer owned by a [`crate::session::GameSession`].
///
/// The session arms it when a game starts or resumes, re-arms it when the
/// interval changes, and cancels it on pause and game over.
pub trait TickScheduler {
    /// Starts (or restarts) repeating ticks at `interval`.
    fn arm(&mut self, interval: Duration);

    /// Stops all further ticks until the next [`TickScheduler::arm`].
    fn cancel(&mut self);

    /// Returns the armed interval, or `None` while cancelled.
    fn interval(&self) -> Option<Duration>;

    fn is_armed(&self) -> bool {
        self.interval().is_some()
    }
}

/// Wall-clock scheduler polled from a frame loop.
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    interval: Duration,
    next_due: Instant,
}

impl IntervalTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when a tick is due at `now`, and schedules the next one.
    ///
    /// Reports at most one tick per call; a late poll does not burst.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        let Some(armed) = self.armed.as_mut() else {
            return false;
        };

        if now < armed.next_due {
            return false;
        }

        armed.next_due = now + armed.interval;
        true
    }
}

impl TickScheduler for IntervalTimer {
    fn arm(&mut self, interval: Duration) {
        self.armed = Some(Armed {
            interval,
            next_due: Instant::now() + interval,
        });
    }

    fn cancel(&mut self) {
        self.armed = None;
    }

    fn interval(&self) -> Option<Duration> {
        self.armed.map(|armed| armed.interval)
    }
}

/// Scheduler that never fires on its own; tests drive ticks by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    interval: Option<Duration>,
    pub arm_count: u32,
    pub cancel_count: u32,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickScheduler for ManualScheduler {
    fn arm(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.arm_count += 1;
    }

    fn cancel(&mut self) {
        self.interval = None;
        self.cancel_count += 1;
    }

    fn interval(&self) -> Option<Duration> {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{IntervalTimer, ManualScheduler, TickScheduler};

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = IntervalTimer::new();
        assert!(!timer.poll_due(Instant::now() + Duration::from_secs(10)));

        timer.arm(Duration::from_millis(100));
        timer.cancel();
        assert!(!timer.poll_due(Instant::now() + Duration::from_secs(10)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn armed_timer_fires_once_per_interval() {
        let mut timer = IntervalTimer::new();
        timer.arm(Duration::from_millis(100));
        let start = Instant::now();

        assert!(!timer.poll_due(start));

        let late = start + Duration::from_millis(500);
        assert!(timer.poll_due(late));
        assert!(!timer.poll_due(late));
        assert!(timer.poll_due(late + Duration::from_millis(100)));
    }

    #[test]
    fn rearming_replaces_interval() {
        let mut timer = IntervalTimer::new();
        timer.arm(Duration::from_millis(200));
        timer.arm(Duration::from_millis(60));

        assert_eq!(timer.interval(), Some(Duration::from_millis(60)));
    }

    #[test]
    fn manual_scheduler_counts_calls() {
        let mut scheduler = ManualScheduler::new();
        scheduler.arm(Duration::from_millis(140));
        scheduler.cancel();

        assert_eq!(scheduler.arm_count, 1);
        assert_eq!(scheduler.cancel_count, 1);
        assert_eq!(scheduler.interval(), None);
    }
}
