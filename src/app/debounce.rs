//! Keystroke debouncing for search-as-you-type.
//!
//! Every keystroke in the query field schedules a delayed reload and cancels
//! the one scheduled before it, so a burst of typing issues a single fetch
//! once the user pauses. Zellij timers cannot be revoked after `set_timeout`,
//! so cancellation is modeled instead of delegated: the debouncer stays
//! *armed* for the most recent schedule only and counts outstanding timers,
//! and a timer expiry fires the reload only when it is the last outstanding
//! one and the debouncer is still armed. Earlier timers in the burst (and
//! timers whose schedule was explicitly cancelled) expire as no-ops.

/// Collapses a burst of schedule calls into a single delayed trigger.
///
/// Owned by the application state; the event handler calls [`schedule`] per
/// keystroke and [`timer_elapsed`] per timer event, emitting a reload when
/// the latter returns `true`.
///
/// [`schedule`]: Debouncer::schedule
/// [`timer_elapsed`]: Debouncer::timer_elapsed
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet period in milliseconds.
    delay_ms: u64,

    /// Whether the most recent schedule is still pending.
    armed: bool,

    /// Timers set but not yet expired.
    outstanding: u32,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period in milliseconds.
    #[must_use]
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            armed: false,
            outstanding: 0,
        }
    }

    /// The quiet period in seconds, as Zellij's `set_timeout` expects it.
    #[must_use]
    pub fn delay_seconds(&self) -> f64 {
        self.delay_ms as f64 / 1000.0
    }

    /// Registers a new schedule, superseding any pending one.
    ///
    /// The caller must arrange for one timer of [`delay_seconds`] to fire
    /// afterwards (one timer per call, even within a burst).
    ///
    /// [`delay_seconds`]: Debouncer::delay_seconds
    pub fn schedule(&mut self) {
        self.armed = true;
        self.outstanding = self.outstanding.saturating_add(1);
    }

    /// Cancels the pending schedule without waiting for its timer.
    ///
    /// Used when an immediate reload (pagination, a new session) makes the
    /// delayed one redundant. Outstanding timers still expire, but find the
    /// debouncer disarmed.
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    /// Records a timer expiry; returns `true` when the debounced action fires.
    ///
    /// Fires only for the expiry matching the most recent schedule: all
    /// earlier timers of the burst still count down first.
    pub fn timer_elapsed(&mut self) -> bool {
        self.outstanding = self.outstanding.saturating_sub(1);

        if self.outstanding == 0 && self.armed {
            self.armed = false;
            true
        } else {
            false
        }
    }

    /// Whether a schedule is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_fires_once_on_last_expiry() {
        let mut debouncer = Debouncer::new(100);

        debouncer.schedule();
        debouncer.schedule();
        debouncer.schedule();

        assert!(!debouncer.timer_elapsed());
        assert!(!debouncer.timer_elapsed());
        assert!(debouncer.timer_elapsed());
        assert!(!debouncer.is_armed());
    }

    #[test]
    fn cancel_disarms_pending_schedule() {
        let mut debouncer = Debouncer::new(100);

        debouncer.schedule();
        debouncer.cancel();

        assert!(!debouncer.timer_elapsed());
    }

    #[test]
    fn expiry_does_not_refire() {
        let mut debouncer = Debouncer::new(100);

        debouncer.schedule();
        assert!(debouncer.timer_elapsed());
        assert!(!debouncer.timer_elapsed());
    }

    #[test]
    fn reschedule_after_fire_works() {
        let mut debouncer = Debouncer::new(100);

        debouncer.schedule();
        assert!(debouncer.timer_elapsed());

        debouncer.schedule();
        assert!(debouncer.timer_elapsed());
    }

    #[test]
    fn delay_converts_to_seconds() {
        let debouncer = Debouncer::new(100);
        assert!((debouncer.delay_seconds() - 0.1).abs() < f64::EPSILON);
    }
}
