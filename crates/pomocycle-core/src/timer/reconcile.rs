//! Suspension reconciliation.
//!
//! While the host is suspended no ticks arrive. On resume the wall-clock
//! gap is subtracted in one step, or the phase is completed if the gap
//! covers what was left. Only one suspend timestamp is kept, so a gap
//! spanning several phases still completes exactly one.

use chrono::{DateTime, Utc};

use super::engine::TimerEngine;
use crate::events::Event;

impl TimerEngine {
    /// Host is going to the background. Records `at` if the clock runs
    /// and no earlier suspension is pending.
    pub fn on_suspend(&mut self, at: DateTime<Utc>) -> Option<Event> {
        if !self.session.is_running {
            return None;
        }
        // A second suspend without a resume keeps the earlier timestamp.
        if self.session.suspended_at.is_some() {
            return None;
        }
        self.session.suspended_at = Some(at);
        tracing::debug!(%at, remaining = self.session.remaining_secs, "session suspended");
        Some(Event::Suspended { at })
    }

    /// Host is back in the foreground. Settles the time spent suspended.
    pub fn on_resume(&mut self, at: DateTime<Utc>) -> Option<Event> {
        let since = self.session.suspended_at.take()?;
        if !self.session.is_running {
            return None;
        }

        let elapsed = whole_seconds_between(since, at);
        if elapsed >= self.session.remaining_secs {
            tracing::debug!(
                elapsed,
                remaining = self.session.remaining_secs,
                "phase ran out while suspended"
            );
            return Some(self.on_phase_completed());
        }

        self.session.remaining_secs -= elapsed;
        tracing::debug!(elapsed, remaining = self.session.remaining_secs, "session resumed");
        Some(Event::Reconciled {
            elapsed_secs: elapsed,
            remaining_secs: self.session.remaining_secs,
            at,
        })
    }
}

/// Floor of `to - from` in seconds; a clock that went backwards counts as 0.
fn whole_seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_seconds()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::durations::FixedDurations;
    use crate::notify::NoopNotifier;
    use crate::timer::Phase;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 28, 9, 0, 0).unwrap()
    }

    fn running_engine() -> TimerEngine {
        let mut engine = TimerEngine::new(
            FixedDurations {
                focusing: 100,
                short_break: 20,
                long_break: 40,
            },
            NoopNotifier,
        );
        engine.start();
        engine
    }

    #[test]
    fn whole_seconds_floor_and_clamp() {
        let base = t0();
        assert_eq!(whole_seconds_between(base, base + Duration::milliseconds(2999)), 2);
        assert_eq!(whole_seconds_between(base, base - Duration::seconds(5)), 0);
    }

    #[test]
    fn suspend_is_ignored_while_paused() {
        let mut engine = running_engine();
        engine.pause();
        assert!(engine.on_suspend(t0()).is_none());
        assert!(!engine.is_suspended());
    }

    #[test]
    fn short_suspension_subtracts_elapsed() {
        let mut engine = running_engine();
        engine.on_suspend(t0());
        let event = engine.on_resume(t0() + Duration::seconds(30));

        assert!(matches!(
            event,
            Some(Event::Reconciled {
                elapsed_secs: 30,
                remaining_secs: 70,
                ..
            })
        ));
        assert_eq!(engine.remaining_secs(), 70);
        assert!(engine.is_running());
        assert!(!engine.is_suspended());
        assert_eq!(engine.phase(), Phase::Focusing);
    }

    #[test]
    fn ticks_are_ignored_while_suspended() {
        let mut engine = running_engine();
        engine.on_suspend(t0());
        engine.tick();
        engine.tick();
        assert_eq!(engine.remaining_secs(), 100);
        engine.on_resume(t0() + Duration::seconds(5));
        assert_eq!(engine.remaining_secs(), 95);
    }

    #[test]
    fn second_suspend_keeps_first_timestamp() {
        let mut engine = running_engine();
        assert!(matches!(engine.on_suspend(t0()), Some(Event::Suspended { at }) if at == t0()));
        assert!(engine.on_suspend(t0() + Duration::seconds(20)).is_none());
        engine.on_resume(t0() + Duration::seconds(25));
        assert_eq!(engine.remaining_secs(), 75);
    }

    #[test]
    fn overshoot_completes_exactly_one_phase() {
        let mut engine = running_engine();
        engine.on_suspend(t0());
        // Long enough to cover focus, the short break and more.
        let event = engine.on_resume(t0() + Duration::seconds(1000));

        assert!(matches!(event, Some(Event::PhaseCompleted { .. })));
        assert_eq!(engine.completed_focus_count(), 1);
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(engine.remaining_secs(), 20);
        assert!(!engine.is_running());
    }

    #[test]
    fn resume_after_pause_only_clears_marker() {
        let mut engine = running_engine();
        engine.on_suspend(t0());
        engine.pause();
        assert!(engine.on_resume(t0() + Duration::seconds(500)).is_none());
        assert_eq!(engine.remaining_secs(), 100);
        assert_eq!(engine.phase(), Phase::Focusing);
    }

    #[test]
    fn resume_without_suspend_is_noop() {
        let mut engine = running_engine();
        assert!(engine.on_resume(t0()).is_none());
        assert_eq!(engine.remaining_secs(), 100);
        assert!(engine.is_running());
    }
}
