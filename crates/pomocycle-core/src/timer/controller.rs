//! Phase transitions: the long-break cadence and completion side effects.

use chrono::Utc;

use super::engine::TimerEngine;
use super::phase::{Phase, PhaseAlert};
use crate::error::{CoreError, Result};
use crate::events::Event;

impl TimerEngine {
    /// Finish the current phase and move to the next one.
    ///
    /// Leaves the session paused at the start of the next phase with a
    /// pending alert. Notifier failures are logged and otherwise ignored.
    pub fn on_phase_completed(&mut self) -> Event {
        self.pause();

        let completed = self.session.phase;
        let (next, alert) = if completed.is_break() {
            let next = completed.next_after_completion(self.session.completed_focus_count);
            (next, PhaseAlert::break_ended())
        } else {
            self.session.completed_focus_count += 1;
            let next = completed.next_after_completion(self.session.completed_focus_count);
            (next, PhaseAlert::focus_ended(next))
        };

        self.session.phase = next;
        self.restart_phase();

        if let Err(e) = self.notifier.notify(&alert) {
            tracing::warn!(error = %e, "completion notification failed");
        }
        self.session.pending_alert = Some(alert.clone());

        tracing::info!(
            completed = ?completed,
            next = ?next,
            completed_focus_count = self.session.completed_focus_count,
            "phase completed"
        );

        Event::PhaseCompleted {
            completed_phase: completed,
            next_phase: next,
            completed_focus_count: self.session.completed_focus_count,
            alert,
            at: Utc::now(),
        }
    }

    /// Manually change phase. Only allowed while paused; the cadence rule
    /// and the completed-focus counter are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidStateTransition`] while the clock runs.
    /// The session is not modified in that case.
    pub fn switch_phase(&mut self, to: Phase) -> Result<Event> {
        if self.session.is_running {
            tracing::debug!(to = ?to, "switch_phase refused while running");
            return Err(CoreError::invalid_transition(
                "switch_phase",
                "timer is running; pause it first",
            ));
        }
        let from = self.session.phase;
        self.session.phase = to;
        self.restart_phase();
        Ok(Event::PhaseSwitched {
            from,
            to,
            total_secs: self.session.total_secs,
            at: Utc::now(),
        })
    }

    /// Acknowledge the completion alert. No other effect on the session.
    pub fn dismiss_alert(&mut self) -> Option<Event> {
        self.session
            .pending_alert
            .take()
            .map(|_| Event::AlertDismissed { at: Utc::now() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::durations::FixedDurations;
    use crate::error::NotifyError;
    use crate::notify::{CompletionNotifier, NoopNotifier};
    use crate::timer::AlertColor;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<PhaseAlert>>>);

    impl CompletionNotifier for Recorder {
        fn notify(&self, alert: &PhaseAlert) -> std::result::Result<(), NotifyError> {
            self.0.lock().unwrap().push(alert.clone());
            Ok(())
        }
    }

    struct Failing;

    impl CompletionNotifier for Failing {
        fn notify(&self, _alert: &PhaseAlert) -> std::result::Result<(), NotifyError> {
            Err(NotifyError::Delivery("permission denied".into()))
        }
    }

    fn durations() -> FixedDurations {
        FixedDurations {
            focusing: 60,
            short_break: 10,
            long_break: 30,
        }
    }

    #[test]
    fn focus_completion_counts_and_goes_to_short_break() {
        let mut engine = TimerEngine::new(durations(), NoopNotifier);
        engine.start();
        let event = engine.on_phase_completed();

        assert_eq!(engine.completed_focus_count(), 1);
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(engine.remaining_secs(), 10);
        assert!(!engine.is_running());
        match event {
            Event::PhaseCompleted {
                completed_phase,
                next_phase,
                alert,
                ..
            } => {
                assert_eq!(completed_phase, Phase::Focusing);
                assert_eq!(next_phase, Phase::ShortBreak);
                assert_eq!(alert.color, AlertColor::Blue);
            }
            other => panic!("Expected PhaseCompleted, got {other:?}"),
        }
    }

    #[test]
    fn break_completion_returns_to_focus_without_counting() {
        let mut engine = TimerEngine::new(durations(), NoopNotifier);
        engine.switch_phase(Phase::LongBreak).unwrap();
        engine.on_phase_completed();
        assert_eq!(engine.phase(), Phase::Focusing);
        assert_eq!(engine.completed_focus_count(), 0);
        assert_eq!(engine.remaining_secs(), 60);
        let alert = engine.session().pending_alert().unwrap();
        assert_eq!(alert.color, AlertColor::Red);
    }

    #[test]
    fn fourth_focus_leads_to_long_break() {
        let mut engine = TimerEngine::new(durations(), NoopNotifier);
        for n in 1..=8u64 {
            engine.switch_phase(Phase::Focusing).unwrap();
            engine.on_phase_completed();
            engine.dismiss_alert();
            let expected = if n % 4 == 0 {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            };
            assert_eq!(engine.phase(), expected, "after completion {n}");
        }
        assert_eq!(engine.completed_focus_count(), 8);
    }

    #[test]
    fn notifier_receives_each_alert_once() {
        let recorder = Recorder::default();
        let mut engine = TimerEngine::new(durations(), recorder.clone());
        engine.on_phase_completed();
        engine.dismiss_alert();
        engine.on_phase_completed();

        let alerts = recorder.0.lock().unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].title, "Focus session ended");
        assert_eq!(alerts[1].title, "Break ended");
    }

    #[test]
    fn notifier_failure_does_not_block_transition() {
        let mut engine = TimerEngine::new(durations(), Failing);
        engine.start();
        engine.on_phase_completed();
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(engine.completed_focus_count(), 1);
        assert!(engine.session().pending_alert().is_some());
    }

    #[test]
    fn switch_phase_while_running_is_refused() {
        let mut engine = TimerEngine::new(durations(), NoopNotifier);
        engine.start();
        engine.tick();
        let before = engine.session().clone();

        let err = engine.switch_phase(Phase::LongBreak).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStateTransition { .. }));
        assert_eq!(engine.session(), &before);
    }

    #[test]
    fn switch_phase_reseeds_and_keeps_count() {
        let mut engine = TimerEngine::new(durations(), NoopNotifier);
        engine.on_phase_completed();
        engine.dismiss_alert();
        engine.switch_phase(Phase::LongBreak).unwrap();
        assert_eq!(engine.phase(), Phase::LongBreak);
        assert_eq!(engine.remaining_secs(), 30);
        assert_eq!(engine.completed_focus_count(), 1);
    }

    #[test]
    fn alert_blocks_start_until_dismissed() {
        let mut engine = TimerEngine::new(durations(), NoopNotifier);
        engine.on_phase_completed();
        assert!(engine.start().is_none());
        assert!(!engine.is_running());

        assert!(engine.dismiss_alert().is_some());
        assert!(engine.dismiss_alert().is_none());
        assert!(engine.start().is_some());
    }
}
