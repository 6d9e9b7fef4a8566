//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads: the owner calls `tick()` once per elapsed second while the
//! session runs, and forwards suspend/resume from the host lifecycle.
//!
//! ## State Transitions
//!
//! ```text
//! (phase, Paused) --start--> (phase, Running)
//! (phase, Running) --pause--> (phase, Paused)
//! (phase, Running) --tick at 0--> (next phase, Paused) + alert
//! (phase, Paused) --switch_phase(p)--> (p, Paused)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(DefaultDurations, LogNotifier);
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::PhaseCompleted) when a phase ends
//! ```

use chrono::Utc;

use super::phase::Phase;
use super::session::Session;
use crate::durations::{resolve_seconds, DefaultDurations, DurationProvider};
use crate::events::Event;
use crate::notify::{CompletionNotifier, NoopNotifier};

/// Core timer engine. Owns the [`Session`] and its collaborators.
pub struct TimerEngine {
    pub(crate) session: Session,
    pub(crate) durations: Box<dyn DurationProvider>,
    pub(crate) notifier: Box<dyn CompletionNotifier>,
}

impl TimerEngine {
    /// Create a paused focus session seeded from `durations`.
    pub fn new(
        durations: impl DurationProvider + 'static,
        notifier: impl CompletionNotifier + 'static,
    ) -> Self {
        Self::from_boxed(Box::new(durations), Box::new(notifier))
    }

    pub fn from_boxed(
        durations: Box<dyn DurationProvider>,
        notifier: Box<dyn CompletionNotifier>,
    ) -> Self {
        let total = resolve_seconds(durations.as_ref(), Phase::Focusing);
        Self {
            session: Session::new(total),
            durations,
            notifier,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.session.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.session.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running
    }

    pub fn is_suspended(&self) -> bool {
        self.session.suspended_at.is_some()
    }

    pub fn completed_focus_count(&self) -> u64 {
        self.session.completed_focus_count
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let s = &self.session;
        Event::StateSnapshot {
            phase: s.phase,
            is_running: s.is_running,
            remaining_secs: s.remaining_secs,
            total_secs: s.total_secs,
            completed_focus_count: s.completed_focus_count,
            progress: s.progress(),
            time_string: s.time_string(),
            pending_alert: s.pending_alert.clone(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the countdown. No-op while running or while a completion
    /// alert waits for acknowledgment.
    pub fn start(&mut self) -> Option<Event> {
        if self.session.is_running {
            return None;
        }
        if self.session.pending_alert.is_some() {
            tracing::debug!("start ignored until the completion alert is dismissed");
            return None;
        }
        self.session.is_running = true;
        tracing::debug!(phase = ?self.session.phase, remaining = self.session.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            phase: self.session.phase,
            remaining_secs: self.session.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.session.is_running {
            return None;
        }
        self.session.is_running = false;
        self.session.suspended_at = None;
        tracing::debug!(phase = ?self.session.phase, remaining = self.session.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            phase: self.session.phase,
            remaining_secs: self.session.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Pause and refill the countdown for the current phase.
    pub fn reset(&mut self) -> Option<Event> {
        self.restart_phase();
        Some(Event::TimerReset {
            phase: self.session.phase,
            total_secs: self.session.total_secs,
            at: Utc::now(),
        })
    }

    /// Call once per elapsed second. Returns `Some(Event::PhaseCompleted)`
    /// on the tick that finds the countdown already at zero.
    ///
    /// Ignored while paused or suspended; suspended time is settled by
    /// `on_resume`.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.session.is_running || self.session.suspended_at.is_some() {
            return None;
        }
        if self.session.remaining_secs > 0 {
            self.session.remaining_secs -= 1;
            return None;
        }
        Some(self.on_phase_completed())
    }

    /// Install a new duration provider. The running phase keeps its
    /// length; the next phase start reads from `durations`.
    pub fn set_durations(&mut self, durations: Box<dyn DurationProvider>) -> Event {
        self.durations = durations;
        Event::DurationsChanged { at: Utc::now() }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Pause, then reseed `total_secs`/`remaining_secs` for the current phase.
    pub(crate) fn restart_phase(&mut self) {
        self.pause();
        let total = resolve_seconds(self.durations.as_ref(), self.session.phase);
        self.session.total_secs = total;
        self.session.remaining_secs = total;
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DefaultDurations, NoopNotifier)
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
