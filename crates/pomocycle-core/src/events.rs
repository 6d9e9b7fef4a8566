use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, PhaseAlert};

/// Every state change in the session produces an Event.
/// The presentation layer subscribes to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// A phase ran out and the session moved to `next_phase` (paused).
    PhaseCompleted {
        completed_phase: Phase,
        next_phase: Phase,
        completed_focus_count: u64,
        alert: PhaseAlert,
        at: DateTime<Utc>,
    },
    /// Manual phase change; bypasses the long-break cadence.
    PhaseSwitched {
        from: Phase,
        to: Phase,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    AlertDismissed {
        at: DateTime<Utc>,
    },
    /// Host process went to the background while the clock was running.
    Suspended {
        at: DateTime<Utc>,
    },
    /// Time spent suspended was subtracted without finishing the phase.
    Reconciled {
        elapsed_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A new duration provider was installed; applies from the next phase start.
    DurationsChanged {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        is_running: bool,
        remaining_secs: u64,
        total_secs: u64,
        completed_focus_count: u64,
        progress: f64,
        time_string: String,
        pending_alert: Option<PhaseAlert>,
        at: DateTime<Utc>,
    },
}
