use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::phase::{Phase, PhaseAlert};

/// The single timer instance: current phase, countdown, running flag and
/// the completed-focus counter.
///
/// Only [`TimerEngine`](super::TimerEngine) mutates a `Session`; everything
/// else gets read access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) phase: Phase,
    pub(crate) remaining_secs: u64,
    /// Length of `phase`, read from the duration provider when it started.
    pub(crate) total_secs: u64,
    pub(crate) is_running: bool,
    pub(crate) completed_focus_count: u64,
    #[serde(default)]
    pub(crate) pending_alert: Option<PhaseAlert>,
    /// Wall-clock time the host was suspended while running.
    #[serde(default)]
    pub(crate) suspended_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Paused focus session with a full countdown of `total_secs`.
    pub(crate) fn new(total_secs: u64) -> Self {
        Self {
            phase: Phase::Focusing,
            remaining_secs: total_secs,
            total_secs,
            is_running: false,
            completed_focus_count: 0,
            pending_alert: None,
            suspended_at: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn completed_focus_count(&self) -> u64 {
        self.completed_focus_count
    }

    pub fn pending_alert(&self) -> Option<&PhaseAlert> {
        self.pending_alert.as_ref()
    }

    pub fn suspended_at(&self) -> Option<DateTime<Utc>> {
        self.suspended_at
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    /// Remaining time as `MM:SS`.
    pub fn time_string(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}
