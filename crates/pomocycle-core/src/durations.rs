//! Phase length lookup.
//!
//! The engine asks a [`DurationProvider`] for the length of a phase each
//! time that phase starts. Providers are injected at construction so tests
//! can run with tiny or fake durations.

use crate::storage::ScheduleConfig;
use crate::timer::Phase;

/// Supplies the configured length, in seconds, of each phase.
///
/// Implementations should return a positive value; the engine substitutes
/// [`Phase::default_seconds`] for a zero.
pub trait DurationProvider: Send + Sync {
    fn seconds_for(&self, phase: Phase) -> u64;
}

/// 25 / 5 / 15 minutes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDurations;

impl DurationProvider for DefaultDurations {
    fn seconds_for(&self, phase: Phase) -> u64 {
        phase.default_seconds()
    }
}

/// Durations read from the persisted `[schedule]` table.
///
/// Non-positive minute values are replaced by the phase default.
#[derive(Debug, Clone)]
pub struct ConfiguredDurations {
    schedule: ScheduleConfig,
}

impl ConfiguredDurations {
    pub fn new(schedule: ScheduleConfig) -> Self {
        Self { schedule }
    }

    fn minutes_for(&self, phase: Phase) -> i64 {
        match phase {
            Phase::Focusing => self.schedule.focus_minutes,
            Phase::ShortBreak => self.schedule.short_break_minutes,
            Phase::LongBreak => self.schedule.long_break_minutes,
        }
    }
}

impl DurationProvider for ConfiguredDurations {
    fn seconds_for(&self, phase: Phase) -> u64 {
        let minutes = self.minutes_for(phase);
        if minutes <= 0 {
            tracing::warn!(
                phase = ?phase,
                minutes,
                "configured duration out of range, using default"
            );
            return phase.default_seconds();
        }
        (minutes as u64).saturating_mul(60)
    }
}

/// Fixed per-phase seconds. Handy for tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedDurations {
    pub focusing: u64,
    pub short_break: u64,
    pub long_break: u64,
}

impl DurationProvider for FixedDurations {
    fn seconds_for(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Focusing => self.focusing,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }
}

/// Ask `provider` for the length of `phase`, falling back to the default
/// when the provider answers zero.
pub(crate) fn resolve_seconds(provider: &dyn DurationProvider, phase: Phase) -> u64 {
    match provider.seconds_for(phase) {
        0 => {
            tracing::warn!(phase = ?phase, "duration provider returned 0, using default");
            phase.default_seconds()
        }
        secs => secs,
    }
}
