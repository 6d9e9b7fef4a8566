//! Completion notifier boundary.
//!
//! The engine hands every completion alert to a [`CompletionNotifier`]
//! exactly once. What happens next (haptics, sounds, a system
//! notification) belongs to the implementation. Errors are reported back
//! only so the engine can log them.

use crate::error::NotifyError;
use crate::timer::PhaseAlert;

pub trait CompletionNotifier: Send + Sync {
    /// Deliver `alert`. Must not panic; failures are returned, not retried.
    fn notify(&self, alert: &PhaseAlert) -> Result<(), NotifyError>;
}

/// Drops every alert.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl CompletionNotifier for NoopNotifier {
    fn notify(&self, _alert: &PhaseAlert) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Writes alerts to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl CompletionNotifier for LogNotifier {
    fn notify(&self, alert: &PhaseAlert) -> Result<(), NotifyError> {
        tracing::info!(
            title = %alert.title,
            message = %alert.message,
            kind = ?alert.kind,
            "phase completed"
        );
        Ok(())
    }
}
