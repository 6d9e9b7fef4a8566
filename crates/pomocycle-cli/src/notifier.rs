use std::io::Write;

use pomocycle_core::{AlertKind, CompletionNotifier, NotificationsConfig, NotifyError, PhaseAlert};

/// Completion alerts on the terminal: a banner on stderr, plus the bell
/// when sound is enabled. The leading marker stands in for the haptic
/// pattern and is left out when vibration is off.
pub struct TerminalNotifier {
    config: NotificationsConfig,
}

impl TerminalNotifier {
    pub fn new(config: NotificationsConfig) -> Self {
        Self { config }
    }

    fn banner(&self, alert: &PhaseAlert) -> String {
        let bell = if self.config.sound_enabled { "\x07" } else { "" };
        let marker = match (self.config.vibration, alert.kind) {
            (false, _) => "",
            (true, AlertKind::Success) => "✔ ",
            (true, AlertKind::Alert) => "⏰ ",
        };
        format!("\n{bell}{marker}{}\n  {}", alert.title, alert.message)
    }
}

impl CompletionNotifier for TerminalNotifier {
    fn notify(&self, alert: &PhaseAlert) -> Result<(), NotifyError> {
        if !self.config.enabled {
            return Err(NotifyError::Disabled);
        }

        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", self.banner(alert))
            .and_then(|_| stderr.flush())
            .map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}
