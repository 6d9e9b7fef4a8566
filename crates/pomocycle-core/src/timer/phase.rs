use serde::{Deserialize, Serialize};

/// Every fourth completed focus phase is followed by a long break.
pub const LONG_BREAK_EVERY: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focusing,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Focusing, Phase::ShortBreak, Phase::LongBreak];

    /// Fallback length in seconds when nothing usable is configured.
    pub fn default_seconds(self) -> u64 {
        match self {
            Phase::Focusing => 25 * 60,
            Phase::ShortBreak => 5 * 60,
            Phase::LongBreak => 15 * 60,
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Phase::Focusing)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Focusing => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Phase that follows the completion of `self`.
    ///
    /// `completed_focus_count` is the counter value *after* the completed
    /// phase has been accounted for.
    pub fn next_after_completion(self, completed_focus_count: u64) -> Phase {
        match self {
            Phase::Focusing if completed_focus_count % LONG_BREAK_EVERY == 0 => Phase::LongBreak,
            Phase::Focusing => Phase::ShortBreak,
            Phase::ShortBreak | Phase::LongBreak => Phase::Focusing,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" | "focusing" => Ok(Phase::Focusing),
            "short" | "short_break" | "short-break" => Ok(Phase::ShortBreak),
            "long" | "long_break" | "long-break" => Ok(Phase::LongBreak),
            other => Err(format!("unknown phase: {other}")),
        }
    }
}

/// Colour the presentation layer paints the completion alert with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertColor {
    Blue,
    Red,
}

/// Feedback pattern requested from the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Alert,
}

/// Payload shown (and notified) when a phase runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAlert {
    pub title: String,
    pub message: String,
    pub color: AlertColor,
    pub kind: AlertKind,
}

impl PhaseAlert {
    /// Alert for a finished focus phase, naming the break that follows.
    pub fn focus_ended(next: Phase) -> Self {
        let message = match next {
            Phase::LongBreak => "Time for a long break.",
            _ => "Time for a short break.",
        };
        Self {
            title: "Focus session ended".into(),
            message: message.into(),
            color: AlertColor::Blue,
            kind: AlertKind::Success,
        }
    }

    pub fn break_ended() -> Self {
        Self {
            title: "Break ended".into(),
            message: "Ready to focus again?".into(),
            color: AlertColor::Red,
            kind: AlertKind::Success,
        }
    }
}
