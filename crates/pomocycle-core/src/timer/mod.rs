mod actor;
mod controller;
mod engine;
mod phase;
mod reconcile;
mod session;

pub use actor::{SessionHandle, TickSource};
pub use engine::TimerEngine;
pub use phase::{AlertColor, AlertKind, Phase, PhaseAlert, LONG_BREAK_EVERY};
pub use session::Session;
