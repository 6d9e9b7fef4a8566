//! # Pomocycle Core Library
//!
//! Core logic for the Pomocycle interval timer: a single session that
//! cycles focus, short-break and long-break phases, counts completed focus
//! intervals, and settles time that passed while the host was suspended.
//! The CLI binary and any GUI are thin hosts over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: tick-driven state machine; the owner calls `tick()`
//!   once per second and forwards suspend/resume from the host lifecycle
//! - **Session Actor**: a tokio task that owns the engine and its ticker
//! - **Durations**: injected provider of phase lengths, backed by config
//! - **Notifier**: injected boundary that delivers completion alerts
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`SessionHandle`]: Async handle to the session actor
//! - [`DurationProvider`]: Phase length lookup
//! - [`CompletionNotifier`]: Completion alert delivery
//! - [`Config`]: Application configuration management

pub mod durations;
pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod timer;

pub use durations::{ConfiguredDurations, DefaultDurations, DurationProvider, FixedDurations};
pub use error::{ConfigError, CoreError, NotifyError};
pub use events::Event;
pub use notify::{CompletionNotifier, LogNotifier, NoopNotifier};
pub use storage::{Config, NotificationsConfig, ScheduleConfig};
pub use timer::{
    AlertColor, AlertKind, Phase, PhaseAlert, Session, SessionHandle, TickSource, TimerEngine,
};
