//! Session actor.
//!
//! One tokio task owns the [`TimerEngine`]. Commands, ticks and lifecycle
//! hooks are applied one at a time in that task, so the session never
//! needs a lock. Callers talk to it through a cloneable [`SessionHandle`].
//!
//! The 1-second ticker exists only while the session is running and not
//! suspended. It is dropped in the same loop turn that applies `pause`,
//! so once `pause()` returns no further tick is applied until `start()`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::{interval_at, Instant, Interval};

use super::engine::TimerEngine;
use super::phase::Phase;
use super::session::Session;
use crate::durations::DurationProvider;
use crate::error::{CoreError, Result};
use crate::events::Event;

const INBOX_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 64;

/// Where ticks come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSource {
    /// The actor runs its own ticker with this period.
    Interval(Duration),
    /// The host delivers ticks through [`SessionHandle::tick`].
    External,
}

impl Default for TickSource {
    fn default() -> Self {
        TickSource::Interval(Duration::from_secs(1))
    }
}

enum Command {
    Start,
    Pause,
    Reset,
    Tick,
    SwitchPhase(Phase),
    DismissAlert,
    Suspend(DateTime<Utc>),
    Resume(DateTime<Utc>),
    SetDurations(Box<dyn DurationProvider>),
}

enum Message {
    Command(Command, oneshot::Sender<Result<Option<Event>>>),
    Snapshot(oneshot::Sender<Session>),
    Shutdown,
}

/// Cloneable handle to the session actor.
#[derive(Clone)]
pub struct SessionHandle {
    inbox: mpsc::Sender<Message>,
    events: broadcast::Sender<Event>,
    state: watch::Receiver<Session>,
}

impl SessionHandle {
    /// Spawn the actor with a 1-second ticker. Must be called inside a
    /// tokio runtime.
    pub fn spawn(engine: TimerEngine) -> Self {
        Self::spawn_with(engine, TickSource::default())
    }

    pub fn spawn_with(engine: TimerEngine, source: TickSource) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::channel(INBOX_CAPACITY);
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let (state_tx, state_rx) = watch::channel(engine.session().clone());

        let actor = SessionActor {
            engine,
            source,
            ticker: None,
            inbox: inbox_rx,
            events: events_tx.clone(),
            state: state_tx,
        };
        tokio::spawn(actor.run());

        Self {
            inbox: inbox_tx,
            events: events_tx,
            state: state_rx,
        }
    }

    pub async fn start(&self) -> Result<Option<Event>> {
        self.send(Command::Start).await
    }

    pub async fn pause(&self) -> Result<Option<Event>> {
        self.send(Command::Pause).await
    }

    pub async fn reset(&self) -> Result<Option<Event>> {
        self.send(Command::Reset).await
    }

    /// Deliver one synthetic tick. Intended for [`TickSource::External`].
    pub async fn tick(&self) -> Result<Option<Event>> {
        self.send(Command::Tick).await
    }

    /// # Errors
    ///
    /// [`CoreError::InvalidStateTransition`] while the timer runs.
    pub async fn switch_phase(&self, to: Phase) -> Result<Option<Event>> {
        self.send(Command::SwitchPhase(to)).await
    }

    pub async fn dismiss_alert(&self) -> Result<Option<Event>> {
        self.send(Command::DismissAlert).await
    }

    pub async fn suspend(&self) -> Result<Option<Event>> {
        self.suspend_at(Utc::now()).await
    }

    pub async fn suspend_at(&self, at: DateTime<Utc>) -> Result<Option<Event>> {
        self.send(Command::Suspend(at)).await
    }

    pub async fn resume(&self) -> Result<Option<Event>> {
        self.resume_at(Utc::now()).await
    }

    pub async fn resume_at(&self, at: DateTime<Utc>) -> Result<Option<Event>> {
        self.send(Command::Resume(at)).await
    }

    pub async fn set_durations(
        &self,
        durations: impl DurationProvider + 'static,
    ) -> Result<Option<Event>> {
        self.send(Command::SetDurations(Box::new(durations))).await
    }

    /// Current session, read inside the actor after all earlier commands.
    pub async fn snapshot(&self) -> Result<Session> {
        let (tx, rx) = oneshot::channel();
        self.inbox
            .send(Message::Snapshot(tx))
            .await
            .map_err(|_| CoreError::SessionClosed)?;
        rx.await.map_err(|_| CoreError::SessionClosed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Latest published session state; updated after every command and tick.
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.state.clone()
    }

    /// Stop the actor. Later calls on any handle return `SessionClosed`.
    pub async fn shutdown(&self) {
        let _ = self.inbox.send(Message::Shutdown).await;
    }

    async fn send(&self, command: Command) -> Result<Option<Event>> {
        let (tx, rx) = oneshot::channel();
        self.inbox
            .send(Message::Command(command, tx))
            .await
            .map_err(|_| CoreError::SessionClosed)?;
        rx.await.map_err(|_| CoreError::SessionClosed)?
    }
}

struct SessionActor {
    engine: TimerEngine,
    source: TickSource,
    ticker: Option<Interval>,
    inbox: mpsc::Receiver<Message>,
    events: broadcast::Sender<Event>,
    state: watch::Sender<Session>,
}

impl SessionActor {
    async fn run(mut self) {
        tracing::debug!(source = ?self.source, "session actor started");
        loop {
            self.sync_ticker();

            tokio::select! {
                biased;

                msg = self.inbox.recv() => match msg {
                    Some(Message::Command(command, reply)) => {
                        let result = self.apply(command);
                        if let Ok(Some(event)) = &result {
                            self.publish(event.clone());
                        }
                        self.publish_state();
                        let _ = reply.send(result);
                    }
                    Some(Message::Snapshot(reply)) => {
                        let _ = reply.send(self.engine.session().clone());
                    }
                    Some(Message::Shutdown) | None => break,
                },

                _ = next_tick(&mut self.ticker), if self.ticker.is_some() => {
                    if let Some(event) = self.engine.tick() {
                        self.publish(event);
                    }
                    self.publish_state();
                }
            }
        }
        tracing::debug!("session actor stopped");
    }

    fn apply(&mut self, command: Command) -> Result<Option<Event>> {
        let engine = &mut self.engine;
        Ok(match command {
            Command::Start => engine.start(),
            Command::Pause => engine.pause(),
            Command::Reset => engine.reset(),
            Command::Tick => engine.tick(),
            Command::SwitchPhase(to) => Some(engine.switch_phase(to)?),
            Command::DismissAlert => engine.dismiss_alert(),
            Command::Suspend(at) => engine.on_suspend(at),
            Command::Resume(at) => engine.on_resume(at),
            Command::SetDurations(durations) => Some(engine.set_durations(durations)),
        })
    }

    /// Keep the ticker alive exactly while the clock should advance.
    fn sync_ticker(&mut self) {
        let TickSource::Interval(period) = self.source else {
            return;
        };
        let should_tick = self.engine.is_running() && !self.engine.is_suspended();
        match (should_tick, self.ticker.is_some()) {
            (true, false) => self.ticker = Some(interval_at(Instant::now() + period, period)),
            (false, true) => self.ticker = None,
            _ => {}
        }
    }

    fn publish(&self, event: Event) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn publish_state(&self) {
        self.state.send_replace(self.engine.session().clone());
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
