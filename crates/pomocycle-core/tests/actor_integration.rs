//! Integration tests for the session actor on a paused tokio clock.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use pomocycle_core::{
    CoreError, Event, FixedDurations, NoopNotifier, Phase, SessionHandle, TickSource, TimerEngine,
};

fn engine() -> TimerEngine {
    TimerEngine::new(
        FixedDurations {
            focusing: 5,
            short_break: 3,
            long_break: 4,
        },
        NoopNotifier,
    )
}

#[tokio::test(start_paused = true)]
async fn ticker_counts_down_once_per_second() {
    let handle = SessionHandle::spawn(engine());
    handle.start().await.unwrap();

    tokio::time::sleep(Duration::from_millis(3_500)).await;

    let session = handle.snapshot().await.unwrap();
    assert_eq!(session.remaining_secs(), 2);
    assert!(session.is_running());
}

#[tokio::test(start_paused = true)]
async fn pause_stops_ticks_and_start_resumes_same_remaining() {
    let handle = SessionHandle::spawn(engine());
    handle.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(2_500)).await;

    handle.pause().await.unwrap();
    let paused = handle.snapshot().await.unwrap();
    assert_eq!(paused.remaining_secs(), 3);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot().await.unwrap().remaining_secs(), 3);

    handle.start().await.unwrap();
    assert_eq!(handle.snapshot().await.unwrap().remaining_secs(), 3);
}

#[tokio::test(start_paused = true)]
async fn completion_is_published_and_ticker_stops() {
    let handle = SessionHandle::spawn(engine());
    let mut events = handle.subscribe();
    handle.start().await.unwrap();

    // 5 decrements plus the completing tick.
    tokio::time::sleep(Duration::from_millis(6_500)).await;

    let mut completed = None;
    while let Ok(event) = events.try_recv() {
        if let Event::PhaseCompleted { next_phase, .. } = event {
            completed = Some(next_phase);
        }
    }
    assert_eq!(completed, Some(Phase::ShortBreak));

    tokio::time::sleep(Duration::from_secs(5)).await;
    let session = handle.snapshot().await.unwrap();
    assert_eq!(session.phase(), Phase::ShortBreak);
    assert_eq!(session.remaining_secs(), 3);
    assert!(!session.is_running());
    assert_eq!(session.completed_focus_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn switch_phase_is_refused_while_running() {
    let handle = SessionHandle::spawn(engine());
    handle.start().await.unwrap();

    let err = handle.switch_phase(Phase::LongBreak).await.unwrap_err();
    assert!(matches!(err, CoreError::InvalidStateTransition { .. }));

    handle.pause().await.unwrap();
    let event = handle.switch_phase(Phase::LongBreak).await.unwrap();
    assert!(matches!(event, Some(Event::PhaseSwitched { to: Phase::LongBreak, .. })));
    assert_eq!(handle.snapshot().await.unwrap().remaining_secs(), 4);
}

#[tokio::test(start_paused = true)]
async fn suspended_session_does_not_tick_until_resumed() {
    let handle = SessionHandle::spawn(engine());
    handle.start().await.unwrap();

    let t0 = Utc.with_ymd_and_hms(2025, 3, 28, 9, 0, 0).unwrap();
    handle.suspend_at(t0).await.unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(handle.snapshot().await.unwrap().remaining_secs(), 5);

    let event = handle
        .resume_at(t0 + chrono::Duration::seconds(2))
        .await
        .unwrap();
    assert!(matches!(event, Some(Event::Reconciled { remaining_secs: 3, .. })));

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(handle.snapshot().await.unwrap().remaining_secs(), 2);
}

#[tokio::test]
async fn external_tick_source_only_moves_on_injected_ticks() {
    let handle = SessionHandle::spawn_with(engine(), TickSource::External);
    handle.start().await.unwrap();
    for _ in 0..5 {
        handle.tick().await.unwrap();
    }
    assert_eq!(handle.snapshot().await.unwrap().remaining_secs(), 0);

    let event = handle.tick().await.unwrap();
    assert!(matches!(event, Some(Event::PhaseCompleted { .. })));

    let watched = handle.watch().borrow().clone();
    assert_eq!(watched.phase(), Phase::ShortBreak);
}

#[tokio::test]
async fn set_durations_applies_from_next_phase() {
    let handle = SessionHandle::spawn_with(engine(), TickSource::External);
    handle
        .set_durations(FixedDurations {
            focusing: 50,
            short_break: 30,
            long_break: 40,
        })
        .await
        .unwrap();
    assert_eq!(handle.snapshot().await.unwrap().total_secs(), 5);

    handle.reset().await.unwrap();
    assert_eq!(handle.snapshot().await.unwrap().total_secs(), 50);
}

#[tokio::test]
async fn calls_after_shutdown_report_closed() {
    let handle = SessionHandle::spawn_with(engine(), TickSource::External);
    handle.shutdown().await;
    let err = handle.start().await.unwrap_err();
    assert!(matches!(err, CoreError::SessionClosed));
}
