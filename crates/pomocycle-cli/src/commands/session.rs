//! Interactive foreground session.
//!
//! Hosts the session actor on a single-threaded runtime, forwards stdin
//! commands to it and prints events. `suspend`/`resume` stand in for the
//! app lifecycle so reconciliation can be exercised from a terminal.

use std::io::Write;

use pomocycle_core::{
    Config, ConfiguredDurations, CoreError, Event, Phase, Session, SessionHandle, TimerEngine,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::notifier::TerminalNotifier;

const HELP: &str = "\
commands:
  start | s          start or continue the countdown
  pause | p          pause the countdown
  reset | r          refill the current phase
  focus|short|long   switch phase (only while paused)
  ok                 dismiss the completion alert
  suspend / resume   simulate the app going to the background and back
  status             print the session as JSON
  help               show this list
  quit | q           exit";

pub fn run(start: bool) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(interactive(start));
    // A stdin read may still be parked on the blocking pool.
    runtime.shutdown_background();
    result
}

async fn interactive(start: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let engine = TimerEngine::new(
        ConfiguredDurations::new(config.schedule.clone()),
        TerminalNotifier::new(config.notifications.clone()),
    );
    let handle = SessionHandle::spawn(engine);
    let mut events = handle.subscribe();
    let mut state = handle.watch();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");
    print_status_line(&handle.snapshot().await?);
    println!();
    if start {
        report(handle.start().await)?;
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !dispatch(&handle, line.trim()).await? {
                    break;
                }
            }
            event = events.recv() => match event {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event stream lagged");
                }
                Err(RecvError::Closed) => break,
            },
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let session = state.borrow_and_update().clone();
                if session.is_running() {
                    print_status_line(&session);
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    handle.shutdown().await;
    println!();
    Ok(())
}

/// Apply one user command. Returns `false` when the user wants to quit.
async fn dispatch(
    handle: &SessionHandle,
    input: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let result = match input {
        "" => return Ok(true),
        "quit" | "q" | "exit" => return Ok(false),
        "help" | "h" | "?" => {
            println!("{HELP}");
            return Ok(true);
        }
        "status" => {
            let session = handle.snapshot().await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
            return Ok(true);
        }
        "start" | "s" => handle.start().await,
        "pause" | "p" => handle.pause().await,
        "reset" | "r" => handle.reset().await,
        "ok" | "dismiss" => handle.dismiss_alert().await,
        "suspend" => handle.suspend().await,
        "resume" => handle.resume().await,
        other => match other.parse::<Phase>() {
            Ok(phase) => handle.switch_phase(phase).await,
            Err(_) => {
                println!("unknown command: {other} (try 'help')");
                return Ok(true);
            }
        },
    };
    report(result)?;
    Ok(true)
}

/// Events are printed from the subscription; here only refusals and
/// no-ops are reported.
fn report(result: Result<Option<Event>, CoreError>) -> Result<(), Box<dyn std::error::Error>> {
    match result {
        Ok(Some(_)) => {}
        Ok(None) => println!("nothing to do"),
        Err(e @ CoreError::InvalidStateTransition { .. }) => println!("refused: {e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn print_event(event: &Event) {
    match event {
        Event::TimerStarted { phase, remaining_secs, .. } => {
            println!("\n▶ {phase} ({}s left)", remaining_secs);
        }
        Event::TimerPaused { remaining_secs, .. } => {
            println!("\n⏸ paused ({}s left)", remaining_secs);
        }
        Event::TimerReset { phase, total_secs, .. } => {
            println!("↺ {phase} reset to {total_secs}s");
        }
        Event::PhaseCompleted {
            next_phase,
            completed_focus_count,
            ..
        } => {
            println!(
                "next: {next_phase} | completed focus sessions: {completed_focus_count} | type 'ok' to continue"
            );
        }
        Event::PhaseSwitched { to, total_secs, .. } => {
            println!("→ switched to {to} ({total_secs}s)");
        }
        Event::AlertDismissed { .. } => println!("alert dismissed"),
        Event::Suspended { .. } => println!("\nsuspended"),
        Event::Reconciled {
            elapsed_secs,
            remaining_secs,
            ..
        } => {
            println!("resumed: {elapsed_secs}s elapsed, {remaining_secs}s left");
        }
        Event::DurationsChanged { .. } => println!("durations updated"),
        Event::StateSnapshot { .. } => {}
    }
}

fn print_status_line(session: &Session) {
    print!(
        "\r[{}] {} ({:.0}%) | done: {}   ",
        session.phase(),
        session.time_string(),
        session.progress() * 100.0,
        session.completed_focus_count()
    );
    let _ = std::io::stdout().flush();
}
