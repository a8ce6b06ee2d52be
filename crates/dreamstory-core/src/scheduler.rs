//! Timer-driven session actor.
//!
//! [`spawn_session`] moves a [`Session`] onto its own tokio task. The task
//! is the only owner of the state:
//!
//! - **Intents** arrive over an mpsc channel and are answered on a oneshot
//! - **Ticks** come from a tokio interval that exists only while playing
//! - **Snapshots** are published on a watch channel after every mutation
//!
//! The loop uses a biased `select!`, so a queued pause, reset or shutdown is
//! always handled before a tick that became due at the same time. No tick
//! fires after such a command has been received.

use std::time::Duration;

use dreamstory_types::{GameState, SessionId};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::catalog::ObjectView;
use crate::session::{Intent, IntentOutcome, Session};
use crate::tick::TickSummary;

/// Capacity of the intent queue.
const COMMAND_BUFFER: usize = 64;

/// Errors returned when talking to a session actor.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The actor has stopped and no longer accepts intents.
    #[error("session actor is closed")]
    Closed,

    /// The actor task panicked or was cancelled.
    #[error("session actor failed: {source}")]
    Join {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}

/// Callback invoked after each timer tick.
///
/// Implementations can forward special events to a UI, write logs, etc.
pub trait TickCallback: Send {
    /// Called after a tick completes.
    fn on_tick(&mut self, summary: &TickSummary, state: &GameState);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &GameState) {}
}

enum Command {
    Intent {
        intent: Intent,
        reply: oneshot::Sender<IntentOutcome>,
    },
    RoomView {
        reply: oneshot::Sender<Vec<ObjectView>>,
    },
    Shutdown,
}

/// Client side of a running session actor.
#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<GameState>,
    task: JoinHandle<Session>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Intent { intent, .. } => f.debug_tuple("Intent").field(intent).finish(),
            Self::RoomView { .. } => f.write_str("RoomView"),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}

impl SessionHandle {
    /// Id of the session behind this handle.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Send an intent and wait until the actor has applied it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the actor has stopped.
    pub async fn send(&self, intent: Intent) -> Result<IntentOutcome, SessionError> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::Intent { intent, reply })
            .await
            .map_err(|_err| SessionError::Closed)?;
        outcome.await.map_err(|_err| SessionError::Closed)
    }

    /// Objects in the current room with their usability.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the actor has stopped.
    pub async fn room_view(&self) -> Result<Vec<ObjectView>, SessionError> {
        let (reply, views) = oneshot::channel();
        self.commands
            .send(Command::RoomView { reply })
            .await
            .map_err(|_err| SessionError::Closed)?;
        views.await.map_err(|_err| SessionError::Closed)
    }

    /// Clone the latest published state.
    pub fn snapshot(&self) -> GameState {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every published state.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.snapshots.clone()
    }

    /// Stop the actor and take the session back.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Join`] if the actor task panicked.
    pub async fn shutdown(self) -> Result<Session, SessionError> {
        // A send failure means the loop already exited; joining still works.
        let _ = self.commands.send(Command::Shutdown).await;
        Ok(self.task.await?)
    }
}

/// Move `session` onto a new tokio task and return its handle.
///
/// Must be called from within a tokio runtime.
pub fn spawn_session(session: Session, callback: Box<dyn TickCallback>) -> SessionHandle {
    let id = session.id();
    let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
    let (snapshots_tx, snapshots_rx) = watch::channel(session.snapshot());
    let task = tokio::spawn(run_session(session, commands_rx, snapshots_tx, callback));
    SessionHandle {
        id,
        commands: commands_tx,
        snapshots: snapshots_rx,
        task,
    }
}

// ---------------------------------------------------------------------------
// Actor loop
// ---------------------------------------------------------------------------

/// Owns the tick interval and remembers the last valid period.
struct Pacer {
    base: Duration,
    period: Duration,
    interval: Option<Interval>,
}

impl Pacer {
    fn new(base_interval_ms: u64) -> Self {
        let base = Duration::from_millis(base_interval_ms);
        Self {
            base,
            period: base,
            interval: None,
        }
    }

    /// Rebuild the timer to match `state`.
    ///
    /// Idle drops the interval. Running starts a fresh one whose first tick
    /// is one full period away.
    fn sync(&mut self, state: &GameState) {
        match period_for(self.base, state.game_speed) {
            Some(period) => self.period = period,
            None => warn!(
                speed = state.game_speed,
                period_ms = self.period.as_millis(),
                "Speed cannot pace the timer; keeping previous period"
            ),
        }

        if state.is_playing {
            let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            self.interval = Some(interval);
            debug!(period_ms = self.period.as_millis(), "Tick timer started");
        } else if self.interval.take().is_some() {
            debug!("Tick timer stopped");
        }
    }
}

/// `base / speed`, or `None` if that is not a usable timer period.
fn period_for(base: Duration, speed: f64) -> Option<Duration> {
    if !speed.is_finite() || speed <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(base.as_secs_f64() / speed)
        .ok()
        .filter(|period| !period.is_zero())
}

/// Resolve on the next timer tick, or never while idle.
async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn run_session(
    mut session: Session,
    mut commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<GameState>,
    mut callback: Box<dyn TickCallback>,
) -> Session {
    let mut pacer = Pacer::new(session.config().tick.base_interval_ms);
    pacer.sync(session.state());
    info!(session = %session.id(), "Session actor running");

    loop {
        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(Command::Intent { intent, reply }) => {
                    let retime = intent.affects_timer();
                    let outcome = session.handle(intent);
                    if retime {
                        pacer.sync(session.state());
                    }
                    snapshots.send_replace(session.snapshot());
                    // The caller may have stopped waiting for the answer.
                    let _ = reply.send(outcome);
                }
                Some(Command::RoomView { reply }) => {
                    let _ = reply.send(session.room_view());
                }
                Some(Command::Shutdown) | None => break,
            },

            () = next_tick(&mut pacer.interval) => {
                let summary = session.tick();
                callback.on_tick(&summary, session.state());
                snapshots.send_replace(session.snapshot());
            }
        }
    }

    info!(session = %session.id(), "Session actor stopped");
    session
}
