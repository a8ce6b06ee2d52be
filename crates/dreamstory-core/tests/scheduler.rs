//! Integration tests for the timer-driven session actor.
//!
//! Tokio's clock is paused, so every `sleep` below advances virtual time
//! deterministically and the actor's interval fires at exact instants.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dreamstory_core::config::DreamStoryConfig;
use dreamstory_core::scheduler::{NoOpCallback, SessionHandle, TickCallback, spawn_session};
use dreamstory_core::session::{Intent, IntentOutcome, Session};
use dreamstory_core::tick::TickSummary;
use dreamstory_types::{GameState, ObjectId, Room};
use tokio::time::sleep;

fn quiet_config() -> DreamStoryConfig {
    let mut config = DreamStoryConfig::default();
    config.world.seed = Some(99);
    config.tick.decay_chance = 0.0;
    config.situations.chance = 0.0;
    config
}

fn spawn_quiet() -> SessionHandle {
    spawn_session(Session::new(Arc::new(quiet_config())), Box::new(NoOpCallback))
}

async fn ms(millis: u64) {
    sleep(Duration::from_millis(millis)).await;
}

#[tokio::test(start_paused = true)]
async fn idle_session_never_ticks() {
    let handle = spawn_quiet();
    ms(10_000).await;
    assert_eq!(handle.snapshot(), GameState::default());
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn first_tick_comes_one_period_after_play() {
    let handle = spawn_quiet();
    handle.send(Intent::TogglePlaying).await.unwrap();

    ms(950).await;
    assert_eq!(handle.snapshot().time, 8.0);

    ms(100).await;
    let state = handle.snapshot();
    assert!(state.is_playing);
    assert_eq!(state.time, 8.5);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn double_speed_halves_the_period_and_doubles_the_step() {
    let handle = spawn_quiet();
    handle.send(Intent::SetSpeed(2.0)).await.unwrap();
    handle.send(Intent::TogglePlaying).await.unwrap();

    // Ticks at 500 ms and 1000 ms, each adding a full hour.
    ms(1050).await;
    assert_eq!(handle.snapshot().time, 10.0);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn speed_change_restarts_the_timer() {
    let handle = spawn_quiet();
    handle.send(Intent::TogglePlaying).await.unwrap();

    ms(600).await;
    handle.send(Intent::SetSpeed(2.0)).await.unwrap();

    // The old 1000 ms deadline is gone; the new one is 500 ms after the change.
    ms(450).await;
    assert_eq!(handle.snapshot().time, 8.0);

    ms(100).await;
    assert_eq!(handle.snapshot().time, 9.0);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn pause_cancels_pending_ticks() {
    let handle = spawn_quiet();
    handle.send(Intent::TogglePlaying).await.unwrap();
    ms(1050).await;
    assert_eq!(handle.snapshot().time, 8.5);

    handle.send(Intent::TogglePlaying).await.unwrap();
    ms(10_000).await;
    let state = handle.snapshot();
    assert!(!state.is_playing);
    assert_eq!(state.time, 8.5);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reset_stops_the_timer_and_restores_defaults() {
    let handle = spawn_quiet();
    handle.send(Intent::SetRoom(Room::Kitchen)).await.unwrap();
    handle.send(Intent::TogglePlaying).await.unwrap();
    ms(3050).await;
    assert_eq!(handle.snapshot().time, 9.5);

    handle.send(Intent::Reset).await.unwrap();
    assert_eq!(handle.snapshot(), GameState::default());

    ms(10_000).await;
    assert_eq!(handle.snapshot(), GameState::default());

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn invalid_speed_keeps_the_previous_period() {
    let handle = spawn_quiet();
    handle.send(Intent::TogglePlaying).await.unwrap();
    handle.send(Intent::SetSpeed(0.0)).await.unwrap();

    // Timer restarted at the old 1000 ms period, but a zero speed adds
    // no time per tick.
    ms(5050).await;
    let state = handle.snapshot();
    assert_eq!(state.game_speed, 0.0);
    assert_eq!(state.time, 8.0);

    handle.send(Intent::SetSpeed(1.0)).await.unwrap();
    ms(1050).await;
    assert_eq!(handle.snapshot().time, 8.5);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn intents_are_answered_and_published() {
    let handle = spawn_quiet();
    let mut updates = handle.subscribe();

    let outcome = handle
        .send(Intent::Interact(ObjectId::from("water")))
        .await
        .unwrap();
    assert!(matches!(outcome, IntentOutcome::Interaction(o) if o.is_applied()));

    assert!(updates.has_changed().unwrap());
    let published = updates.borrow_and_update().clone();
    assert_eq!(published.time, 9.0);
    assert_eq!(published.history.last_actions, vec!["Água (drinkWater)"]);

    let unknown = handle
        .send(Intent::Interact(ObjectId::from("hot-tub")))
        .await
        .unwrap();
    assert_eq!(unknown, IntentOutcome::UnknownObject(ObjectId::from("hot-tub")));

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn callback_sees_every_tick() {
    struct Counter(Arc<AtomicU64>);
    impl TickCallback for Counter {
        fn on_tick(&mut self, _summary: &TickSummary, _state: &GameState) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    let count = Arc::new(AtomicU64::new(0));
    let session = Session::new(Arc::new(quiet_config()));
    let handle = spawn_session(session, Box::new(Counter(Arc::clone(&count))));
    handle.send(Intent::TogglePlaying).await.unwrap();

    ms(3050).await;
    assert_eq!(count.load(Ordering::Relaxed), 3);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_returns_the_session() {
    let handle = spawn_quiet();
    let id = handle.id();
    handle
        .send(Intent::Interact(ObjectId::from("wardrobe")))
        .await
        .unwrap();

    let session = handle.shutdown().await.unwrap();
    assert_eq!(session.id(), id);
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.state().time, 9.0);
}

#[tokio::test(start_paused = true)]
async fn room_view_reflects_cooldowns_inside_the_actor() {
    let handle = spawn_quiet();
    handle
        .send(Intent::Interact(ObjectId::from("wardrobe")))
        .await
        .unwrap();

    let views = handle.room_view().await.unwrap();
    let ids: Vec<&str> = views.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["bed", "computer", "wardrobe"]);
    let wardrobe = views.iter().find(|v| v.id.as_str() == "wardrobe").unwrap();
    assert!(!wardrobe.usability.is_usable());

    handle.shutdown().await.unwrap();
}
