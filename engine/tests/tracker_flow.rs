//! Per-operator tracker: local resume flip, reload recovery, elapsed
//! display anchoring.

mod support;

use std::sync::Arc;

use chrono::Duration;
use floortrack_engine::error::AppError;
use floortrack_engine::services::{SessionService, SessionTracker, TrackerState};
use support::{at, InMemorySessionRepository, ManualClock};

fn setup() -> (
    Arc<InMemorySessionRepository>,
    Arc<ManualClock>,
    SessionTracker,
) {
    let repo = Arc::new(InMemorySessionRepository::new());
    let clock = Arc::new(ManualClock::new(at(9, 0)));
    let service = Arc::new(SessionService::new(repo.clone(), clock.clone()));
    let tracker = SessionTracker::new("Jane", service, clock.clone());
    (repo, clock, tracker)
}

#[tokio::test]
async fn start_pause_resume_stop_flow() {
    let (repo, clock, tracker) = setup();

    let snapshot = tracker.start("1001", "SMT").await.unwrap();
    assert_eq!(snapshot.state, TrackerState::Active);
    assert_eq!(snapshot.start_time, Some(at(9, 0)));
    let session_id = snapshot.session_id.clone().unwrap();

    clock.set(at(12, 0));
    let snapshot = tracker.pause().await.unwrap();
    assert_eq!(snapshot.state, TrackerState::Paused);
    // The elapsed display keeps running on wall clock.
    assert_eq!(snapshot.elapsed_hours, 3.0);

    clock.set(at(12, 30));
    let snapshot = tracker.resume().await.unwrap();
    assert_eq!(snapshot.state, TrackerState::Active);
    // Resume is a local flip only: the stored pause survives.
    assert!(repo.get(&session_id).unwrap().pause_time.is_some());

    // The stale pause caps the credited hours at the pause instant.
    clock.set(at(13, 0));
    let completed = tracker.stop().await.unwrap();
    assert_eq!(completed.hours_worked, Some(3.0));
    assert_eq!(tracker.snapshot().await.state, TrackerState::None);
}

#[tokio::test]
async fn recover_rebuilds_the_cache_after_a_reload() {
    let (repo, clock, tracker) = setup();

    tracker.start("1001", "SMT").await.unwrap();
    clock.set(at(12, 0));
    tracker.pause().await.unwrap();

    // Simulated reload: a fresh tracker over the same store, no local cache.
    let service = Arc::new(SessionService::new(repo.clone(), clock.clone()));
    let reloaded = SessionTracker::new("Jane", service, clock.clone());
    assert_eq!(reloaded.snapshot().await.state, TrackerState::None);

    let snapshot = reloaded.recover().await.unwrap();
    assert_eq!(snapshot.state, TrackerState::Paused);
    assert_eq!(snapshot.start_time, Some(at(9, 0)));
    assert_eq!(snapshot.elapsed_hours, 3.0);
}

#[tokio::test]
async fn recover_with_no_open_session_returns_to_none() {
    let (_repo, clock, tracker) = setup();

    tracker.start("1001", "SMT").await.unwrap();
    clock.set(at(10, 0));
    tracker.stop().await.unwrap();

    let snapshot = tracker.recover().await.unwrap();
    assert_eq!(snapshot.state, TrackerState::None);
    assert!(snapshot.session_id.is_none());
    assert_eq!(snapshot.elapsed_hours, 0.0);
}

#[tokio::test]
async fn operations_without_a_tracked_session_are_not_found() {
    let (_repo, _clock, tracker) = setup();

    assert!(matches!(
        tracker.pause().await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        tracker.resume().await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        tracker.stop().await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn starting_twice_from_one_tracker_conflicts_locally() {
    let (_repo, _clock, tracker) = setup();

    tracker.start("1001", "SMT").await.unwrap();
    let err = tracker.start("2002", "WAVE").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn failed_pause_keeps_the_tracker_active() {
    let (repo, clock, tracker) = setup();

    tracker.start("1001", "SMT").await.unwrap();
    clock.advance(Duration::hours(1));

    repo.set_failing(true);
    assert!(matches!(
        tracker.pause().await.unwrap_err(),
        AppError::Io(_)
    ));
    repo.set_failing(false);

    assert_eq!(tracker.snapshot().await.state, TrackerState::Active);
}
