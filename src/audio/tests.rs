use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use super::thread::{clamp_seek, next_index, prev_index};
use super::ticker::ProgressTicker;
use super::types::{ClockHandle, EngineState, PlaybackHandle, PlaybackInfo, PositionClock};

#[test]
fn next_prev_wrap_around_the_playlist() {
    // The two-track scenario: index 0 -> next -> 1 -> next wraps to 0.
    assert_eq!(next_index(Some(0), 2), Some(1));
    assert_eq!(next_index(Some(1), 2), Some(0));
    assert_eq!(prev_index(Some(0), 2), Some(1));
    assert_eq!(prev_index(Some(1), 2), Some(0));
}

#[test]
fn next_prev_on_single_track_reselect_it() {
    assert_eq!(next_index(Some(0), 1), Some(0));
    assert_eq!(prev_index(Some(0), 1), Some(0));
}

#[test]
fn next_prev_on_empty_playlist_are_no_ops() {
    assert_eq!(next_index(None, 0), None);
    assert_eq!(next_index(Some(3), 0), None);
    assert_eq!(prev_index(None, 0), None);
}

#[test]
fn next_prev_with_nothing_loaded_start_from_zero() {
    assert_eq!(next_index(None, 3), Some(1));
    assert_eq!(prev_index(None, 3), Some(2));
}

#[test]
fn clamp_seek_bounds_the_target() {
    let dur = Duration::from_secs(100);
    assert_eq!(clamp_seek(Duration::from_secs(30), dur), Duration::from_secs(30));
    assert_eq!(clamp_seek(Duration::from_secs(500), dur), dur);
    assert_eq!(clamp_seek(Duration::ZERO, dur), Duration::ZERO);
    // Unknown duration: only the lower bound applies.
    assert_eq!(
        clamp_seek(Duration::from_secs(500), Duration::ZERO),
        Duration::from_secs(500)
    );
}

fn playing_info(duration: Duration) -> PlaybackHandle {
    Arc::new(Mutex::new(PlaybackInfo {
        index: Some(0),
        position: Duration::ZERO,
        duration,
        state: EngineState::Playing,
        error: None,
    }))
}

fn frozen_clock(at: Duration) -> ClockHandle {
    Arc::new(Mutex::new(PositionClock {
        started_at: None,
        accumulated: at,
    }))
}

#[test]
fn ticker_publishes_positions_while_playing() {
    let info = playing_info(Duration::from_secs(600));
    let clock: ClockHandle = Arc::new(Mutex::new(PositionClock {
        started_at: Some(Instant::now()),
        accumulated: Duration::ZERO,
    }));

    let ticker = ProgressTicker::new(Duration::from_millis(10));
    ticker.start(clock, info.clone());
    thread::sleep(Duration::from_millis(80));

    assert!(info.lock().unwrap().position > Duration::ZERO);
    ticker.cancel();
}

#[test]
fn cancelled_ticker_never_writes_again() {
    let info = playing_info(Duration::from_secs(600));
    let clock: ClockHandle = Arc::new(Mutex::new(PositionClock {
        started_at: Some(Instant::now()),
        accumulated: Duration::ZERO,
    }));

    let ticker = ProgressTicker::new(Duration::from_millis(10));
    ticker.start(clock, info.clone());
    thread::sleep(Duration::from_millis(50));
    ticker.cancel();

    // Allow any in-flight tick to settle, then the position must hold still.
    thread::sleep(Duration::from_millis(40));
    let frozen = info.lock().unwrap().position;
    thread::sleep(Duration::from_millis(60));
    assert_eq!(info.lock().unwrap().position, frozen);
}

#[test]
fn starting_a_new_ticker_cancels_the_old_one() {
    let info = playing_info(Duration::from_secs(600));
    let old_clock = frozen_clock(Duration::from_secs(1));
    let new_clock = frozen_clock(Duration::from_secs(2));

    let ticker = ProgressTicker::new(Duration::from_millis(10));
    ticker.start(old_clock, info.clone());
    ticker.start(new_clock, info.clone());

    // Let both threads pass their first tick, then only the new clock's
    // value may ever appear.
    thread::sleep(Duration::from_millis(60));
    for _ in 0..5 {
        assert_eq!(info.lock().unwrap().position, Duration::from_secs(2));
        thread::sleep(Duration::from_millis(15));
    }
    ticker.cancel();
}

#[test]
fn ticker_exits_quietly_when_not_playing() {
    let info = playing_info(Duration::from_secs(600));
    info.lock().unwrap().state = EngineState::Paused;
    let clock = frozen_clock(Duration::from_secs(42));

    let ticker = ProgressTicker::new(Duration::from_millis(10));
    ticker.start(clock, info.clone());
    thread::sleep(Duration::from_millis(60));

    // It never wrote anything and is gone.
    assert_eq!(info.lock().unwrap().position, Duration::ZERO);
}

#[test]
fn ticker_writes_full_duration_at_natural_end() {
    let duration = Duration::from_millis(30);
    let info = playing_info(duration);
    let clock: ClockHandle = Arc::new(Mutex::new(PositionClock {
        started_at: Some(Instant::now()),
        accumulated: Duration::ZERO,
    }));

    let ticker = ProgressTicker::new(Duration::from_millis(10));
    ticker.start(clock, info.clone());
    thread::sleep(Duration::from_millis(100));

    // Final write is exactly the duration, never beyond it.
    assert_eq!(info.lock().unwrap().position, duration);
    thread::sleep(Duration::from_millis(30));
    assert_eq!(info.lock().unwrap().position, duration);
}
