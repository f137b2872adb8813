//! Single-flight progress ticker.
//!
//! Every tick the running ticker reads the position clock and publishes
//! the clamped position into the shared [`PlaybackInfo`], so the seek
//! dial always reflects playback. At most one ticker is live at a time:
//! starting a new one bumps a generation counter, and a ticker whose
//! generation no longer matches exits before performing its tick, so no
//! pending tick can land after cancellation was requested.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use super::types::{ClockHandle, PlaybackHandle};

pub struct ProgressTicker {
    generation: Arc<AtomicU64>,
    interval: Duration,
}

impl ProgressTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            interval,
        }
    }

    /// Cancel any running ticker and start a fresh one.
    pub fn start(&self, clock: ClockHandle, info: PlaybackHandle) {
        let my_gen = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = self.generation.clone();
        let interval = self.interval;
        thread::spawn(move || run_ticks(&generation, my_gen, interval, &clock, &info));
    }

    /// Cancel the running ticker (pause, new load, stop, teardown).
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Tick loop body, separated from the thread spawn so tests can drive it.
///
/// Exits when: the generation moved on (external cancellation), the engine
/// stopped reporting Playing, or the position reached the track duration
/// (natural end, after one final write of exactly `duration`).
pub(super) fn run_ticks(
    generation: &AtomicU64,
    my_gen: u64,
    interval: Duration,
    clock: &ClockHandle,
    info: &PlaybackHandle,
) {
    loop {
        thread::sleep(interval);

        let position = match clock.lock() {
            Ok(c) => c.position(),
            Err(_) => return,
        };

        let Ok(mut snapshot) = info.lock() else {
            return;
        };
        // Re-check under the lock: a cancelled ticker must not write.
        if generation.load(Ordering::SeqCst) != my_gen {
            return;
        }
        if !snapshot.playing() {
            return;
        }

        let duration = snapshot.duration;
        if !duration.is_zero() && position >= duration {
            // Natural end of track: one final write at full scale tells the
            // UI the song completed.
            snapshot.position = duration;
            return;
        }
        snapshot.position = position;
    }
}
