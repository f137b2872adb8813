use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};

use super::sink::{create_sink_at, probe_duration};
use super::ticker::ProgressTicker;
use super::types::{ClockHandle, EngineCmd, EngineState, PlaybackHandle, PositionClock};

/// Index of the track after `current`, wrapping at the end of the list.
pub(crate) fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((current.unwrap_or(0) + 1) % len)
}

/// Index of the track before `current`, wrapping at the start of the list.
pub(crate) fn prev_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((current.unwrap_or(0) + len - 1) % len)
}

/// Clamp a requested seek offset into `[0, duration]`. An unknown (zero)
/// duration only clamps the lower bound.
pub(crate) fn clamp_seek(target: Duration, duration: Duration) -> Duration {
    if duration.is_zero() {
        target
    } else {
        target.min(duration)
    }
}

pub(super) fn spawn_engine_thread(
    tracks: Vec<PathBuf>,
    rx: Receiver<EngineCmd>,
    info: PlaybackHandle,
    tick_interval: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut engine = Engine {
            stream,
            tracks,
            index: None,
            sink: None,
            paused: false,
            clock: Arc::new(Mutex::new(PositionClock::default())),
            info,
            ticker: ProgressTicker::new(tick_interval),
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(EngineCmd::SetTracks(new_tracks)) => engine.set_tracks(new_tracks),
                Ok(EngineCmd::Load(i)) => engine.load(i),
                Ok(EngineCmd::TogglePause) => engine.toggle_pause(),
                Ok(EngineCmd::SeekTo(target)) => engine.seek_to(target),
                Ok(EngineCmd::SeekBy(secs)) => engine.seek_by(secs),
                Ok(EngineCmd::Next) => {
                    if let Some(i) = next_index(engine.index, engine.tracks.len()) {
                        engine.load(i);
                    }
                }
                Ok(EngineCmd::Prev) => {
                    if let Some(i) = prev_index(engine.index, engine.tracks.len()) {
                        engine.load(i);
                    }
                }
                Ok(EngineCmd::Stop) => engine.release(None),
                Ok(EngineCmd::Quit) => {
                    engine.release(None);
                    break;
                }
                Err(RecvTimeoutError::Timeout) => engine.check_track_ended(),
                Err(RecvTimeoutError::Disconnected) => {
                    engine.release(None);
                    break;
                }
            }
        }
    })
}

/// All state owned by the audio thread. At most one `Sink` (decoder
/// handle) is alive at any time; every load releases the previous one.
struct Engine {
    stream: rodio::OutputStream,
    tracks: Vec<PathBuf>,
    index: Option<usize>,
    sink: Option<Sink>,
    paused: bool,
    clock: ClockHandle,
    info: PlaybackHandle,
    ticker: ProgressTicker,
}

impl Engine {
    /// Release the current decoder (if any), bind a new one to the track
    /// at `i`, start playback immediately and restart the ticker.
    fn load(&mut self, i: usize) {
        let Some(path) = self.tracks.get(i).cloned() else {
            return;
        };

        self.ticker.cancel();
        if let Some(s) = self.sink.take() {
            s.stop();
        }

        match create_sink_at(&self.stream, &path, Duration::ZERO) {
            Ok(new_sink) => {
                let duration = probe_duration(&path).unwrap_or(Duration::ZERO);
                new_sink.play();
                self.sink = Some(new_sink);
                self.index = Some(i);
                self.paused = false;
                if let Ok(mut clock) = self.clock.lock() {
                    clock.run_from(Duration::ZERO);
                }
                if let Ok(mut info) = self.info.lock() {
                    info.index = Some(i);
                    info.position = Duration::ZERO;
                    info.duration = duration;
                    info.state = EngineState::Playing;
                    info.error = None;
                }
                self.ticker.start(self.clock.clone(), self.info.clone());
            }
            // A failed load must leave the engine Idle: no dangling
            // decoder, ticker not started, error surfaced to the UI.
            Err(e) => self.release(Some(e.to_string())),
        }
    }

    /// Free the decoder and go back to Idle, optionally publishing a
    /// load failure.
    fn release(&mut self, error: Option<String>) {
        self.ticker.cancel();
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.index = None;
        self.paused = false;
        if let Ok(mut clock) = self.clock.lock() {
            clock.freeze(Duration::ZERO);
        }
        if let Ok(mut info) = self.info.lock() {
            info.index = None;
            info.position = Duration::ZERO;
            info.duration = Duration::ZERO;
            info.state = EngineState::Idle;
            info.error = error;
        }
    }

    fn toggle_pause(&mut self) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };

        if self.paused {
            // Resuming: restart the clock from the frozen position and
            // bring the ticker back.
            s.play();
            self.paused = false;
            let at = match self.clock.lock() {
                Ok(mut clock) => {
                    let at = clock.position();
                    clock.run_from(at);
                    at
                }
                Err(_) => Duration::ZERO,
            };
            if let Ok(mut info) = self.info.lock() {
                info.position = clamp_seek(at, info.duration);
                info.state = EngineState::Playing;
            }
            self.ticker.start(self.clock.clone(), self.info.clone());
        } else {
            // Pausing: cancel the ticker first so no pending tick lands,
            // then freeze the clock where it is.
            self.ticker.cancel();
            s.pause();
            self.paused = true;
            let at = match self.clock.lock() {
                Ok(mut clock) => {
                    let at = clock.position();
                    clock.freeze(at);
                    at
                }
                Err(_) => Duration::ZERO,
            };
            if let Ok(mut info) = self.info.lock() {
                info.position = clamp_seek(at, info.duration);
                info.state = EngineState::Paused;
            }
        }
    }

    /// Jump to an absolute offset, clamped to `[0, duration]`. Valid while
    /// Playing or Paused; the Playing/Paused state is preserved.
    ///
    /// Scrubbing rebuilds the sink and skips into the file; this uses
    /// `Source::skip_duration` (works for common formats).
    fn seek_to(&mut self, target: Duration) {
        let Some(i) = self.index else {
            return;
        };
        if self.sink.is_none() {
            return;
        }
        let Some(path) = self.tracks.get(i).cloned() else {
            return;
        };

        let duration = self.info.lock().map(|info| info.duration).unwrap_or_default();
        let target = clamp_seek(target, duration);

        if let Some(s) = self.sink.take() {
            s.stop();
        }

        match create_sink_at(&self.stream, &path, target) {
            Ok(new_sink) => {
                if self.paused {
                    // create_sink_at hands back a paused sink.
                    if let Ok(mut clock) = self.clock.lock() {
                        clock.freeze(target);
                    }
                } else {
                    new_sink.play();
                    if let Ok(mut clock) = self.clock.lock() {
                        clock.run_from(target);
                    }
                }
                self.sink = Some(new_sink);
                if let Ok(mut info) = self.info.lock() {
                    info.position = target;
                }
            }
            Err(e) => self.release(Some(e.to_string())),
        }
    }

    fn seek_by(&mut self, secs: i64) {
        if self.sink.is_none() {
            return;
        }
        let current = self.clock.lock().map(|c| c.position()).unwrap_or_default();
        let target = if secs >= 0 {
            current.saturating_add(Duration::from_secs(secs as u64))
        } else {
            current.saturating_sub(Duration::from_secs(secs.unsigned_abs()))
        };
        self.seek_to(target);
    }

    /// Adopt a new track list after a playlist mutation. The loaded track
    /// is re-found by locator; if it was removed, playback stops.
    fn set_tracks(&mut self, new_tracks: Vec<PathBuf>) {
        if let Some(i) = self.index {
            let current = self.tracks.get(i).cloned();
            match current.and_then(|p| new_tracks.iter().position(|q| *q == p)) {
                Some(ni) => {
                    self.index = Some(ni);
                    if let Ok(mut info) = self.info.lock() {
                        info.index = Some(ni);
                    }
                }
                None => self.release(None),
            }
        }
        self.tracks = new_tracks;
    }

    /// Idle-branch check for natural end of track. No auto-advance: the
    /// indicator lands on the full duration and the engine goes Idle.
    fn check_track_ended(&mut self) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if self.paused || !s.empty() {
            return;
        }

        self.ticker.cancel();
        self.sink = None;
        let duration = self.info.lock().map(|info| info.duration).unwrap_or_default();
        if let Ok(mut clock) = self.clock.lock() {
            clock.freeze(duration);
        }
        if let Ok(mut info) = self.info.lock() {
            // Keep the index so the UI still shows which song finished.
            info.position = duration;
            info.state = EngineState::Idle;
        }
    }
}
