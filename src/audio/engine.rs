use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use super::thread::spawn_engine_thread;
use super::types::{EngineCmd, PlaybackHandle, PlaybackInfo};

/// Handle to the audio thread: command sender plus the shared playback
/// info the UI reads every frame.
pub struct PlayerEngine {
    tx: Sender<EngineCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl PlayerEngine {
    pub fn new(tracks: Vec<PathBuf>, tick_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let handle = spawn_engine_thread(tracks, rx, playback_info.clone(), tick_interval);

        Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(handle)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn send(&self, cmd: EngineCmd) -> Result<(), mpsc::SendError<EngineCmd>> {
        self.tx.send(cmd)
    }

    /// Ask the audio thread to release its decoder and wait for it to exit.
    pub fn quit(&self) {
        let _ = self.send(EngineCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
