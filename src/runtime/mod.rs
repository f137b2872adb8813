use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::PlayerEngine;
use crate::playlist::{self, PlaylistStore};

mod event_loop;
mod settings;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let playlist_path = settings
        .playlist
        .path
        .clone()
        .or_else(playlist::default_playlist_path)
        .unwrap_or_else(|| PathBuf::from("playlist.txt"));

    let store = PlaylistStore::open(&playlist_path);
    let engine = PlayerEngine::new(
        store.locators(),
        Duration::from_millis(settings.ticker.interval_ms),
    );

    let mut app = App::new(store);
    app.set_playback_handle(engine.playback_handle());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &engine);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Shuts down the audio thread and, with it, any live ticker.
    engine.quit();

    run_result
}
