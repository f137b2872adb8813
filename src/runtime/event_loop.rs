use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Prompt};
use crate::audio::{EngineCmd, EngineState, PlaybackInfo, PlayerEngine};
use crate::config;
use crate::dial;
use crate::playlist;
use crate::ui;

/// Main terminal event loop: draws the UI, keeps the engine's track list
/// in sync and dispatches key and mouse input. Returns when the user
/// quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    engine: &PlayerEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut areas = ui::Areas::default();
    let mut last_seek: Option<u64> = None;
    let send = |cmd: EngineCmd| {
        let _ = engine.send(cmd);
    };

    loop {
        // Keep the audio thread's track list in sync after playlist mutations.
        if app.tracks_dirty() {
            send(EngineCmd::SetTracks(app.store.locators()));
            app.clear_tracks_dirty();
        }

        // Snapshot playback state once per frame; the ticker writes into the
        // same handle between frames.
        let snapshot: PlaybackInfo = app
            .playback_handle
            .as_ref()
            .and_then(|h| h.lock().ok().map(|info| info.clone()))
            .unwrap_or_default();

        terminal.draw(|f| {
            areas = ui::draw(f, app, &snapshot, &settings.ui);
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, app, &send, &snapshot) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(mouse, areas, &send, &snapshot, &mut last_seek)
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Handle one key press, dispatching playback commands through `send`.
/// Returns true when the app should quit.
pub(super) fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    send: &impl Fn(EngineCmd),
    snapshot: &PlaybackInfo,
) -> bool {
    match app.prompt.clone() {
        Prompt::AddPath { mut buf } => {
            match key.code {
                KeyCode::Esc => app.prompt = Prompt::None,
                KeyCode::Backspace => {
                    buf.pop();
                    app.prompt = Prompt::AddPath { buf };
                }
                KeyCode::Enter => {
                    let path = PathBuf::from(buf.trim());
                    if buf.trim().is_empty() {
                        app.prompt = Prompt::None;
                    } else if !path.is_file() {
                        app.set_status(format!("No such file: {}", path.display()));
                        app.prompt = Prompt::AddPath { buf };
                    } else {
                        // Suggest the file stem as the title, like the
                        // original picker dialog pre-filling its input.
                        let stem = path
                            .file_stem()
                            .and_then(|s| s.to_str())
                            .unwrap_or("")
                            .to_string();
                        app.prompt = Prompt::AddTitle {
                            locator: path,
                            buf: stem,
                        };
                    }
                }
                KeyCode::Char(c) if !c.is_control() => {
                    buf.push(c);
                    app.prompt = Prompt::AddPath { buf };
                }
                _ => {}
            }
            false
        }
        Prompt::AddTitle { locator, mut buf } => {
            match key.code {
                KeyCode::Esc => app.prompt = Prompt::None,
                KeyCode::Backspace => {
                    buf.pop();
                    app.prompt = Prompt::AddTitle { locator, buf };
                }
                KeyCode::Enter => {
                    let title = buf.trim().to_string();
                    if title.is_empty() {
                        // An empty title cancels the add, silently.
                        app.prompt = Prompt::None;
                    } else if title.contains('|') {
                        app.set_status("Title may not contain '|'");
                        app.prompt = Prompt::AddTitle { locator, buf };
                    } else {
                        app.prompt = Prompt::None;
                        finish_add(app, settings, &title, &locator);
                    }
                }
                KeyCode::Char(c) if !c.is_control() => {
                    buf.push(c);
                    app.prompt = Prompt::AddTitle { locator, buf };
                }
                _ => {}
            }
            false
        }
        Prompt::ConfirmDelete(index) => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.prompt = Prompt::None;
                    // Removing the loaded track stops playback first, so the
                    // engine never points at a vanished entry.
                    if snapshot.index == Some(index) {
                        send(EngineCmd::Stop);
                    }
                    match app.remove_track(index) {
                        Ok(()) => app.set_status("Removed"),
                        Err(e) => app.set_status(e.to_string()),
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.prompt = Prompt::None;
                }
                _ => {}
            }
            false
        }
        Prompt::None => handle_normal_key(key, settings, app, send, snapshot),
    }
}

fn handle_normal_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    send: &impl Fn(EngineCmd),
    snapshot: &PlaybackInfo,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
        }
        KeyCode::Enter => {
            if app.has_tracks() {
                app.clear_status();
                send(EngineCmd::Load(app.selected));
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            if snapshot.state == EngineState::Idle {
                if app.has_tracks() {
                    app.clear_status();
                    send(EngineCmd::Load(app.selected));
                }
            } else {
                send(EngineCmd::TogglePause);
            }
        }
        KeyCode::Char('l') => {
            if app.has_tracks() {
                app.clear_status();
                send(EngineCmd::Next);
            }
        }
        KeyCode::Char('h') => {
            if app.has_tracks() {
                app.clear_status();
                send(EngineCmd::Prev);
            }
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            send(EngineCmd::SeekBy(secs));
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
            send(EngineCmd::SeekBy(-secs));
        }
        KeyCode::Char('a') => {
            app.clear_status();
            app.prompt = Prompt::AddPath { buf: String::new() };
        }
        KeyCode::Char('d') => {
            if app.has_tracks() {
                app.prompt = Prompt::ConfirmDelete(app.selected);
            }
        }
        _ => {}
    }

    false
}

/// Complete the add flow: optionally copy the file into the rondo data
/// directory (as the original app did with picked files), then append.
fn finish_add(app: &mut App, settings: &config::Settings, title: &str, locator: &Path) {
    let locator: PathBuf = if settings.playlist.copy_into_library {
        match copy_into_library(title, locator) {
            Ok(copied) => copied,
            Err(e) => {
                app.set_status(format!("Copy failed: {e}"));
                return;
            }
        }
    } else {
        locator.to_path_buf()
    };

    match app.add_track(title, locator) {
        Ok(()) => app.set_status(format!("Added '{title}'")),
        Err(e) => app.set_status(e.to_string()),
    }
}

fn copy_into_library(title: &str, source: &Path) -> std::io::Result<PathBuf> {
    let dir = playlist::library_dir()
        .ok_or_else(|| std::io::Error::other("no data directory available"))?;
    fs::create_dir_all(&dir)?;

    let mut name = title.to_string();
    if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    let dest = dir.join(name);
    fs::copy(source, &dest)?;
    Ok(dest)
}

/// Map presses and drags over the dial into seeks, and clicks on the
/// dial's center into play/pause. Every drag sample re-evaluates the
/// geometry, so holding the button and circling scrubs continuously.
/// `last_seek` remembers the last target sent; drag samples that resolve
/// to the same position are dropped, since each seek rebuilds the
/// decoder.
pub(super) fn handle_mouse_event(
    mouse: MouseEvent,
    areas: ui::Areas,
    send: &impl Fn(EngineCmd),
    snapshot: &PlaybackInfo,
    last_seek: &mut Option<u64>,
) {
    let pressed = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));
    let dragged = matches!(mouse.kind, MouseEventKind::Drag(MouseButton::Left));
    if !pressed && !dragged {
        return;
    }
    if pressed {
        // A fresh press always seeks, even back to the previous target.
        *last_seek = None;
    }

    let dial_area = areas.dial;
    if !dial_area.contains(Position::new(mouse.column, mouse.row)) {
        return;
    }

    // Cell-center coordinates over the dial surface, matching how the
    // widget paints the band.
    let w = dial_area.width as f64;
    let h = dial_area.height as f64;
    let x = (mouse.column - dial_area.x) as f64 + 0.5;
    let y = (mouse.row - dial_area.y) as f64 + 0.5;

    // Seeking needs a loaded track with a known length.
    if snapshot.state != EngineState::Idle && !snapshot.duration.is_zero() {
        let max = snapshot.duration.as_millis() as u64;
        if let Some(target) = dial::seek_target(w, h, x, y, max) {
            if *last_seek != Some(target) {
                *last_seek = Some(target);
                send(EngineCmd::SeekTo(Duration::from_millis(target)));
            }
            return;
        }
    }

    // The inner circle is its own control: tap (not drag) toggles pause.
    if pressed && dial::inner_hit(w, h, x, y) {
        send(EngineCmd::TogglePause);
    }
}
