//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the single screen: header, playlist, the circular
//! seek dial, a status box and the controls footer.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, Prompt};
use crate::audio::{EngineState, PlaybackInfo};
use crate::config::UiSettings;
use crate::dial::{SeekDial, format_mmss};

/// Where the interactive regions ended up on screen this frame; the event
/// loop maps mouse events against these.
#[derive(Debug, Clone, Copy, Default)]
pub struct Areas {
    /// Inner surface of the seek dial pane.
    pub dial: Rect,
}

/// Render the entire UI and report the frame's interactive areas.
pub fn draw(frame: &mut Frame, app: &App, info: &PlaybackInfo, ui_settings: &UiSettings) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" rondo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Playlist on the left, seek dial on the right.
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    draw_playlist(frame, app, info, middle[0]);
    let dial = draw_dial(frame, info, middle[1]);

    draw_status(frame, app, info, chunks[2]);

    let footer = Paragraph::new(controls_text(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" controls ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(footer, chunks[3]);

    Areas { dial }
}

fn draw_playlist(frame: &mut Frame, app: &App, info: &PlaybackInfo, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if info.index == Some(i) { "♪ " } else { "  " };
            ListItem::new(format!("{marker}{}", track.title))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlist "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ratatui::widgets::ListState::default();
    if app.has_tracks() {
        state.select(Some(app.selected.min(app.store.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_dial(frame: &mut Frame, info: &PlaybackInfo, area: Rect) -> Rect {
    let block = Block::default().borders(Borders::ALL).title(" seek ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(
        SeekDial {
            position: info.position,
            duration: info.duration,
            playing: info.playing(),
        },
        inner,
    );
    inner
}

fn draw_status(frame: &mut Frame, app: &App, info: &PlaybackInfo, area: Rect) {
    let line = match &app.prompt {
        Prompt::AddPath { buf } => format!("Add song - path: {buf}▏"),
        Prompt::AddTitle { locator, buf } => {
            format!("Title for {}: {buf}▏", locator.display())
        }
        Prompt::ConfirmDelete(i) => {
            let title = app.store.get(*i).map(|t| t.title.as_str()).unwrap_or("?");
            format!("Delete '{title}'? (y/n)")
        }
        Prompt::None => {
            let mut parts: Vec<String> = Vec::new();

            match info.state {
                EngineState::Playing => parts.push("Playing".to_string()),
                EngineState::Paused => parts.push("Paused".to_string()),
                EngineState::Idle => parts.push("Stopped".to_string()),
            }

            if let Some(idx) = info.index {
                if let Some(track) = app.store.get(idx) {
                    parts.push(format!(
                        "Song: {} [{} / {}]",
                        track.title,
                        format_mmss(info.position),
                        format_mmss(info.duration)
                    ));
                }
            }

            if let Some(err) = &info.error {
                parts.push(format!("Error: {err}"));
            } else if let Some(status) = &app.status {
                parts.push(status.clone());
            }

            parts.join(" • ")
        }
    };

    let status = Paragraph::new(line)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

fn controls_text(app: &App) -> String {
    match app.prompt {
        Prompt::None => {
            "[j/k] up/down | [enter] play | [space/p] play/pause | [h/l] prev/next | \
             [H/L] scrub | [a] add | [d] delete | [mouse] drag the ring to seek, \
             click the middle to pause | [q] quit"
                .to_string()
        }
        _ => "[enter] confirm | [esc] cancel".to_string(),
    }
}
