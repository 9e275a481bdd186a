use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Settings;
use crate::engine::{AudioEngine, EngineCmd};
use crate::player::{PlaybackRequest, PlaylistController};
use crate::ui;

fn to_cmd(req: PlaybackRequest) -> EngineCmd {
    match req {
        PlaybackRequest::Play { index, path, from } => EngineCmd::Play { index, path, from },
        PlaybackRequest::Pause { index } => EngineCmd::Pause { index },
        PlaybackRequest::Seek { index, to } => EngineCmd::Seek { index, to },
    }
}

/// Main terminal event loop: handles input, UI drawing and the exchange
/// with the engine thread. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &Settings,
    controller: &mut PlaylistController,
    engine: &AudioEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut selected: usize = 0;
    let progress = engine.progress_handle();

    loop {
        // Drain discrete engine events. Auto-advance may answer an Ended
        // event with a fresh play request.
        while let Some(event) = engine.try_event() {
            if let Some(req) = controller.handle_event(event) {
                let _ = engine.send(to_cmd(req));
            }
        }

        // Sample elapsed time for the current track. Fire-and-forget: a
        // stale sample is simply overwritten by the next frame's.
        let snapshot = progress.lock().ok().map(|info| info.clone());
        if let Some(info) = snapshot {
            if let (Some(index), true) = (info.index, info.playing) {
                controller.on_progress(index, info.elapsed);
            }
        }

        terminal.draw(|f| ui::draw(f, controller, selected, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('j') | KeyCode::Down => {
                        if !controller.is_empty() {
                            selected = (selected + 1) % controller.len();
                        }
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        if !controller.is_empty() {
                            selected = (selected + controller.len() - 1) % controller.len();
                        }
                    }
                    KeyCode::Char('g') => {
                        selected = 0;
                    }
                    KeyCode::Char('G') => {
                        if !controller.is_empty() {
                            selected = controller.len() - 1;
                        }
                    }
                    KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('p') => {
                        if let Some(req) = controller.toggle(selected) {
                            let _ = engine.send(to_cmd(req));
                        }
                    }
                    KeyCode::Char('h') | KeyCode::Left => {
                        seek_by(
                            controller,
                            engine,
                            selected,
                            -(settings.controls.seek_seconds as f64),
                        );
                    }
                    KeyCode::Char('l') | KeyCode::Right => {
                        seek_by(
                            controller,
                            engine,
                            selected,
                            settings.controls.seek_seconds as f64,
                        );
                    }
                    KeyCode::Char('a') => {
                        controller.toggle_auto_advance();
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Keyboard seek: translate a step in seconds into the fractional seek API.
/// Seeking a row with an unknown duration is a no-op.
fn seek_by(
    controller: &mut PlaylistController,
    engine: &AudioEngine,
    index: usize,
    delta_secs: f64,
) {
    let Some(player) = controller.player(index) else {
        return;
    };
    let Some(duration) = player.duration() else {
        return;
    };
    if duration.is_zero() {
        return;
    }
    let total = duration.as_secs_f64();
    let target = (player.position().as_secs_f64() + delta_secs).clamp(0.0, total);
    if let Some(req) = controller.seek(index, target / total) {
        let _ = engine.send(to_cmd(req));
    }
}
