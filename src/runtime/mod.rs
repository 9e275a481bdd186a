use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::engine::AudioEngine;
use crate::player::PlaylistController;
use crate::playlist::{self, TrackDescriptor};

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn Error>> {
    let settings = settings::load_settings();

    let descriptors = load_descriptors(&settings)?;
    if descriptors.is_empty() {
        log::warn!("no tracks to show");
    }

    let engine = AudioEngine::new(&descriptors);
    let mut controller = PlaylistController::new(descriptors, settings.playback.auto_advance);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut controller, &engine);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    engine.shutdown();

    run_result
}

/// Pick the descriptor source: a `.toml` argument is a manifest, any other
/// argument is a directory to scan. With no argument the configured
/// manifest wins, then a scan of the current directory.
fn load_descriptors(
    settings: &crate::config::Settings,
) -> Result<Vec<TrackDescriptor>, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(arg) if arg.ends_with(".toml") => playlist::load_manifest(Path::new(&arg)),
        Some(arg) => Ok(playlist::scan(Path::new(&arg), &settings.playlist)),
        None => {
            if let Some(manifest) = &settings.playlist.manifest {
                playlist::load_manifest(manifest)
            } else {
                let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                Ok(playlist::scan(&cwd, &settings.playlist))
            }
        }
    }
}
