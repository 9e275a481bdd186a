mod config;
mod engine;
mod player;
mod playlist;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The TUI owns the screen while running, so keep the logger quiet by
    // default; anything it prints lands on the normal screen after exit.
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Warn);
    clog.init();

    runtime::run()
}
