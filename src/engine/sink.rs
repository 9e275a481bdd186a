//! Utilities for creating `rodio` sinks from source files.
//!
//! The helper encapsulates opening/decoding a file and preparing a paused
//! `Sink` at the requested start position. Open and decode failures are
//! reported, not panicked on: an unreadable file is a per-track rejection,
//! never a crash.

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

/// Create a paused `Sink` for the file at `path`, starting at `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, Box<dyn Error + Send + Sync>> {
    let file = File::open(path)?;

    let source = Decoder::new(BufReader::new(file))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
