use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::playlist::TrackDescriptor;

use super::thread::spawn_engine_thread;
use super::types::{EngineCmd, EngineEvent, ProgressHandle, ProgressInfo};

/// Front handle to the engine thread.
///
/// Commands go in over a channel; discrete events come back over another;
/// elapsed time is read through the shared progress handle.
pub struct AudioEngine {
    tx: Sender<EngineCmd>,
    events: mpsc::Receiver<EngineEvent>,
    progress: ProgressHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioEngine {
    /// Spawn the engine for the given descriptor list. Only playable
    /// descriptors are handed to the thread (for metadata probing); the
    /// rest can never reach it anyway.
    pub fn new(descriptors: &[TrackDescriptor]) -> Self {
        let sources: Vec<(usize, PathBuf)> = descriptors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.playable())
            .filter_map(|(i, d)| d.path.clone().map(|p| (i, p)))
            .collect();

        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let progress: ProgressHandle = Arc::new(Mutex::new(ProgressInfo::default()));

        let handle = spawn_engine_thread(sources, rx, event_tx, progress.clone());

        Self {
            tx,
            events: event_rx,
            progress,
            join: Mutex::new(Some(handle)),
        }
    }

    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    pub fn send(&self, cmd: EngineCmd) -> Result<(), mpsc::SendError<EngineCmd>> {
        self.tx.send(cmd)
    }

    /// Non-blocking event poll, drained once per UI frame.
    pub fn try_event(&self) -> Option<EngineEvent> {
        self.events.try_recv().ok()
    }

    /// Stop playback and join the engine thread.
    pub fn shutdown(&self) {
        let _ = self.send(EngineCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
