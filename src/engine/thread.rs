use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use lofty::file::AudioFile;
use rodio::{OutputStreamBuilder, Sink};

use super::sink::create_sink_at;
use super::types::{EngineCmd, EngineEvent, ProgressHandle};

/// A sink that empties this far short of the probed duration did not end,
/// it died (rodio surfaces mid-stream decode failures by running out of
/// samples early).
const EARLY_END_SLACK: Duration = Duration::from_secs(2);

fn publish(progress: &ProgressHandle, index: Option<usize>, elapsed: Duration, playing: bool) {
    if let Ok(mut info) = progress.lock() {
        info.index = index;
        info.elapsed = elapsed;
        info.playing = playing;
    }
}

pub(super) fn spawn_engine_thread(
    sources: Vec<(usize, PathBuf)>,
    rx: Receiver<EngineCmd>,
    events: Sender<EngineEvent>,
    progress: ProgressHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in
                // debugging, but noisy for a TUI app.
                s.log_on_drop(false);
                Some(s)
            }
            Err(e) => {
                // Degraded mode: every play request gets rejected, but the
                // UI stays up and the rows stay retryable.
                log::error!("audio output unavailable: {e}");
                None
            }
        };

        // Probe durations up front, the moral equivalent of preloading
        // metadata. A probe miss is not an error; the row simply keeps its
        // fallback duration text until (if ever) it plays.
        let mut durations: HashMap<usize, Duration> = HashMap::new();
        for (index, path) in &sources {
            match lofty::read_from_path(path) {
                Ok(tagged) => {
                    let duration = tagged.properties().duration();
                    if !duration.is_zero() {
                        durations.insert(*index, duration);
                        let _ = events.send(EngineEvent::Metadata {
                            index: *index,
                            duration,
                        });
                    }
                }
                Err(e) => {
                    log::debug!("metadata probe failed for {}: {e}", path.display());
                }
            }
        }

        // At most one track plays at a time, so one sink is all the state
        // the engine ever holds.
        let mut current: Option<(usize, PathBuf)> = None;
        let mut sink: Option<Sink> = None;
        let mut paused = false;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        loop {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(EngineCmd::Play { index, path, from }) => {
                    let resident = current.as_ref().map(|(i, _)| *i) == Some(index);
                    if resident && sink.is_some() && paused {
                        // Same track, still loaded: resume in place.
                        if let Some(ref s) = sink {
                            s.play();
                        }
                        paused = false;
                        started_at = Some(Instant::now());
                        let _ = events.send(EngineEvent::Started { index });
                        publish(&progress, Some(index), accumulated, true);
                        continue;
                    }

                    if let Some(s) = sink.take() {
                        s.stop();
                    }

                    let Some(ref out) = stream else {
                        current = None;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        publish(&progress, None, Duration::ZERO, false);
                        let _ = events.send(EngineEvent::Rejected {
                            index,
                            reason: "no audio output device".to_string(),
                        });
                        continue;
                    };

                    match create_sink_at(out, &path, from) {
                        Ok(s) => {
                            s.play();
                            sink = Some(s);
                            current = Some((index, path));
                            paused = false;
                            started_at = Some(Instant::now());
                            accumulated = from;
                            let _ = events.send(EngineEvent::Started { index });
                            publish(&progress, Some(index), from, true);
                        }
                        Err(e) => {
                            current = None;
                            started_at = None;
                            accumulated = Duration::ZERO;
                            publish(&progress, None, Duration::ZERO, false);
                            let _ = events.send(EngineEvent::Rejected {
                                index,
                                reason: e.to_string(),
                            });
                        }
                    }
                }

                Ok(EngineCmd::Pause { index }) => {
                    if current.as_ref().map(|(i, _)| *i) == Some(index) && !paused {
                        if let Some(ref s) = sink {
                            s.pause();
                        }
                        if let Some(st) = started_at.take() {
                            accumulated += st.elapsed();
                        }
                        paused = true;
                        publish(&progress, Some(index), accumulated, false);
                    }
                }

                Ok(EngineCmd::Seek { index, to }) => {
                    // Scrubbing: rebuild the sink and skip into the file.
                    // Only meaningful for the track the engine holds.
                    let Some((i, path)) = current.clone() else {
                        continue;
                    };
                    if i != index || sink.is_none() {
                        continue;
                    }
                    let Some(ref out) = stream else {
                        continue;
                    };

                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    match create_sink_at(out, &path, to) {
                        Ok(s) => {
                            if paused {
                                started_at = None;
                            } else {
                                s.play();
                                started_at = Some(Instant::now());
                            }
                            sink = Some(s);
                            accumulated = to;
                            publish(&progress, Some(i), to, !paused);
                        }
                        Err(e) => {
                            // The file was playable and now is not.
                            current = None;
                            started_at = None;
                            accumulated = Duration::ZERO;
                            publish(&progress, None, Duration::ZERO, false);
                            let _ = events.send(EngineEvent::Failed {
                                index,
                                reason: e.to_string(),
                            });
                        }
                    }
                }

                Ok(EngineCmd::Quit) => {
                    if let Some(ref s) = sink {
                        s.stop();
                    }
                    publish(&progress, None, Duration::ZERO, false);
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {
                    let Some((index, _)) = current else {
                        continue;
                    };
                    let Some(ref s) = sink else {
                        continue;
                    };

                    let elapsed =
                        accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                    if !paused {
                        publish(&progress, Some(index), elapsed, true);
                    }

                    if !paused && s.empty() {
                        let outcome = match durations.get(&index) {
                            Some(d) if elapsed + EARLY_END_SLACK < *d => EngineEvent::Failed {
                                index,
                                reason: format!(
                                    "source ended after {}s of an expected {}s",
                                    elapsed.as_secs(),
                                    d.as_secs()
                                ),
                            },
                            _ => EngineEvent::Ended { index },
                        };
                        sink = None;
                        current = None;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        publish(&progress, None, Duration::ZERO, false);
                        let _ = events.send(outcome);
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
