//! Per-track player state machine.
//!
//! A `TrackPlayer` owns everything one row displays: play/pause state,
//! position, duration (unknown until metadata arrives), the progress
//! fraction and the time label. It performs no I/O; the controller turns
//! its transitions into engine requests and feeds engine events back in.

use std::time::Duration;

use crate::playlist::TrackDescriptor;

use super::time::format_duration;

/// Lifecycle state of one track row.
///
/// `Disabled` and `Errored` are terminal: no transition leaves them for
/// the life of the player.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrackState {
    Idle,
    Playing,
    Paused,
    /// Playback ran to completion; cleared to `Idle` by the controller.
    Ended,
    /// The source died after having been playable.
    Errored,
    /// The descriptor had no usable source at construction.
    Disabled,
}

pub struct TrackPlayer {
    descriptor: TrackDescriptor,
    state: TrackState,
    position: Duration,
    /// Unknown until the engine probes metadata.
    duration: Option<Duration>,
    /// Progress bar fill, 0.0..=1.0.
    progress: f64,
    /// Text shown in the row's time slot.
    time_label: String,
    /// Set between a play request and the engine's Started/Rejected reply.
    pending_play: bool,
}

impl TrackPlayer {
    /// Build a player for `descriptor`. Unplayable descriptors start (and
    /// stay) `Disabled`.
    pub fn new(descriptor: TrackDescriptor) -> Self {
        let state = if descriptor.playable() {
            TrackState::Idle
        } else {
            TrackState::Disabled
        };
        let time_label = descriptor.display_duration.clone();
        Self {
            descriptor,
            state,
            position: Duration::ZERO,
            duration: None,
            progress: 0.0,
            time_label,
            pending_play: false,
        }
    }

    pub fn descriptor(&self) -> &TrackDescriptor {
        &self.descriptor
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn time_label(&self) -> &str {
        &self.time_label
    }

    pub fn pending_play(&self) -> bool {
        self.pending_play
    }

    /// Whether a toggle may ever start this track.
    pub fn can_play(&self) -> bool {
        !matches!(self.state, TrackState::Disabled | TrackState::Errored)
    }

    /// Optimistically enter `Playing` and flag the in-flight request.
    ///
    /// The icon flips with the *intended* state; `reject_play` undoes it
    /// if the engine later refuses.
    pub(super) fn begin_play(&mut self) {
        debug_assert!(self.can_play());
        self.state = TrackState::Playing;
        self.pending_play = true;
    }

    /// The engine confirmed the play request.
    pub(super) fn confirm_play(&mut self) {
        self.pending_play = false;
    }

    /// The engine refused the play request: revert the optimistic state.
    ///
    /// A pause that landed during the in-flight window already moved the
    /// state off `Playing`; in that case there is nothing to undo.
    pub(super) fn reject_play(&mut self) {
        self.pending_play = false;
        if self.state == TrackState::Playing {
            self.state = if self.position > Duration::ZERO {
                TrackState::Paused
            } else {
                TrackState::Idle
            };
        }
    }

    /// Pause if playing. Idempotent on every other state.
    pub(super) fn pause(&mut self) {
        if self.state == TrackState::Playing {
            self.state = TrackState::Paused;
        }
    }

    /// Exclusivity takeover: stop, rewind to zero and show the resting
    /// label again.
    pub(super) fn halt(&mut self) {
        self.pending_play = false;
        self.position = Duration::ZERO;
        self.progress = 0.0;
        self.time_label = self.resting_label();
        if matches!(
            self.state,
            TrackState::Playing | TrackState::Paused | TrackState::Ended
        ) {
            self.state = TrackState::Idle;
        }
    }

    /// Rewind without touching state; used by the forced-play path.
    pub(super) fn rewind(&mut self) {
        self.position = Duration::ZERO;
        self.progress = 0.0;
    }

    /// Map a fractional bar position to a concrete seek target.
    ///
    /// No-op (returns `None`) while the duration is unknown or the player
    /// is disabled. Never changes `state`.
    pub(super) fn seek_fraction(&mut self, fraction: f64) -> Option<Duration> {
        if self.state == TrackState::Disabled {
            return None;
        }
        let duration = self.duration?;
        if duration.is_zero() || !fraction.is_finite() {
            return None;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let target = duration.mul_f64(fraction);
        self.apply_progress(target, duration);
        Some(target)
    }

    /// Metadata arrived: record the real duration and, when the track is
    /// not playing, replace the fallback text with the formatted total.
    pub(super) fn on_metadata(&mut self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        self.duration = Some(duration);
        if self.state != TrackState::Playing {
            self.time_label = format_duration(duration);
        }
    }

    /// High-frequency progress sample from the engine. Stale samples are
    /// simply overwritten by the next one.
    pub(super) fn on_time_advance(&mut self, position: Duration) {
        let Some(duration) = self.duration else {
            self.position = position;
            return;
        };
        if duration.is_zero() {
            return;
        }
        self.apply_progress(position.min(duration), duration);
    }

    /// Playback ran to completion: rewind, restore the original fallback
    /// label, and park in `Ended` until the controller rearms the row.
    pub(super) fn on_ended(&mut self) {
        if !self.can_play() {
            return;
        }
        self.pending_play = false;
        self.position = Duration::ZERO;
        self.progress = 0.0;
        self.time_label = self.descriptor.display_duration.clone();
        self.state = TrackState::Ended;
    }

    /// Clear the transient `Ended` state back to `Idle`.
    pub(super) fn rearm(&mut self) {
        if self.state == TrackState::Ended {
            self.state = TrackState::Idle;
        }
    }

    /// The media source failed after construction: permanently inert.
    pub(super) fn on_error(&mut self) {
        self.pending_play = false;
        if self.state != TrackState::Disabled {
            self.state = TrackState::Errored;
        }
    }

    fn apply_progress(&mut self, position: Duration, duration: Duration) {
        self.position = position;
        self.progress = (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0);
        let remaining = duration.saturating_sub(position);
        self.time_label = format!("-{}", format_duration(remaining));
    }

    /// Label shown when nothing is advancing: the real total once known,
    /// the manifest fallback before that.
    fn resting_label(&self) -> String {
        match self.duration {
            Some(d) => format_duration(d),
            None => self.descriptor.display_duration.clone(),
        }
    }
}
