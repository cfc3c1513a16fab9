// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline contract consumed by the transport, and an in-memory timeline.
//!
//! The transport never advances time itself. A host owns the animation
//! engine, wires its per-update signal to [`TransportController::tick`] and
//! the controller re-reads everything it needs through [`TimelineAdapter`].
//!
//! [`TransportController::tick`]: crate::TransportController::tick

use serde::{Deserialize, Serialize};

/// A named position on a timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLabel {
    /// Label name
    pub name: String,
    /// Absolute time of the label
    pub time: f64,
}

impl TimelineLabel {
    /// Create a label
    pub fn new(name: impl Into<String>, time: f64) -> Self {
        Self {
            name: name.into(),
            time,
        }
    }
}

/// Animation engine driven by the transport
pub trait TimelineAdapter {
    /// Current playhead time
    fn time(&self) -> f64;

    /// Total duration of the timeline
    fn total_duration(&self) -> f64;

    /// Whether playback is paused
    fn is_paused(&self) -> bool;

    /// Resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Move the playhead to an absolute time
    fn seek(&mut self, time: f64);

    /// Set the playback rate multiplier
    fn set_timescale(&mut self, rate: f64);

    /// Labels defined on the timeline, or `None` if the engine cannot list them
    fn labels(&self) -> Option<Vec<TimelineLabel>> {
        None
    }
}

/// Playback state of a [`SequenceTimeline`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Advancing with time
    Playing,
    /// Holding the current time
    #[default]
    Paused,
}

/// Self-contained timeline that advances by explicit time deltas
#[derive(Debug, Clone)]
pub struct SequenceTimeline {
    time: f64,
    duration: f64,
    state: PlaybackState,
    speed: f64,
    labels: Vec<TimelineLabel>,
}

impl SequenceTimeline {
    /// Create a paused timeline of the given duration
    pub fn new(duration: f64) -> Self {
        Self {
            time: 0.0,
            duration,
            state: PlaybackState::Paused,
            speed: 1.0,
            labels: Vec::new(),
        }
    }

    /// Add a label
    pub fn with_label(mut self, name: impl Into<String>, time: f64) -> Self {
        self.add_label(name, time);
        self
    }

    /// Add a label, keeping labels ordered by time
    pub fn add_label(&mut self, name: impl Into<String>, time: f64) {
        let label = TimelineLabel::new(name, time.clamp(0.0, self.duration.max(0.0)));
        let idx = self.labels.partition_point(|l| l.time <= label.time);
        self.labels.insert(idx, label);
    }

    /// Advance playback by `delta` seconds of wall time
    ///
    /// Time stops at either end of the timeline; looping is left to the
    /// transport.
    pub fn advance(&mut self, delta: f64) {
        if self.state == PlaybackState::Playing {
            self.time = (self.time + delta * self.speed).clamp(0.0, self.duration.max(0.0));
        }
    }

    /// Playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Playback speed multiplier
    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl TimelineAdapter for SequenceTimeline {
    fn time(&self) -> f64 {
        self.time
    }

    fn total_duration(&self) -> f64 {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    fn seek(&mut self, time: f64) {
        self.time = time.clamp(0.0, self.duration.max(0.0));
    }

    fn set_timescale(&mut self, rate: f64) {
        self.speed = rate;
    }

    fn labels(&self) -> Option<Vec<TimelineLabel>> {
        Some(self.labels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_only_while_playing() {
        let mut timeline = SequenceTimeline::new(10.0);
        timeline.advance(1.0);
        assert_eq!(timeline.time(), 0.0);

        timeline.play();
        timeline.advance(1.5);
        assert_eq!(timeline.time(), 1.5);

        timeline.set_timescale(0.5);
        timeline.advance(1.0);
        assert_eq!(timeline.time(), 2.0);
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut timeline = SequenceTimeline::new(2.0);
        timeline.play();
        timeline.advance(5.0);
        assert_eq!(timeline.time(), 2.0);
        assert!(!timeline.is_paused());
    }

    #[test]
    fn test_labels_sorted_by_time() {
        let timeline = SequenceTimeline::new(10.0)
            .with_label("outro", 8.0)
            .with_label("intro", 1.0)
            .with_label("middle", 5.0);

        let names: Vec<_> = timeline
            .labels()
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["intro", "middle", "outro"]);
    }
}
