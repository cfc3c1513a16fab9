// SPDX-License-Identifier: MIT OR Apache-2.0
//! Test doubles for the timeline and view contracts.

use crate::controller::LabelSupport;
use crate::progress::ProgressStyles;
use crate::timeline::{TimelineAdapter, TimelineLabel};
use crate::view::PanelView;

/// Timeline whose state tests set directly and whose seeks are recorded
#[derive(Debug, Clone)]
pub struct FakeTimeline {
    pub time: f64,
    pub duration: f64,
    pub paused: bool,
    pub rate: f64,
    pub seeks: Vec<f64>,
    /// Ignore `play()`, to check the controller re-reads the paused flag
    pub refuse_play: bool,
    pub labels: Option<Vec<TimelineLabel>>,
}

impl FakeTimeline {
    pub fn new(time: f64, duration: f64) -> Self {
        Self {
            time,
            duration,
            paused: true,
            rate: 1.0,
            seeks: Vec::new(),
            refuse_play: false,
            labels: None,
        }
    }
}

impl TimelineAdapter for FakeTimeline {
    fn time(&self) -> f64 {
        self.time
    }

    fn total_duration(&self) -> f64 {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        if !self.refuse_play {
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn seek(&mut self, time: f64) {
        self.seeks.push(time);
        self.time = time;
    }

    fn set_timescale(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn labels(&self) -> Option<Vec<TimelineLabel>> {
        self.labels.clone()
    }
}

/// View that records every hook call
#[derive(Debug, Default)]
pub struct RecordingView {
    pub percentages: Vec<f64>,
    pub play_states: Vec<bool>,
    pub range: Option<(Option<f64>, Option<f64>, bool)>,
    pub times: Vec<f64>,
    pub timescales: Vec<f64>,
    pub labels: Option<LabelSupport>,
    pub redraws: usize,
}

impl PanelView for RecordingView {
    fn on_percentage_changed(&mut self, percentage: f64) {
        self.percentages.push(percentage);
    }

    fn on_play_state_changed(&mut self, is_playing: bool) {
        self.play_states.push(is_playing);
    }

    fn on_range_changed(&mut self, loop_in: Option<f64>, loop_out: Option<f64>, showing: bool) {
        self.range = Some((loop_in, loop_out, showing));
    }

    fn on_time_changed(&mut self, time: f64) {
        self.times.push(time);
    }

    fn on_timescale_changed(&mut self, timescale: f64) {
        self.timescales.push(timescale);
    }

    fn on_labels_changed(&mut self, labels: &LabelSupport) {
        self.labels = Some(labels.clone());
    }

    fn on_redraw(&mut self, _styles: &ProgressStyles) {
        self.redraws += 1;
    }
}
