// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transport controller: playback commands and per-tick reconciliation.
//!
//! The controller owns the timeline, the [`ProgressTracker`], the active
//! timescale and the view. Keyboard and pointer input both end up in the
//! same public operations, usually through [`TransportController::execute`].
//!
//! A timeline reporting a non-positive duration or a non-finite time turns
//! every time-dependent operation into a logged no-op.

use crate::error::{Result, TransportError};
use crate::progress::{DragHandle, ProgressStyles, ProgressTracker};
use crate::shortcuts::{Command, JUMP_BIG, JUMP_NORMAL, JUMP_SMALL, RANGE_BIG, RANGE_NORMAL};
use crate::timeline::{TimelineAdapter, TimelineLabel};
use crate::timescale::TimescaleSet;
use crate::view::PanelView;

/// Seconds moved by one jump unit
pub const JUMP_UNIT: f64 = 0.1;

/// Seconds moved on each side by one range unit
pub const RANGE_UNIT: f64 = 0.1;

/// Whether the timeline can list its labels
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LabelSupport {
    /// The timeline has no label capability
    #[default]
    Unsupported,
    /// Labels reported by the timeline
    Available(Vec<TimelineLabel>),
}

impl LabelSupport {
    /// Look up a label by name
    pub fn find(&self, name: &str) -> Option<&TimelineLabel> {
        match self {
            LabelSupport::Unsupported => None,
            LabelSupport::Available(labels) => labels.iter().find(|l| l.name == name),
        }
    }
}

/// Consistent timeline readings for one operation
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    time: f64,
    duration: f64,
    paused: bool,
}

/// Round a time for display, to hundredths
pub fn display_time(time: f64) -> f64 {
    (time * 100.0).round() / 100.0
}

/// Playback controller for one panel
pub struct TransportController<T: TimelineAdapter, V: PanelView = ()> {
    timeline: T,
    view: V,
    progress: ProgressTracker,
    timescales: TimescaleSet,
    labels: LabelSupport,
}

impl<T: TimelineAdapter, V: PanelView> TransportController<T, V> {
    /// Create a controller with the default timescales
    pub fn new(timeline: T, view: V) -> Self {
        Self::with_timescales(timeline, view, TimescaleSet::default())
    }

    /// Create a controller offering the given timescales
    ///
    /// The first registered rate is applied to the timeline without
    /// changing its play state.
    pub fn with_timescales(mut timeline: T, mut view: V, timescales: TimescaleSet) -> Self {
        let labels = match timeline.labels() {
            Some(labels) => LabelSupport::Available(labels),
            None => {
                tracing::debug!("Timeline cannot list labels");
                LabelSupport::Unsupported
            }
        };
        view.on_labels_changed(&labels);
        view.on_timescale_changed(timescales.active());

        timeline.set_timescale(timescales.active());

        let progress = ProgressTracker::new(timeline.total_duration());
        let mut controller = Self {
            timeline,
            view,
            progress,
            timescales,
            labels,
        };
        controller.refresh_play_state();
        controller.update_styles();
        controller
    }

    /// The controlled timeline
    pub fn timeline(&self) -> &T {
        &self.timeline
    }

    /// Mutable access to the controlled timeline
    pub fn timeline_mut(&mut self) -> &mut T {
        &mut self.timeline
    }

    /// The view receiving state changes
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Progress and loop range state
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Registered timescales
    pub fn timescales(&self) -> &TimescaleSet {
        &self.timescales
    }

    /// Label availability
    pub fn labels(&self) -> &LabelSupport {
        &self.labels
    }

    /// Release the timeline and view
    pub fn into_parts(self) -> (T, V) {
        (self.timeline, self.view)
    }

    /// Read the timeline, rejecting states that would produce NaN
    fn snapshot(&self) -> Result<Snapshot> {
        let duration = self.timeline.total_duration();
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TransportError::AdapterUnavailable(format!(
                "duration is {duration}"
            )));
        }
        let time = self.timeline.time();
        if !time.is_finite() {
            return Err(TransportError::AdapterUnavailable(format!("time is {time}")));
        }
        Ok(Snapshot {
            time,
            duration,
            paused: self.timeline.is_paused(),
        })
    }

    /// Snapshot for a time-dependent operation, or `None` to skip it
    fn usable_snapshot(&mut self, operation: &str) -> Option<Snapshot> {
        match self.snapshot() {
            Ok(snapshot) => {
                self.progress.set_duration(snapshot.duration);
                Some(snapshot)
            }
            Err(e) => {
                tracing::debug!("Skipping {operation}: {e}");
                None
            }
        }
    }

    fn refresh_play_state(&mut self) {
        let is_playing = !self.timeline.is_paused();
        self.view.on_play_state_changed(is_playing);
    }

    /// Recompute progress bar styles and push them to the view
    pub fn update_styles(&mut self) -> ProgressStyles {
        self.progress.update_styles(&mut self.view)
    }

    /// Whether the timeline is playing
    pub fn is_playing(&self) -> bool {
        !self.timeline.is_paused()
    }

    /// Resume playback
    pub fn play(&mut self) {
        self.timeline.play();
        self.refresh_play_state();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.timeline.pause();
        self.refresh_play_state();
    }

    /// Pause if playing, play otherwise
    pub fn toggle_play(&mut self) {
        if self.timeline.is_paused() {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Seek to the loop-in point, or the timeline start without a range
    pub fn goto_start(&mut self) {
        if self.usable_snapshot("goto start").is_none() {
            return;
        }
        let target = self.progress.active_range().map_or(0.0, |(start, _)| start);
        self.timeline.seek(target);
    }

    /// Restart button: same as [`goto_start`](Self::goto_start)
    pub fn restart(&mut self) {
        self.goto_start();
    }

    /// Seek to the loop-out point, or the timeline end without a range
    pub fn goto_end(&mut self) {
        let Some(snapshot) = self.usable_snapshot("goto end") else {
            return;
        };
        let target = self
            .progress
            .active_range()
            .map_or(snapshot.duration, |(_, end)| end);
        self.timeline.seek(target);
    }

    /// Activate a registered timescale and resume playback at that rate
    pub fn set_timescale(&mut self, multiplier: f64) -> Result<()> {
        let rate = self.timescales.select(multiplier)?;
        self.view.on_timescale_changed(rate);
        self.timeline.set_timescale(rate);
        self.timeline.play();
        self.refresh_play_state();
        tracing::debug!("Timescale set to {rate}");
        Ok(())
    }

    /// Activate the timescale at `index` in the registered list
    pub fn set_timescale_index(&mut self, index: usize) -> Result<()> {
        let Some(rate) = self.timescales.options().get(index).copied() else {
            return Err(TransportError::invalid("timescale index", index as f64));
        };
        self.set_timescale(rate)
    }

    /// Pause and move forward by `units` jump units
    pub fn jump_forward(&mut self, units: f64) -> Result<()> {
        self.jump(1.0, units)
    }

    /// Pause and move backward by `units` jump units
    pub fn jump_backward(&mut self, units: f64) -> Result<()> {
        self.jump(-1.0, units)
    }

    fn jump(&mut self, direction: f64, units: f64) -> Result<()> {
        if !units.is_finite() {
            return Err(TransportError::invalid("jump units", units));
        }
        let Some(snapshot) = self.usable_snapshot("jump") else {
            return Ok(());
        };
        let target = (snapshot.time + JUMP_UNIT * units * direction).clamp(0.0, snapshot.duration);
        self.pause();
        self.timeline.seek(target);
        Ok(())
    }

    /// Per-tick reconciliation
    ///
    /// Call once per timeline update. Never fails: a timeline in an
    /// unusable state is logged and the tick skipped.
    pub fn tick(&mut self) {
        if let Err(e) = self.reconcile() {
            tracing::warn!("Skipping timeline update: {e}");
        }
    }

    fn reconcile(&mut self) -> Result<()> {
        let snapshot = self.snapshot()?;
        self.view.on_time_changed(display_time(snapshot.time));
        self.progress.set_duration(snapshot.duration);

        if !self.progress.is_dragging() && !snapshot.paused {
            let range = self.progress.active_range();
            let past_range_out = range.is_some_and(|(_, end)| snapshot.time >= end);
            let past_end = snapshot.time >= snapshot.duration;
            if past_range_out || past_end {
                let target = range.map_or(0.0, |(start, _)| start);
                tracing::trace!("Looping from {} to {target}", snapshot.time);
                self.timeline.seek(target);
            }
        }

        let time = self.timeline.time();
        let percentage = self.progress.percentage_at(time);
        self.progress.set_percentage(percentage)?;
        self.view.on_percentage_changed(percentage);
        Ok(())
    }

    /// Put the loop-in boundary at the current time
    pub fn set_range_start(&mut self) -> Result<()> {
        let Some(snapshot) = self.usable_snapshot("set range start") else {
            return Ok(());
        };
        self.progress.set_loop_in(snapshot.time.clamp(0.0, snapshot.duration))?;
        self.update_styles();
        Ok(())
    }

    /// Put the loop-out boundary at the current time
    pub fn set_range_end(&mut self) -> Result<()> {
        let Some(snapshot) = self.usable_snapshot("set range end") else {
            return Ok(());
        };
        self.progress.set_loop_out(snapshot.time.clamp(0.0, snapshot.duration))?;
        self.update_styles();
        Ok(())
    }

    /// Set the loop-in boundary
    pub fn set_loop_in(&mut self, time: f64) -> Result<()> {
        if self.usable_snapshot("set loop in").is_none() {
            return Ok(());
        }
        self.progress.set_loop_in(time)?;
        self.update_styles();
        Ok(())
    }

    /// Set the loop-out boundary
    pub fn set_loop_out(&mut self, time: f64) -> Result<()> {
        if self.usable_snapshot("set loop out").is_none() {
            return Ok(());
        }
        self.progress.set_loop_out(time)?;
        self.update_styles();
        Ok(())
    }

    /// Set both loop boundaries
    pub fn set_range(&mut self, loop_in: f64, loop_out: f64) -> Result<()> {
        if self.usable_snapshot("set range").is_none() {
            return Ok(());
        }
        self.progress.set_range(loop_in, loop_out)?;
        self.update_styles();
        Ok(())
    }

    /// Show or hide the loop range
    pub fn toggle_range(&mut self) {
        self.progress.toggle_range();
        self.update_styles();
    }

    /// Remove the loop range
    pub fn clear_range(&mut self) {
        self.progress.clear_range();
        self.update_styles();
    }

    /// Widen the loop range by `units` range units on each side
    pub fn expand_range(&mut self, units: f64) -> Result<()> {
        if self.usable_snapshot("expand range").is_none() {
            return Ok(());
        }
        self.progress.expand_range(units * RANGE_UNIT)?;
        self.update_styles();
        Ok(())
    }

    /// Narrow the loop range by `units` range units on each side
    pub fn contract_range(&mut self, units: f64) -> Result<()> {
        if self.usable_snapshot("contract range").is_none() {
            return Ok(());
        }
        self.progress.contract_range(units * RANGE_UNIT)?;
        self.update_styles();
        Ok(())
    }

    /// Start dragging part of the progress bar
    ///
    /// Loop wrapping is suspended until [`end_drag`](Self::end_drag).
    pub fn begin_drag(&mut self, handle: DragHandle) {
        self.progress.begin_drag(handle);
    }

    /// Move the dragged handle to `percentage`
    ///
    /// The playhead seeks the timeline; loop handles move their boundary.
    /// Does nothing when no drag is in progress.
    pub fn drag_to(&mut self, percentage: f64) -> Result<()> {
        let Some(handle) = self.progress.drag_handle() else {
            return Ok(());
        };
        if !percentage.is_finite() {
            return Err(TransportError::invalid("drag position", percentage));
        }
        if self.usable_snapshot("drag").is_none() {
            return Ok(());
        }

        let percentage = percentage.clamp(0.0, 100.0);
        let time = self.progress.time_at(percentage);
        match handle {
            DragHandle::Playhead => {
                self.progress.set_percentage(percentage)?;
                self.timeline.seek(time);
                self.view.on_percentage_changed(percentage);
            }
            DragHandle::LoopIn => self.progress.set_loop_in(time)?,
            DragHandle::LoopOut => self.progress.set_loop_out(time)?,
        }
        self.update_styles();
        Ok(())
    }

    /// Finish the current drag gesture
    pub fn end_drag(&mut self) {
        self.progress.end_drag();
    }

    /// Seek to a named label and play
    pub fn goto_label(&mut self, name: &str) -> Result<()> {
        let time = self
            .labels
            .find(name)
            .map(|l| l.time)
            .ok_or_else(|| TransportError::UnknownLabel(name.to_string()))?;
        self.timeline.seek(time);
        self.play();
        Ok(())
    }

    /// Run a named command
    pub fn execute(&mut self, command: Command) -> Result<()> {
        tracing::debug!("Executing {command}");
        match command {
            Command::TogglePlay => self.toggle_play(),
            Command::SetRangeStart => self.set_range_start()?,
            Command::SetRangeEnd => self.set_range_end()?,
            Command::ToggleRange => self.toggle_range(),
            Command::ClearRange => self.clear_range(),
            Command::JumpForward => self.jump_forward(JUMP_NORMAL)?,
            Command::JumpBackward => self.jump_backward(JUMP_NORMAL)?,
            Command::JumpForwardBig => self.jump_forward(JUMP_BIG)?,
            Command::JumpBackwardBig => self.jump_backward(JUMP_BIG)?,
            Command::JumpForwardSmall => self.jump_forward(JUMP_SMALL)?,
            Command::JumpBackwardSmall => self.jump_backward(JUMP_SMALL)?,
            Command::JumpToStart => self.goto_start(),
            Command::ExpandRange => self.expand_range(RANGE_NORMAL)?,
            Command::ContractRange => self.contract_range(RANGE_NORMAL)?,
            Command::ExpandRangeBig => self.expand_range(RANGE_BIG)?,
            Command::ContractRangeBig => self.contract_range(RANGE_BIG)?,
            Command::SetTimescale(idx) => self.set_timescale_index(idx)?,
        }
        Ok(())
    }
}
