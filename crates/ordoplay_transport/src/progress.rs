// SPDX-License-Identifier: MIT OR Apache-2.0
//! Progress indicator state: playhead percentage, loop range and drag state.
//!
//! Loop boundaries are absolute timeline times. Setting one boundary past
//! the other drags the other boundary along, so `loop_in <= loop_out` holds
//! after every call. Setting both at once through [`ProgressTracker::set_range`]
//! rejects an inverted pair instead.

use crate::error::{Result, TransportError};
use crate::view::PanelView;

/// Which part of the progress bar a drag gesture holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragHandle {
    /// The playhead
    Playhead,
    /// The loop-in handle
    LoopIn,
    /// The loop-out handle
    LoopOut,
}

/// Highlighted loop band, in percent of the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBand {
    /// Left edge
    pub start: f64,
    /// Right edge
    pub end: f64,
    /// Band width (`end - start`)
    pub width: f64,
}

/// Presentation values derived from tracker state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressStyles {
    /// Playhead position
    pub playhead: f64,
    /// Loop band, when both boundaries are set
    pub band: Option<RangeBand>,
    /// Whether the band is shown
    pub showing_range: bool,
}

/// Playhead and loop range tracker for one panel
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    percentage: f64,
    loop_in: Option<f64>,
    loop_out: Option<f64>,
    showing_range: bool,
    drag: Option<DragHandle>,
    duration: f64,
}

impl ProgressTracker {
    /// Create a tracker for a timeline of the given duration
    pub fn new(duration: f64) -> Self {
        Self {
            percentage: 0.0,
            loop_in: None,
            loop_out: None,
            showing_range: false,
            drag: None,
            duration: if duration.is_finite() && duration > 0.0 { duration } else { 0.0 },
        }
    }

    /// Timeline duration used for clamping
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Update the timeline duration
    ///
    /// Ignored unless finite and positive. An existing range is clamped into
    /// the new bounds.
    pub fn set_duration(&mut self, duration: f64) {
        if !duration.is_finite() || duration <= 0.0 || duration == self.duration {
            return;
        }
        self.duration = duration;
        self.loop_in = self.loop_in.map(|t| t.min(duration));
        self.loop_out = self.loop_out.map(|t| t.min(duration));
    }

    /// Current playhead percentage
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Set the displayed playhead percentage
    ///
    /// Has no effect on the timeline.
    pub fn set_percentage(&mut self, percentage: f64) -> Result<()> {
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(TransportError::invalid("percentage", percentage));
        }
        self.percentage = percentage;
        Ok(())
    }

    /// Loop-in time, if set
    pub fn loop_in(&self) -> Option<f64> {
        self.loop_in
    }

    /// Loop-out time, if set
    pub fn loop_out(&self) -> Option<f64> {
        self.loop_out
    }

    /// Whether the loop range is active
    pub fn is_showing_range(&self) -> bool {
        self.showing_range
    }

    /// Active loop range as `(in, out)`
    pub fn active_range(&self) -> Option<(f64, f64)> {
        if !self.showing_range {
            return None;
        }
        self.loop_in.zip(self.loop_out)
    }

    fn validate_time(&self, what: &'static str, time: f64) -> Result<f64> {
        if !time.is_finite() || time < 0.0 || time > self.duration {
            return Err(TransportError::invalid(what, time));
        }
        Ok(time)
    }

    fn refresh_showing(&mut self) {
        if self.loop_in.is_some() && self.loop_out.is_some() {
            self.showing_range = true;
        }
    }

    /// Set the loop-in boundary
    pub fn set_loop_in(&mut self, time: f64) -> Result<()> {
        let time = self.validate_time("loop in", time)?;
        if let Some(out) = self.loop_out {
            if time > out {
                self.loop_out = Some(time);
            }
        }
        self.loop_in = Some(time);
        self.refresh_showing();
        tracing::debug!("Loop in set to {time}");
        Ok(())
    }

    /// Set the loop-out boundary
    pub fn set_loop_out(&mut self, time: f64) -> Result<()> {
        let time = self.validate_time("loop out", time)?;
        if let Some(start) = self.loop_in {
            if time < start {
                self.loop_in = Some(time);
            }
        }
        self.loop_out = Some(time);
        self.refresh_showing();
        tracing::debug!("Loop out set to {time}");
        Ok(())
    }

    /// Set both loop boundaries
    pub fn set_range(&mut self, loop_in: f64, loop_out: f64) -> Result<()> {
        let loop_in = self.validate_time("loop in", loop_in)?;
        let loop_out = self.validate_time("loop out", loop_out)?;
        if loop_in > loop_out {
            return Err(TransportError::InvalidRange { loop_in, loop_out });
        }
        self.loop_in = Some(loop_in);
        self.loop_out = Some(loop_out);
        self.showing_range = true;
        Ok(())
    }

    /// Show or hide the loop range
    ///
    /// Does nothing unless both boundaries are set.
    pub fn toggle_range(&mut self) {
        if self.loop_in.is_some() && self.loop_out.is_some() {
            self.showing_range = !self.showing_range;
        }
    }

    /// Remove both boundaries
    pub fn clear_range(&mut self) {
        self.loop_in = None;
        self.loop_out = None;
        self.showing_range = false;
    }

    /// Widen the loop range by `amount` on both sides
    pub fn expand_range(&mut self, amount: f64) -> Result<()> {
        self.adjust_range("expand amount", amount, 1.0)
    }

    /// Narrow the loop range by `amount` on both sides
    ///
    /// Boundaries that would cross meet at their midpoint.
    pub fn contract_range(&mut self, amount: f64) -> Result<()> {
        self.adjust_range("contract amount", amount, -1.0)
    }

    fn adjust_range(&mut self, what: &'static str, amount: f64, direction: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(TransportError::invalid(what, amount));
        }
        let (Some(start), Some(end)) = (self.loop_in, self.loop_out) else {
            return Ok(());
        };

        let mut new_start = (start - amount * direction).clamp(0.0, self.duration);
        let mut new_end = (end + amount * direction).clamp(0.0, self.duration);
        if new_start > new_end {
            let mid = (start + end) / 2.0;
            new_start = mid;
            new_end = mid;
        }

        self.loop_in = Some(new_start);
        self.loop_out = Some(new_end);
        Ok(())
    }

    /// Start a drag gesture
    pub fn begin_drag(&mut self, handle: DragHandle) {
        self.drag = Some(handle);
    }

    /// Finish the current drag gesture
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Whether a drag gesture is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Handle held by the current drag gesture
    pub fn drag_handle(&self) -> Option<DragHandle> {
        self.drag
    }

    /// Percentage of the timeline at `time` (0 for an empty timeline)
    pub fn percentage_at(&self, time: f64) -> f64 {
        if self.duration <= 0.0 || !time.is_finite() {
            return 0.0;
        }
        (time * 100.0 / self.duration).clamp(0.0, 100.0)
    }

    /// Timeline time at `percentage`
    pub fn time_at(&self, percentage: f64) -> f64 {
        if !percentage.is_finite() {
            return 0.0;
        }
        percentage.clamp(0.0, 100.0) * self.duration / 100.0
    }

    /// Derived presentation values for the current state
    pub fn styles(&self) -> ProgressStyles {
        let band = self.loop_in.zip(self.loop_out).map(|(start, end)| {
            let start = self.percentage_at(start);
            let end = self.percentage_at(end);
            RangeBand {
                start,
                end,
                width: end - start,
            }
        });

        ProgressStyles {
            playhead: self.percentage,
            band,
            showing_range: self.showing_range,
        }
    }

    /// Recompute derived values and ask the view to redraw them
    pub fn update_styles(&self, view: &mut dyn PanelView) -> ProgressStyles {
        let styles = self.styles();
        view.on_range_changed(self.loop_in, self.loop_out, self.showing_range);
        view.on_redraw(&styles);
        styles
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingView;

    fn tracker() -> ProgressTracker {
        ProgressTracker::new(10.0)
    }

    #[test]
    fn test_set_percentage_rejects_non_finite() {
        let mut progress = tracker();
        progress.set_percentage(42.0).unwrap();
        assert_eq!(progress.percentage(), 42.0);

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0, 100.5] {
            assert!(matches!(
                progress.set_percentage(bad),
                Err(TransportError::InvalidValue { .. })
            ));
        }
        assert_eq!(progress.percentage(), 42.0);
    }

    #[test]
    fn test_percentage_independent_of_range() {
        let mut progress = tracker();
        progress.set_percentage(75.0).unwrap();
        progress.set_range(1.0, 2.0).unwrap();
        progress.clear_range();
        assert_eq!(progress.percentage(), 75.0);
    }

    #[test]
    fn test_setting_both_boundaries_shows_range() {
        let pairs = [(0.0, 0.0), (2.0, 8.0), (0.0, 10.0), (3.5, 3.5), (9.9, 10.0)];
        for (t1, t2) in pairs {
            let mut progress = tracker();
            progress.set_loop_in(t1).unwrap();
            progress.set_loop_out(t2).unwrap();
            assert!(progress.is_showing_range());
            assert_eq!(progress.loop_in(), Some(t1));
            assert_eq!(progress.loop_out(), Some(t2));
        }
    }

    #[test]
    fn test_single_boundary_does_not_show_range() {
        let mut progress = tracker();
        progress.set_loop_in(4.0).unwrap();
        assert!(!progress.is_showing_range());

        progress.toggle_range();
        assert!(!progress.is_showing_range());
    }

    #[test]
    fn test_loop_in_past_out_drags_out() {
        let mut progress = tracker();
        progress.set_range(2.0, 5.0).unwrap();
        progress.set_loop_in(7.0).unwrap();
        assert_eq!(progress.loop_in(), Some(7.0));
        assert_eq!(progress.loop_out(), Some(7.0));
    }

    #[test]
    fn test_loop_out_before_in_drags_in() {
        let mut progress = tracker();
        progress.set_range(4.0, 8.0).unwrap();
        progress.set_loop_out(1.0).unwrap();
        assert_eq!(progress.loop_in(), Some(1.0));
        assert_eq!(progress.loop_out(), Some(1.0));
    }

    #[test]
    fn test_boundary_validation() {
        let mut progress = tracker();
        assert!(progress.set_loop_in(-0.1).is_err());
        assert!(progress.set_loop_out(10.1).is_err());
        assert!(progress.set_loop_in(f64::NAN).is_err());
        assert_eq!(progress.loop_in(), None);
        assert_eq!(progress.loop_out(), None);

        assert_eq!(
            progress.set_range(6.0, 3.0),
            Err(TransportError::InvalidRange { loop_in: 6.0, loop_out: 3.0 })
        );
        assert!(!progress.is_showing_range());
    }

    #[test]
    fn test_toggle_range() {
        let mut progress = tracker();
        progress.set_range(1.0, 2.0).unwrap();
        progress.toggle_range();
        assert!(!progress.is_showing_range());
        assert_eq!(progress.active_range(), None);
        progress.toggle_range();
        assert_eq!(progress.active_range(), Some((1.0, 2.0)));
    }

    #[test]
    fn test_clear_range_from_any_state() {
        let mut empty = tracker();
        empty.clear_range();

        let mut hidden = tracker();
        hidden.set_range(1.0, 3.0).unwrap();
        hidden.toggle_range();
        hidden.clear_range();

        let mut half = tracker();
        half.set_loop_out(6.0).unwrap();
        half.clear_range();

        for progress in [empty, hidden, half] {
            assert!(!progress.is_showing_range());
            assert_eq!(progress.loop_in(), None);
            assert_eq!(progress.loop_out(), None);
        }
    }

    #[test]
    fn test_expand_then_contract_restores_range() {
        let mut progress = tracker();
        progress.set_range(3.0, 6.0).unwrap();
        progress.expand_range(1.5).unwrap();
        assert_eq!(progress.loop_in(), Some(1.5));
        assert_eq!(progress.loop_out(), Some(7.5));
        progress.contract_range(1.5).unwrap();
        assert_eq!(progress.loop_in(), Some(3.0));
        assert_eq!(progress.loop_out(), Some(6.0));
    }

    #[test]
    fn test_expand_clamps_to_timeline() {
        let mut progress = tracker();
        progress.set_range(0.5, 9.0).unwrap();
        progress.expand_range(2.0).unwrap();
        assert_eq!(progress.loop_in(), Some(0.0));
        assert_eq!(progress.loop_out(), Some(10.0));
    }

    #[test]
    fn test_contract_collapses_to_midpoint() {
        let mut progress = tracker();
        progress.set_range(4.0, 6.0).unwrap();
        progress.contract_range(3.0).unwrap();
        assert_eq!(progress.loop_in(), Some(5.0));
        assert_eq!(progress.loop_out(), Some(5.0));
    }

    #[test]
    fn test_adjust_without_range_is_noop() {
        let mut progress = tracker();
        progress.set_loop_in(2.0).unwrap();
        progress.expand_range(1.0).unwrap();
        assert_eq!(progress.loop_in(), Some(2.0));
        assert_eq!(progress.loop_out(), None);
        assert!(progress.contract_range(f64::NAN).is_err());
    }

    #[test]
    fn test_drag_state() {
        let mut progress = tracker();
        assert!(!progress.is_dragging());
        progress.begin_drag(DragHandle::LoopOut);
        assert!(progress.is_dragging());
        assert_eq!(progress.drag_handle(), Some(DragHandle::LoopOut));
        progress.end_drag();
        assert!(!progress.is_dragging());
    }

    #[test]
    fn test_set_duration_clamps_range() {
        let mut progress = tracker();
        progress.set_range(4.0, 9.0).unwrap();
        progress.set_duration(5.0);
        assert_eq!(progress.loop_in(), Some(4.0));
        assert_eq!(progress.loop_out(), Some(5.0));

        progress.set_duration(-1.0);
        progress.set_duration(f64::NAN);
        assert_eq!(progress.duration(), 5.0);
    }

    #[test]
    fn test_conversions_on_empty_timeline() {
        let progress = ProgressTracker::new(0.0);
        assert_eq!(progress.percentage_at(3.0), 0.0);
        assert_eq!(progress.time_at(50.0), 0.0);
    }

    #[test]
    fn test_update_styles_is_idempotent() {
        let mut progress = tracker();
        progress.set_percentage(50.0).unwrap();
        progress.set_range(2.0, 8.0).unwrap();

        let mut view = RecordingView::default();
        let first = progress.update_styles(&mut view);
        let second = progress.update_styles(&mut view);
        assert_eq!(first, second);

        let band = first.band.unwrap();
        assert_eq!(first.playhead, 50.0);
        assert!((band.start - 20.0).abs() < 1e-9);
        assert!((band.end - 80.0).abs() < 1e-9);
        assert!((band.width - 60.0).abs() < 1e-9);

        assert_eq!(view.redraws, 2);
        assert_eq!(view.range, Some((Some(2.0), Some(8.0), true)));
    }
}
