// SPDX-License-Identifier: MIT OR Apache-2.0
//! Presentation hooks the transport pushes state into.

use crate::controller::LabelSupport;
use crate::progress::ProgressStyles;

/// Receiver for transport state changes
///
/// All hooks default to doing nothing, so a view only implements what it
/// draws. Gestures travel the other way, through the controller's public
/// operations or [`TransportController::execute`].
///
/// [`TransportController::execute`]: crate::TransportController::execute
pub trait PanelView {
    /// Playhead position changed, in percent of the timeline
    fn on_percentage_changed(&mut self, _percentage: f64) {}

    /// Play/pause state changed
    fn on_play_state_changed(&mut self, _is_playing: bool) {}

    /// Loop boundaries or their visibility changed
    fn on_range_changed(&mut self, _loop_in: Option<f64>, _loop_out: Option<f64>, _showing: bool) {}

    /// Displayed time changed (rounded to hundredths)
    fn on_time_changed(&mut self, _time: f64) {}

    /// A different timescale became active
    fn on_timescale_changed(&mut self, _timescale: f64) {}

    /// Label availability was resolved
    fn on_labels_changed(&mut self, _labels: &LabelSupport) {}

    /// Derived handle and band positions need redrawing
    fn on_redraw(&mut self, _styles: &ProgressStyles) {}
}

/// Headless view
impl PanelView for () {}

impl<V: PanelView + ?Sized> PanelView for Box<V> {
    fn on_percentage_changed(&mut self, percentage: f64) {
        (**self).on_percentage_changed(percentage);
    }

    fn on_play_state_changed(&mut self, is_playing: bool) {
        (**self).on_play_state_changed(is_playing);
    }

    fn on_range_changed(&mut self, loop_in: Option<f64>, loop_out: Option<f64>, showing: bool) {
        (**self).on_range_changed(loop_in, loop_out, showing);
    }

    fn on_time_changed(&mut self, time: f64) {
        (**self).on_time_changed(time);
    }

    fn on_timescale_changed(&mut self, timescale: f64) {
        (**self).on_timescale_changed(timescale);
    }

    fn on_labels_changed(&mut self, labels: &LabelSupport) {
        (**self).on_labels_changed(labels);
    }

    fn on_redraw(&mut self, styles: &ProgressStyles) {
        (**self).on_redraw(styles);
    }
}
