// SPDX-License-Identifier: MIT OR Apache-2.0
//! A transport panel: controller and shortcut table for one timeline.

use crate::binder::ShortcutBinder;
use crate::chord::KeyChord;
use crate::controller::TransportController;
use crate::error::Result;
use crate::settings::PanelSettings;
use crate::shortcuts::Command;
use crate::timeline::TimelineAdapter;
use crate::view::PanelView;

/// Transport panel attached to one timeline
///
/// Owns all panel state for its lifetime. Dropping it, or calling
/// [`teardown`](Self::teardown), detaches the view and the shortcuts.
pub struct TransportPanel<T: TimelineAdapter, V: PanelView = ()> {
    controller: TransportController<T, V>,
    binder: ShortcutBinder,
}

impl<T: TimelineAdapter, V: PanelView> TransportPanel<T, V> {
    /// Attach a panel to `timeline`
    pub fn new(timeline: T, view: V, settings: PanelSettings) -> Self {
        let binder = ShortcutBinder::new(&settings.shortcuts, settings.timescales.options().len());
        let controller = TransportController::with_timescales(timeline, view, settings.timescales);
        tracing::debug!("Transport panel attached with {} shortcuts", binder.bindings().count());
        Self { controller, binder }
    }

    /// The transport controller
    pub fn controller(&self) -> &TransportController<T, V> {
        &self.controller
    }

    /// Mutable access to the transport controller
    pub fn controller_mut(&mut self) -> &mut TransportController<T, V> {
        &mut self.controller
    }

    /// The shortcut table
    pub fn binder(&self) -> &ShortcutBinder {
        &self.binder
    }

    /// Reconcile with the timeline; call once per timeline update
    pub fn tick(&mut self) {
        self.controller.tick();
    }

    /// Handle a key chord, returning the command it ran
    pub fn handle_chord(&mut self, chord: &KeyChord) -> Result<Option<Command>> {
        self.binder.dispatch(chord, &mut self.controller)
    }

    /// Handle a chord string such as `"shift+option+right"`
    ///
    /// Unparseable or unbound chords do nothing.
    pub fn handle_chord_str(&mut self, chord: &str) -> Result<Option<Command>> {
        match KeyChord::parse(chord) {
            Some(chord) => self.handle_chord(&chord),
            None => Ok(None),
        }
    }

    /// Run every command triggered by this frame's egui input
    ///
    /// A failing command is logged and the rest still run.
    pub fn handle_input(&mut self, ctx: &egui::Context) -> Vec<Command> {
        let commands = self.binder.check_input(ctx);
        for command in &commands {
            if let Err(e) = self.controller.execute(*command) {
                tracing::warn!("Shortcut {command} failed: {e}");
            }
        }
        commands
    }

    /// Detach the panel and hand the timeline back
    pub fn teardown(self) -> T {
        tracing::debug!("Transport panel detached");
        let (timeline, _view) = self.controller.into_parts();
        timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PanelOptions;
    use crate::testing::RecordingView;
    use crate::timeline::SequenceTimeline;

    fn panel(options: &PanelOptions) -> TransportPanel<SequenceTimeline, RecordingView> {
        let timeline = SequenceTimeline::new(10.0).with_label("hit", 4.0);
        TransportPanel::new(timeline, RecordingView::default(), PanelSettings::from_options(options))
    }

    #[test]
    fn test_playback_loops_inside_range() {
        let mut panel = panel(&PanelOptions::default());
        panel.controller_mut().set_range(2.0, 3.0).unwrap();
        panel.handle_chord_str("return").unwrap();
        panel.handle_chord_str("space").unwrap();
        assert_eq!(panel.controller().timeline().time(), 2.0);

        for _ in 0..12 {
            panel.controller_mut().timeline_mut().advance(0.25);
            panel.tick();
        }
        let time = panel.controller().timeline().time();
        assert!((2.0..3.0).contains(&time), "escaped range at {time}");
        assert!(panel.controller().is_playing());
    }

    #[test]
    fn test_custom_shortcuts() {
        let options = PanelOptions::from_ron(r#"(shortcuts: { "togglePlay": ["k", "space"] }, timescales: Some([1.0, 2.0]))"#)
            .unwrap();
        let mut panel = panel(&options);

        assert_eq!(panel.handle_chord_str("k"), Ok(Some(Command::TogglePlay)));
        assert!(panel.controller().is_playing());
        assert_eq!(panel.handle_chord_str("2"), Ok(Some(Command::SetTimescale(1))));
        assert_eq!(panel.controller().timeline().speed(), 2.0);
        assert_eq!(panel.handle_chord_str("3"), Ok(None));
        assert_eq!(panel.handle_chord_str("not a chord"), Ok(None));
    }

    #[test]
    fn test_labels_available() {
        let mut panel = panel(&PanelOptions::default());
        panel.controller_mut().goto_label("hit").unwrap();
        assert_eq!(panel.controller().timeline().time(), 4.0);

        let timeline = panel.teardown();
        assert!(!timeline.is_paused());
    }
}
