// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyboard dispatch table from key chords to transport commands.

use crate::chord::KeyChord;
use crate::controller::TransportController;
use crate::error::Result;
use crate::shortcuts::{Command, ShortcutConfig};
use crate::timeline::TimelineAdapter;
use crate::view::PanelView;
use indexmap::IndexMap;

/// Digit keys selecting timescales, in registration order
const TIMESCALE_KEYS: [egui::Key; 9] = [
    egui::Key::Num1,
    egui::Key::Num2,
    egui::Key::Num3,
    egui::Key::Num4,
    egui::Key::Num5,
    egui::Key::Num6,
    egui::Key::Num7,
    egui::Key::Num8,
    egui::Key::Num9,
];

/// Maps key chords to commands
///
/// Holds no transport state; every lookup goes through the table built at
/// bind time.
#[derive(Debug, Clone, Default)]
pub struct ShortcutBinder {
    bindings: IndexMap<KeyChord, Command>,
}

impl ShortcutBinder {
    /// Bind every command in `config`, plus digit keys for `timescale_count`
    /// timescales
    ///
    /// Chords that fail to parse are skipped. A chord bound twice keeps its
    /// last command.
    pub fn new(config: &ShortcutConfig, timescale_count: usize) -> Self {
        let mut binder = Self::default();

        for (idx, key) in TIMESCALE_KEYS.iter().take(timescale_count).enumerate() {
            binder.bind(KeyChord::new(*key), Command::SetTimescale(idx));
        }

        for (command, chords) in config.iter() {
            for chord in chords.chords() {
                match KeyChord::parse(chord) {
                    Some(parsed) => binder.bind(parsed, command),
                    None => tracing::warn!("Ignoring unrecognized chord '{chord}' for {command}"),
                }
            }
        }

        binder
    }

    fn bind(&mut self, chord: KeyChord, command: Command) {
        if let Some(previous) = self.bindings.insert(chord, command) {
            if previous != command {
                tracing::warn!("Chord {chord} rebound from {previous} to {command}");
            }
        }
    }

    /// Command bound to a chord
    pub fn command_for(&self, chord: &KeyChord) -> Option<Command> {
        self.bindings.get(chord).copied()
    }

    /// Command bound to a chord string such as `"shift+space"`
    pub fn command_for_str(&self, chord: &str) -> Option<Command> {
        KeyChord::parse(chord).and_then(|c| self.command_for(&c))
    }

    /// Chords bound to a command
    pub fn chords_for(&self, command: Command) -> Vec<KeyChord> {
        self.bindings
            .iter()
            .filter(|(_, c)| **c == command)
            .map(|(chord, _)| *chord)
            .collect()
    }

    /// All bindings in bind order
    pub fn bindings(&self) -> impl Iterator<Item = (&KeyChord, &Command)> {
        self.bindings.iter()
    }

    /// Run the command bound to `chord`, if any
    pub fn dispatch<T, V>(
        &self,
        chord: &KeyChord,
        controller: &mut TransportController<T, V>,
    ) -> Result<Option<Command>>
    where
        T: TimelineAdapter,
        V: PanelView,
    {
        let Some(command) = self.command_for(chord) else {
            return Ok(None);
        };
        controller.execute(command)?;
        Ok(Some(command))
    }

    /// Commands bound to the key presses in a batch of egui events
    pub fn commands_for_events(&self, events: &[egui::Event]) -> Vec<Command> {
        events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => self.command_for(&KeyChord::from_egui(*key, modifiers)),
                _ => None,
            })
            .collect()
    }

    /// Commands triggered by this frame's input
    pub fn check_input(&self, ctx: &egui::Context) -> Vec<Command> {
        ctx.input(|i| self.commands_for_events(&i.events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::Modifiers;
    use crate::shortcuts::ChordList;
    use crate::testing::{FakeTimeline, RecordingView};
    use egui::Key;

    fn default_binder() -> ShortcutBinder {
        ShortcutBinder::new(&ShortcutConfig::default(), 3)
    }

    fn key_event(key: Key, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn test_default_bindings() {
        let binder = default_binder();
        assert_eq!(binder.command_for_str("space"), Some(Command::TogglePlay));
        assert_eq!(binder.command_for_str("shift+space"), Some(Command::ToggleRange));
        assert_eq!(binder.command_for_str("b"), Some(Command::SetRangeStart));
        assert_eq!(binder.command_for_str("ctrl+option+left"), Some(Command::JumpBackwardSmall));
        assert_eq!(binder.command_for_str("shift+option+down"), Some(Command::ContractRangeBig));
        assert_eq!(binder.command_for_str("2"), Some(Command::SetTimescale(1)));
        assert_eq!(binder.command_for_str("4"), None);
        assert_eq!(binder.command_for_str("q"), None);
    }

    #[test]
    fn test_aliases_share_command() {
        let binder = default_binder();
        assert_eq!(binder.command_for_str("pagedown"), Some(Command::JumpForward));
        assert_eq!(binder.command_for_str("option+right"), Some(Command::JumpForward));
        assert_eq!(binder.command_for_str("shift+pageup"), Some(Command::JumpBackwardBig));

        let chords = binder.chords_for(Command::JumpToStart);
        assert_eq!(chords, [KeyChord::new(Key::Enter)]);
        assert_eq!(binder.chords_for(Command::JumpForward).len(), 2);
    }

    #[test]
    fn test_unknown_chords_ignored() {
        let mut config = ShortcutConfig::default();
        config.set(Command::TogglePlay, ChordList::from_iter(["hyper+space", "k", "capslock"]));

        let binder = ShortcutBinder::new(&config, 0);
        assert_eq!(binder.command_for_str("k"), Some(Command::TogglePlay));
        assert_eq!(binder.command_for_str("space"), None);
        assert_eq!(binder.command_for_str("1"), None);
    }

    #[test]
    fn test_dispatch_runs_command() {
        let binder = default_binder();
        let mut transport =
            TransportController::new(FakeTimeline::new(5.0, 10.0), RecordingView::default());

        let chord = KeyChord::parse("pagedown").unwrap();
        assert_eq!(binder.dispatch(&chord, &mut transport), Ok(Some(Command::JumpForward)));
        assert!((transport.timeline().time - 5.1).abs() < 1e-9);

        let chord = KeyChord::parse("3").unwrap();
        binder.dispatch(&chord, &mut transport).unwrap();
        assert_eq!(transport.timeline().rate, 0.25);
        assert!(transport.is_playing());

        let unbound = KeyChord::new(Key::Q);
        assert_eq!(binder.dispatch(&unbound, &mut transport), Ok(None));
    }

    #[test]
    fn test_repeated_dispatch() {
        let binder = default_binder();
        let mut transport =
            TransportController::new(FakeTimeline::new(5.0, 10.0), RecordingView::default());
        let chord = KeyChord::parse("space").unwrap();
        for _ in 0..11 {
            binder.dispatch(&chord, &mut transport).unwrap();
        }
        assert!(transport.is_playing());
        assert_eq!(transport.view().play_states.len(), 12);
    }

    #[test]
    fn test_commands_for_events() {
        let binder = default_binder();
        let shift_alt = egui::Modifiers {
            shift: true,
            alt: true,
            ..Default::default()
        };
        let events = [
            key_event(Key::Space, egui::Modifiers::NONE),
            egui::Event::Text("x".to_string()),
            key_event(Key::ArrowRight, shift_alt),
            key_event(Key::Z, egui::Modifiers::NONE),
            egui::Event::Key {
                key: Key::B,
                physical_key: None,
                pressed: false,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            },
        ];
        assert_eq!(
            binder.commands_for_events(&events),
            [Command::TogglePlay, Command::JumpForwardBig]
        );
        assert_eq!(
            KeyChord::from_egui(Key::ArrowRight, &shift_alt).modifiers,
            Modifiers::SHIFT_ALT
        );
    }
}
