// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transport commands and their default key chords.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Jump magnitude in jump units for the normal variant
pub const JUMP_NORMAL: f64 = 1.0;
/// Jump magnitude in jump units for the big variant
pub const JUMP_BIG: f64 = 10.0;
/// Jump magnitude in jump units for the small variant
pub const JUMP_SMALL: f64 = 0.333;
/// Range adjustment in range units for the normal variant
pub const RANGE_NORMAL: f64 = 1.0;
/// Range adjustment in range units for the big variant
pub const RANGE_BIG: f64 = 10.0;

/// A named transport operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Play or pause
    TogglePlay,
    /// Put the loop-in boundary at the playhead
    SetRangeStart,
    /// Put the loop-out boundary at the playhead
    SetRangeEnd,
    /// Show or hide the loop range
    ToggleRange,
    /// Remove the loop range
    ClearRange,
    /// Jump forward one unit
    JumpForward,
    /// Jump backward one unit
    JumpBackward,
    /// Jump forward ten units
    JumpForwardBig,
    /// Jump backward ten units
    JumpBackwardBig,
    /// Jump forward a third of a unit
    JumpForwardSmall,
    /// Jump backward a third of a unit
    JumpBackwardSmall,
    /// Seek to the start of the range or timeline
    JumpToStart,
    /// Widen the loop range one unit each side
    ExpandRange,
    /// Narrow the loop range one unit each side
    ContractRange,
    /// Widen the loop range ten units each side
    ExpandRangeBig,
    /// Narrow the loop range ten units each side
    ContractRangeBig,
    /// Activate the registered timescale at this index
    SetTimescale(usize),
}

impl Command {
    /// Commands configurable through shortcut options
    pub const CONFIGURABLE: [Command; 16] = [
        Command::TogglePlay,
        Command::SetRangeStart,
        Command::SetRangeEnd,
        Command::ToggleRange,
        Command::ClearRange,
        Command::JumpForward,
        Command::JumpBackward,
        Command::JumpForwardBig,
        Command::JumpBackwardBig,
        Command::JumpForwardSmall,
        Command::JumpBackwardSmall,
        Command::JumpToStart,
        Command::ExpandRange,
        Command::ContractRange,
        Command::ExpandRangeBig,
        Command::ContractRangeBig,
    ];

    /// Option name of the command
    pub fn name(&self) -> &'static str {
        match self {
            Command::TogglePlay => "togglePlay",
            Command::SetRangeStart => "setRangeStart",
            Command::SetRangeEnd => "setRangeEnd",
            Command::ToggleRange => "toggleRange",
            Command::ClearRange => "clearRange",
            Command::JumpForward => "jumpForward",
            Command::JumpBackward => "jumpBackward",
            Command::JumpForwardBig => "jumpForwardBig",
            Command::JumpBackwardBig => "jumpBackwardBig",
            Command::JumpForwardSmall => "jumpForwardSmall",
            Command::JumpBackwardSmall => "jumpBackwardSmall",
            Command::JumpToStart => "jumpToStart",
            Command::ExpandRange => "expandRange",
            Command::ContractRange => "contractRange",
            Command::ExpandRangeBig => "expandRangeBig",
            Command::ContractRangeBig => "contractRangeBig",
            Command::SetTimescale(_) => "setTimescale",
        }
    }

    /// Default chords for a configurable command
    fn default_chords(&self) -> &'static [&'static str] {
        match self {
            Command::TogglePlay => &["space"],
            Command::SetRangeStart => &["b"],
            Command::SetRangeEnd => &["n"],
            Command::ToggleRange => &["shift+space"],
            Command::ClearRange => &["shift+x"],
            Command::JumpForward => &["option+right", "pagedown"],
            Command::JumpBackward => &["option+left", "pageup"],
            Command::JumpForwardBig => &["shift+option+right", "shift+pagedown"],
            Command::JumpBackwardBig => &["shift+option+left", "shift+pageup"],
            Command::JumpForwardSmall => &["ctrl+option+right"],
            Command::JumpBackwardSmall => &["ctrl+option+left"],
            Command::JumpToStart => &["return", "enter"],
            Command::ExpandRange => &["option+up"],
            Command::ContractRange => &["option+down"],
            Command::ExpandRangeBig => &["shift+option+up"],
            Command::ContractRangeBig => &["shift+option+down"],
            Command::SetTimescale(_) => &[],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetTimescale(idx) => write!(f, "{}({idx})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::CONFIGURABLE
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown command '{s}'"))
    }
}

/// One or more chords bound to a command
///
/// Accepts a single string or a list in options files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ChordListRepr", into = "Vec<String>")]
pub struct ChordList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ChordListRepr {
    One(String),
    Many(Vec<String>),
}

impl From<ChordListRepr> for ChordList {
    fn from(repr: ChordListRepr) -> Self {
        match repr {
            ChordListRepr::One(chord) => Self(vec![chord]),
            ChordListRepr::Many(chords) => Self(chords),
        }
    }
}

impl From<ChordList> for Vec<String> {
    fn from(list: ChordList) -> Self {
        list.0
    }
}

impl ChordList {
    /// Chord strings in binding order
    pub fn chords(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ChordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Chords bound to each configurable command
#[derive(Debug, Clone, PartialEq)]
pub struct ShortcutConfig {
    bindings: IndexMap<Command, ChordList>,
}

impl ShortcutConfig {
    /// Chords for a command (empty if unbound)
    pub fn chords(&self, command: Command) -> &[String] {
        self.bindings.get(&command).map(ChordList::chords).unwrap_or_default()
    }

    /// Replace the chords of a command
    pub fn set(&mut self, command: Command, chords: ChordList) {
        self.bindings.insert(command, chords);
    }

    /// All bindings in command order
    pub fn iter(&self) -> impl Iterator<Item = (Command, &ChordList)> {
        self.bindings.iter().map(|(c, l)| (*c, l))
    }

    /// Defaults with user overrides applied
    ///
    /// Overrides replace the chords of the commands they name; every other
    /// command keeps its default. Unknown command names are skipped.
    pub fn merged(overrides: &IndexMap<String, ChordList>) -> Self {
        let mut config = Self::default();
        for (name, chords) in overrides {
            match name.parse::<Command>() {
                Ok(command) => config.set(command, chords.clone()),
                Err(e) => tracing::warn!("Ignoring shortcut option: {e}"),
            }
        }
        config
    }
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        let bindings = Command::CONFIGURABLE
            .iter()
            .map(|c| (*c, c.default_chords().iter().copied().collect::<ChordList>()))
            .collect();
        Self { bindings }
    }
}
