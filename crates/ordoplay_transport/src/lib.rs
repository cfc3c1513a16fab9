// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transport controls for `OrdoPlay` timelines.
//!
//! This crate keeps a progress bar and a loop range in sync with an
//! animation timeline it does not own:
//! - Play/pause, restart, jumps and timescale selection
//! - Scrubbing and loop-range handles with drag suppression
//! - Loop and end-of-timeline wraparound on every tick
//! - Configurable keyboard shortcuts with chord aliases
//!
//! ## Architecture
//!
//! The host owns the engine behind a [`TimelineAdapter`] and a renderer
//! behind a [`PanelView`]. A [`TransportPanel`] ties them to a
//! [`TransportController`] and a [`ShortcutBinder`]; the host calls
//! [`TransportPanel::tick`] on each timeline update and forwards input.
//! Everything runs on the host's thread.

pub mod binder;
pub mod chord;
pub mod controller;
pub mod error;
pub mod panel;
pub mod progress;
pub mod settings;
pub mod shortcuts;
pub mod timeline;
pub mod timescale;
pub mod view;

#[cfg(test)]
mod testing;

pub use binder::ShortcutBinder;
pub use chord::{KeyChord, Modifiers};
pub use controller::{display_time, LabelSupport, TransportController, JUMP_UNIT, RANGE_UNIT};
pub use error::{ConfigError, Result, TransportError};
pub use panel::TransportPanel;
pub use progress::{DragHandle, ProgressStyles, ProgressTracker, RangeBand};
pub use settings::{PanelOptions, PanelSettings};
pub use shortcuts::{ChordList, Command, ShortcutConfig};
pub use timeline::{PlaybackState, SequenceTimeline, TimelineAdapter, TimelineLabel};
pub use timescale::{TimescaleSet, DEFAULT_TIMESCALES};
pub use view::PanelView;
