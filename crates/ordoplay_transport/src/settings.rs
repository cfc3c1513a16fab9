// SPDX-License-Identifier: MIT OR Apache-2.0
//! Panel options loaded from RON, merged over built-in defaults.
//!
//! ```ron
//! (
//!     shortcuts: {
//!         "togglePlay": "k",
//!         "jumpForward": ["l", "pagedown"],
//!     },
//!     timescales: Some([1.0, 0.5, 0.1]),
//! )
//! ```

use crate::error::ConfigError;
use crate::shortcuts::{ChordList, ShortcutConfig};
use crate::timescale::TimescaleSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User-supplied options; anything left out keeps its default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    /// Chord overrides keyed by command name (`togglePlay`, `jumpForwardBig`, ...)
    pub shortcuts: IndexMap<String, ChordList>,
    /// Selectable playback rates, first one active
    pub timescales: Option<Vec<f64>>,
}

impl PanelOptions {
    /// Parse options from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Load options from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let options = Self::from_ron(&text)?;
        tracing::info!("Loaded panel options from {}", path.display());
        Ok(options)
    }
}

/// Resolved panel settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelSettings {
    /// Chords for every command
    pub shortcuts: ShortcutConfig,
    /// Selectable playback rates
    pub timescales: TimescaleSet,
}

impl PanelSettings {
    /// Merge user options over the defaults
    pub fn from_options(options: &PanelOptions) -> Self {
        let timescales = match &options.timescales {
            None => TimescaleSet::default(),
            Some(rates) => TimescaleSet::new(rates.clone()).unwrap_or_else(|| {
                tracing::warn!("Invalid timescales {rates:?}, using defaults");
                TimescaleSet::default()
            }),
        };

        Self {
            shortcuts: ShortcutConfig::merged(&options.shortcuts),
            timescales,
        }
    }
}
