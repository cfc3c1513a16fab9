// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registered playback rates with a single active selection.

use crate::error::{Result, TransportError};

/// Rates offered when no others are configured
pub const DEFAULT_TIMESCALES: [f64; 3] = [1.0, 0.5, 0.25];

const MATCH_EPSILON: f64 = 1e-9;

/// Set of selectable timescales
#[derive(Debug, Clone, PartialEq)]
pub struct TimescaleSet {
    options: Vec<f64>,
    active: usize,
}

impl TimescaleSet {
    /// Create a set from configured rates, the first one active
    ///
    /// Returns `None` if the list is empty, repeats a rate, or holds a
    /// non-positive or non-finite rate.
    pub fn new(options: Vec<f64>) -> Option<Self> {
        if options.is_empty() || options.iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return None;
        }
        let repeated = options
            .iter()
            .enumerate()
            .any(|(i, a)| options[..i].iter().any(|b| (a - b).abs() < MATCH_EPSILON));
        if repeated {
            return None;
        }
        Some(Self { options, active: 0 })
    }

    /// Registered rates in display order
    pub fn options(&self) -> &[f64] {
        &self.options
    }

    /// Currently active rate
    pub fn active(&self) -> f64 {
        self.options[self.active]
    }

    /// Index of the active rate
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Whether `multiplier` is the active rate
    pub fn is_active(&self, multiplier: f64) -> bool {
        self.index_of(multiplier) == Some(self.active)
    }

    /// Position of a registered rate
    pub fn index_of(&self, multiplier: f64) -> Option<usize> {
        self.options
            .iter()
            .position(|r| (r - multiplier).abs() < MATCH_EPSILON)
    }

    /// Make `multiplier` the active rate
    pub fn select(&mut self, multiplier: f64) -> Result<f64> {
        let idx = self
            .index_of(multiplier)
            .ok_or(TransportError::invalid("timescale", multiplier))?;
        self.active = idx;
        Ok(self.options[idx])
    }
}

impl Default for TimescaleSet {
    fn default() -> Self {
        Self {
            options: DEFAULT_TIMESCALES.to_vec(),
            active: 0,
        }
    }
}
