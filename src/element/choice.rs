//! Clamped index state and parallel (label, value) choice lists.
//!
//! Every counted element (slider, selection, quick-select) stores its
//! position through [`IndexState`]: assignments clamp into range, and the
//! caller learns whether the requested value was accepted exactly. The
//! action callback fires only on an exact match, so "did this actually
//! move" is observable by comparing intent against the clamp result.

use crate::error::ConfigError;

// =============================================================================
// ChoiceList
// =============================================================================

/// Parallel label/value lists backing choice elements.
#[derive(Debug, Clone, Default)]
pub struct ChoiceList {
    labels: Vec<String>,
    values: Vec<i64>,
}

impl ChoiceList {
    /// Build a choice list. Rejected (state untouched at the caller) when
    /// the lists differ in length or are empty.
    pub fn new(labels: Vec<String>, values: Vec<i64>) -> Result<Self, ConfigError> {
        if labels.len() != values.len() {
            return Err(ConfigError::ChoiceLengthMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }
        if labels.is_empty() {
            return Err(ConfigError::EmptyChoiceList);
        }
        Ok(Self { labels, values })
    }

    /// Labels only; values default to their indices.
    pub fn from_labels(labels: Vec<String>) -> Result<Self, ConfigError> {
        let values = (0..labels.len() as i64).collect();
        Self::new(labels, values)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn value(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }

    /// Index of the first choice carrying `value`, if any.
    pub fn position_of_value(&self, value: i64) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

    /// Remove the choice carrying `value`. Silent no-op when absent.
    pub fn remove_value(&mut self, value: i64) {
        if let Some(i) = self.position_of_value(value) {
            self.labels.remove(i);
            self.values.remove(i);
        }
    }
}

// =============================================================================
// IndexState
// =============================================================================

/// An integer count clamped into an inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexState {
    count: i64,
    min: i64,
    max: i64,
}

impl IndexState {
    pub fn new(min: i64, max: i64) -> Self {
        let max = max.max(min);
        Self { count: min, min, max }
    }

    /// Range covering the indices of a choice list.
    pub fn for_choices(len: usize) -> Self {
        Self::new(0, len.saturating_sub(1) as i64)
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Re-bound the range, re-clamping the current count into it.
    pub fn set_range(&mut self, min: i64, max: i64) {
        self.min = min;
        self.max = max.max(min);
        self.count = self.count.clamp(self.min, self.max);
    }

    /// Assign a count, clamping into range.
    ///
    /// Returns `true` only when the stored value equals the requested one,
    /// which is the condition under which the element commits its callback.
    pub fn set_count(&mut self, requested: i64) -> bool {
        let clamped = requested.clamp(self.min, self.max);
        self.count = clamped;
        clamped == requested
    }

    /// Step by a delta with clamping; same exactness contract as `set_count`.
    pub fn step(&mut self, delta: i64) -> bool {
        self.set_count(self.count + delta)
    }

    /// Step with modular wrap-around.
    ///
    /// When `can_cycle_backward` is false a backward step at the minimum
    /// saturates instead of wrapping. Returns `true` when the count changed.
    pub fn step_cyclic(&mut self, delta: i64, can_cycle_backward: bool) -> bool {
        let span = self.max - self.min + 1;
        let before = self.count;

        if delta < 0 && !can_cycle_backward {
            self.count = (self.count + delta).max(self.min);
        } else {
            let offset = (self.count - self.min + delta).rem_euclid(span);
            self.count = self.min + offset;
        }

        self.count != before
    }
}
