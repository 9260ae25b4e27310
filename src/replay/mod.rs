//! Recorded solution history and its persisted archive.
//!
//! The integrator owns a [`History`] while it runs and appends one snapshot
//! per time level. Once handed out, the history is read-only: consumers
//! (plotters, terminal viewers, offline renderers) walk it by index or
//! through [`History::frames`].

pub mod archive;

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

use crate::engine::state::State;
use crate::error::{AdvectError, AdvectResult};

pub use archive::HistoryArchive;

/// Ordered snapshots, index `i` is the state after `i` steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    /// Time step used to stamp snapshots.
    dt: f64,
    /// Snapshots in time order.
    states: Vec<State>,
}

/// One recorded time level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    /// Snapshot index.
    pub index: usize,
    /// Simulation time `index * dt`.
    pub time: f64,
    /// Field values.
    pub state: &'a State,
}

impl History {
    /// Empty history with room for `capacity` snapshots.
    pub(crate) fn try_with_capacity(dt: f64, capacity: usize) -> Result<Self, TryReserveError> {
        let mut states = Vec::new();
        states.try_reserve_exact(capacity)?;
        Ok(Self { dt, states })
    }

    /// Append a snapshot. Only the integrator records.
    pub(crate) fn push(&mut self, state: State) {
        self.states.push(state);
    }

    /// Number of snapshots, `m + 1` for a completed run.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True if nothing was recorded.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Time step between snapshots.
    #[must_use]
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Snapshot `i`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` unless `0 <= i < len()`.
    pub fn at(&self, i: usize) -> AdvectResult<&State> {
        self.states.get(i).ok_or(AdvectError::IndexOutOfRange {
            index: i,
            len: self.states.len(),
        })
    }

    /// Time stamp of snapshot `i`, `i * dt`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` unless `0 <= i < len()`.
    pub fn time_of(&self, i: usize) -> AdvectResult<f64> {
        if i < self.states.len() {
            Ok(i as f64 * self.dt)
        } else {
            Err(AdvectError::IndexOutOfRange {
                index: i,
                len: self.states.len(),
            })
        }
    }

    /// Final snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    /// All snapshots in time order.
    #[must_use]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// `(time, state)` frames in increasing time order.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = Frame<'_>> + '_ {
        let dt = self.dt;
        self.states
            .iter()
            .enumerate()
            .map(move |(index, state)| Frame {
                index,
                time: index as f64 * dt,
                state,
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn sample_history() -> History {
        let mut history = History::try_with_capacity(0.5, 3).unwrap();
        history.push(State::from_values(vec![0.0, 1.0]));
        history.push(State::from_values(vec![0.5, 0.5]));
        history.push(State::from_values(vec![1.0, 0.0]));
        history
    }

    #[test]
    fn test_len_and_at() {
        let history = sample_history();
        assert_eq!(history.len(), 3);
        assert!(!history.is_empty());
        assert_eq!(history.at(1).unwrap().values(), &[0.5, 0.5]);
        assert_eq!(history.last().unwrap().values(), &[1.0, 0.0]);
    }

    #[test]
    fn test_at_out_of_range() {
        let history = sample_history();
        let err = history.at(3).unwrap_err();
        assert!(matches!(err, AdvectError::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn test_time_of() {
        let history = sample_history();
        assert_eq!(history.time_of(0).unwrap(), 0.0);
        assert_eq!(history.time_of(2).unwrap(), 1.0);
        assert!(history.time_of(3).is_err());
    }

    #[test]
    fn test_frames_in_order() {
        let history = sample_history();
        let frames: Vec<_> = history.frames().collect();
        assert_eq!(history.frames().len(), 3);
        assert_eq!(frames[0].index, 0);
        assert_eq!(frames[2].time, 1.0);
        assert_eq!(frames[1].state, history.at(1).unwrap());
        assert!(frames.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_empty_history() {
        let history = History::try_with_capacity(0.1, 0).unwrap();
        assert!(history.is_empty());
        assert!(history.last().is_none());
        assert!(history.at(0).is_err());
        assert_eq!(history.frames().count(), 0);
    }

    #[test]
    fn test_capacity_overflow_is_an_error() {
        assert!(History::try_with_capacity(0.1, usize::MAX).is_err());
    }

    #[test]
    fn test_serde_round_trip_preserves_bits() {
        let history = sample_history();
        let json = serde_json::to_string(&history).unwrap();
        let back: History = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
