//! Per-state transition table

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{FsmError, FsmResult};
use crate::id::Identifier;
use std::collections::HashMap;

/// Maps stimuli to target state identifiers.
///
/// The table is deterministic: a stimulus maps to exactly one target for as
/// long as it stays in the table, and the null sentinel is never stored as
/// either key or value.
#[derive(Debug, Clone)]
pub struct TransitionTable<S, T> {
    map: HashMap<T, S>,
}

impl<S, T> Default for TransitionTable<S, T> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<S: Identifier, T: Identifier> TransitionTable<S, T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stimulus -> target pair.
    ///
    /// Rejects null values and never overwrites an existing mapping.
    pub fn add_transition(&mut self, stimulus: T, target: S) -> FsmResult<(), S, T> {
        if stimulus.is_none() || target.is_none() {
            return Err(FsmError::NullTransition { stimulus, target });
        }

        if let Some(&existing) = self.map.get(&stimulus) {
            return Err(FsmError::DuplicateTransition {
                stimulus,
                existing,
                rejected: target,
            });
        }

        self.map.insert(stimulus, target);
        log::debug!("Added transition {:?} -> {:?}", stimulus, target);
        Ok(())
    }

    /// Remove a stimulus, returning the target it mapped to
    pub fn delete_transition(&mut self, stimulus: T) -> FsmResult<S, S, T> {
        if stimulus.is_none() {
            return Err(FsmError::InvalidStimulus);
        }

        self.map
            .remove(&stimulus)
            .ok_or(FsmError::UnknownTransition { stimulus })
    }

    /// Look up the state a stimulus leads to
    pub fn output_state(&self, stimulus: T) -> FsmResult<S, S, T> {
        if stimulus.is_none() {
            return Err(FsmError::InvalidStimulus);
        }

        self.map
            .get(&stimulus)
            .copied()
            .ok_or(FsmError::UnknownTransition { stimulus })
    }

    /// Sentinel-returning lookup: failures go to `sink` and yield `S::NONE`
    pub fn output_state_or_none(&self, stimulus: T, sink: &dyn DiagnosticSink) -> S {
        match self.output_state(stimulus) {
            Ok(target) => target,
            Err(err) => {
                sink.report(Diagnostic::from(&err));
                S::NONE
            }
        }
    }

    /// Check if a stimulus is mapped
    pub fn contains(&self, stimulus: T) -> bool {
        self.map.contains_key(&stimulus)
    }

    /// Number of mapped stimuli
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if no stimulus is mapped
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over (stimulus, target) pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (T, S)> + '_ {
        self.map.iter().map(|(&t, &s)| (t, s))
    }
}
