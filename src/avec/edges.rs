//! Channel over a list of transitions.

use thiserror::Error;

use super::sampler::Channel;

/// An error building an edge channel.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EdgesError {
    /// Transitions out of order.
    #[error("Transition {index} does not follow the one before it.")]
    Unordered { index: usize },
}

/// A channel described by its initial level and the sample indices at which
/// it changes.
///
/// The sample at a transition's index holds the new level.
#[derive(Debug, Clone)]
pub struct Edges<'a> {
    initial_level: bool,
    transitions: &'a [u64],
    position: u64,
    passed: usize,
}

impl<'a> Edges<'a> {
    /// Create a channel with its cursor at sample zero.
    ///
    /// Transitions must be strictly increasing.
    pub fn new(initial_level: bool, transitions: &'a [u64]) -> Result<Self, EdgesError> {
        if let Some(i) = transitions.windows(2).position(|w| w[0] >= w[1]) {
            Err(EdgesError::Unordered { index: i + 1 })?;
        }

        let passed = transitions.iter().take_while(|&&t| t == 0).count();

        Ok(Self {
            initial_level,
            transitions,
            position: 0,
            passed,
        })
    }

    fn next_transition(&self) -> Option<u64> {
        self.transitions.get(self.passed).copied()
    }
}

impl Channel for Edges<'_> {
    fn bit_level(&self) -> bool {
        self.initial_level ^ (self.passed % 2 == 1)
    }

    fn advance(&mut self, samples: u64) {
        self.position = self.position.saturating_add(samples);

        let position = self.position;
        self.passed += self.transitions[self.passed..]
            .iter()
            .take_while(|&&t| t <= position)
            .count();
    }

    fn would_cross_transition(&self, samples: u64) -> bool {
        self.next_transition()
            .is_some_and(|t| t <= self.position.saturating_add(samples))
    }

    fn advance_to_next_transition(&mut self) {
        if let Some(t) = self.next_transition() {
            self.position = t;
            self.passed += 1;
        }
    }

    fn more_transitions(&self) -> bool {
        self.passed < self.transitions.len()
    }

    fn sample_index(&self) -> u64 {
        self.position
    }
}
