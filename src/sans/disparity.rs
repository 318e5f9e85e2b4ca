//! Running disparity tracking.

use core::cmp::Ordering;

use thiserror::Error;

use super::table::Codeword;

/// The transmitter's running disparity, as observed by the receiver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RunningDisparity {
    #[default]
    Negative,
    Positive,
}

/// A codeword sent at the wrong running disparity.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// A codeword with more ones than zeros at positive running disparity.
    #[error("Disparity mismatch: too many ones.")]
    ExcessOnes,
    /// A codeword with more zeros than ones at negative running disparity.
    #[error("Disparity mismatch: too many zeros.")]
    ExcessZeros,
}

/// Tracks running disparity across a run of codewords.
///
/// The run starts at negative disparity. That starting point is assumed
/// rather than observed, so the first codeword is never reported as a
/// violation.
#[derive(Debug, Clone)]
pub struct Validator {
    running: RunningDisparity,
    first: bool,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            running: RunningDisparity::Negative,
            first: true,
        }
    }

    pub fn running_disparity(&self) -> RunningDisparity {
        self.running
    }

    /// Account for a codeword, returning a violation if it was sent at the
    /// wrong disparity.
    ///
    /// Only the ones-count is considered, so codewords missing from the table
    /// still move the running disparity.
    pub fn advance(&mut self, codeword: Codeword) -> Option<Violation> {
        use RunningDisparity::{Negative, Positive};

        let first = core::mem::replace(&mut self.first, false);

        match (codeword.ones().cmp(&5), self.running) {
            (Ordering::Greater, Negative) => {
                self.running = Positive;
                None
            }
            (Ordering::Less, Positive) => {
                self.running = Negative;
                None
            }
            (Ordering::Greater, Positive) if !first => Some(Violation::ExcessOnes),
            (Ordering::Less, Negative) if !first => Some(Violation::ExcessZeros),
            _ => None,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
