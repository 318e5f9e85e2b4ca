//! Bit recovery from an edge channel.
//!
//! Bits are sampled at a fixed rate, re-aligning to the nearest transition
//! whenever a fixed step would cross one. Timing error is thereby bounded to
//! a bit period and corrected at every edge.

use thiserror::Error;

use crate::sans::window::BitSample;

/// A captured digital channel, read through a moving cursor.
pub trait Channel {
    /// The level at the cursor.
    fn bit_level(&self) -> bool;
    /// Move the cursor forward by a number of samples.
    fn advance(&mut self, samples: u64);
    /// Whether moving forward by a number of samples would pass a transition.
    fn would_cross_transition(&self, samples: u64) -> bool;
    /// Move the cursor to the next transition.
    fn advance_to_next_transition(&mut self);
    /// Whether any transitions lie beyond the cursor.
    fn more_transitions(&self) -> bool;
    /// The absolute sample index of the cursor.
    fn sample_index(&self) -> u64;
}

impl<C: Channel + ?Sized> Channel for &mut C {
    fn bit_level(&self) -> bool {
        (**self).bit_level()
    }
    fn advance(&mut self, samples: u64) {
        (**self).advance(samples)
    }
    fn would_cross_transition(&self, samples: u64) -> bool {
        (**self).would_cross_transition(samples)
    }
    fn advance_to_next_transition(&mut self) {
        (**self).advance_to_next_transition()
    }
    fn more_transitions(&self) -> bool {
        (**self).more_transitions()
    }
    fn sample_index(&self) -> u64 {
        (**self).sample_index()
    }
}

/// An error deriving bit timing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimingError {
    /// Zero bit rate.
    #[error("Bit rate must be non-zero.")]
    ZeroBitRate,
    /// Too few samples per bit.
    #[error("Sample rate ({sample_rate} Hz) is below the minimum ({minimum} Hz).")]
    SampleRateTooLow { sample_rate: u32, minimum: u64 },
}

/// Sample offsets derived from the sample and bit rates.
///
/// The bit period is truncated to whole samples. Near the minimum of four
/// samples per bit, a non-integer ratio drifts by up to a sample per bit
/// between edges, and long runs may be mis-sampled or never lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitTiming {
    samples_per_bit: u64,
    samples_to_center: u64,
}

impl BitTiming {
    /// Fewest samples per bit the sampler can work with.
    pub const MIN_SAMPLES_PER_BIT: u64 = 4;

    pub fn new(sample_rate: u32, bit_rate: u32) -> Result<Self, TimingError> {
        if bit_rate == 0 {
            Err(TimingError::ZeroBitRate)?;
        }

        let (rate, bits) = (u64::from(sample_rate), u64::from(bit_rate));

        let minimum = bits * Self::MIN_SAMPLES_PER_BIT;
        if rate < minimum {
            Err(TimingError::SampleRateTooLow {
                sample_rate,
                minimum,
            })?;
        }

        Ok(Self {
            samples_per_bit: rate / bits,
            // One and a half bit periods, rounded.
            samples_to_center: (3 * rate + bits) / (2 * bits),
        })
    }

    pub fn samples_per_bit(&self) -> u64 {
        self.samples_per_bit
    }

    /// Samples from an edge to the centre of the bit after next.
    pub fn samples_to_center(&self) -> u64 {
        self.samples_to_center
    }

    pub fn half_bit(&self) -> u64 {
        self.samples_per_bit / 2
    }
}

/// An iterator over bits sampled from a channel.
///
/// Sampling locks onto the first pair of transitions and ends when the
/// channel has no transitions left.
#[derive(Debug)]
pub struct Sampler<C> {
    channel: C,
    timing: BitTiming,
    locked: bool,
    done: bool,
}

impl<C: Channel> Sampler<C> {
    pub fn new(channel: C, timing: BitTiming) -> Self {
        Self {
            channel,
            timing,
            locked: false,
            done: false,
        }
    }

    pub fn timing(&self) -> BitTiming {
        self.timing
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn into_inner(self) -> C {
        self.channel
    }

    fn lock(&mut self) -> bool {
        for _ in 0..2 {
            if !self.channel.more_transitions() {
                return false;
            }
            self.channel.advance_to_next_transition();
        }

        self.channel.advance(self.timing.samples_to_center - 1);
        true
    }

    fn step(&mut self) -> bool {
        let BitTiming {
            samples_per_bit,
            samples_to_center,
        } = self.timing;

        if self.channel.would_cross_transition(samples_per_bit) {
            self.channel.advance_to_next_transition();
            self.channel.advance(samples_to_center - samples_per_bit);
        } else {
            self.channel.advance(samples_per_bit);
        }

        self.channel.more_transitions()
    }
}

impl<C: Channel> Iterator for Sampler<C> {
    type Item = BitSample;

    fn next(&mut self) -> Option<BitSample> {
        if self.done {
            return None;
        }

        let ready = if self.locked {
            self.step()
        } else {
            self.locked = true;
            self.lock()
        };

        if !ready {
            self.done = true;
            return None;
        }

        Some(BitSample {
            level: self.channel.bit_level(),
            center: self.channel.sample_index(),
        })
    }
}
