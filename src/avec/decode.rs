//! Channel-based decoder implementation.

use either::Either::{self, Left, Right};
use thiserror::Error;
use tracing::debug;

use crate::{
    sans::{
        Decoder,
        disparity::RunningDisparity,
        symbol::{IdleFilter, Kind, Symbol},
        sync::Synchronized,
    },
    settings::{Settings, SettingsError},
};

use super::{
    FromSymbols,
    sampler::{BitTiming, Channel, Sampler},
};

/// Errors occurring while starting a decode run.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Settings unusable for this capture.
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Counts kept over a decode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Bits sampled, including those before synchronization.
    pub bits: u64,
    /// First sample of the comma that established framing.
    pub synchronized_at: Option<u64>,
    pub data: u64,
    pub control: u64,
    pub errors: u64,
    /// Emitted symbols carrying a disparity violation.
    pub violations: u64,
    /// Idle symbols dropped.
    pub suppressed: u64,
}

impl Summary {
    /// Symbols emitted.
    pub fn symbols(&self) -> u64 {
        self.data + self.control + self.errors
    }

    fn record(&mut self, symbol: &Symbol) {
        match symbol.kind {
            Kind::Data => self.data += 1,
            Kind::Control => self.control += 1,
            Kind::Error => self.errors += 1,
        }

        if symbol.violation.is_some() {
            self.violations += 1;
        }
    }
}

/// An iterator decoding symbols from a channel.
///
/// Holds all state for a single run. Stopping iteration early leaves nothing
/// to clean up.
#[derive(Debug)]
pub struct Symbols<C> {
    sampler: Sampler<C>,
    state: Option<Either<Decoder, Synchronized>>,
    filter: IdleFilter,
    summary: Summary,
}

impl<C: Channel> Symbols<C> {
    pub fn new(channel: C, timing: BitTiming, drop_idle_frames: bool) -> Self {
        Self {
            sampler: Sampler::new(channel, timing),
            state: Some(Left(Decoder::new(timing.half_bit()))),
            filter: IdleFilter::new(drop_idle_frames),
            summary: Summary::default(),
        }
    }

    /// Start a run over a channel captured at a sample rate.
    pub fn with_settings(channel: C, settings: &Settings, sample_rate: u32) -> Result<Self, Error> {
        let timing = settings.timing(sample_rate)?;
        Ok(Self::new(channel, timing, settings.drop_idle_frames))
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn is_synchronized(&self) -> bool {
        matches!(self.state, Some(Right(_)))
    }

    /// Running disparity, once synchronized.
    pub fn running_disparity(&self) -> Option<RunningDisparity> {
        match &self.state {
            Some(Right(state)) => Some(state.validator().running_disparity()),
            _ => None,
        }
    }
}

impl<C: Channel> Iterator for Symbols<C> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        loop {
            let sample = self.sampler.next()?;
            self.summary.bits += 1;

            let (symbol, state) = match self.state.take()? {
                Left(state) => match state.advance(sample) {
                    Left(state) => (None, Left(state)),
                    Right((symbol, state)) => {
                        self.summary.synchronized_at = Some(symbol.start);
                        (Some(symbol), Right(state))
                    }
                },
                Right(state) => {
                    let (symbol, state) = state.advance(sample);
                    (symbol, Right(state))
                }
            };

            self.state = Some(state);

            let Some(symbol) = symbol else {
                continue;
            };

            if self.filter.admit(&symbol) {
                self.summary.record(&symbol);
                return Some(symbol);
            }

            self.summary.suppressed += 1;
        }
    }
}

/// Decode symbols from a channel, publishing to a receiver.
///
/// This method is also re-exported as `disparate::avec::decode_channel`.
pub fn decode(
    channel: impl Channel,
    settings: &Settings,
    sample_rate: u32,
    o: &mut impl FromSymbols,
) -> Result<Summary, Error> {
    let mut symbols = Symbols::with_settings(channel, settings, sample_rate)?;

    for symbol in &mut symbols {
        o.add_symbol(symbol);
    }

    let summary = *symbols.summary();

    debug!(
        bits = summary.bits,
        symbols = summary.symbols(),
        errors = summary.errors,
        violations = summary.violations,
        suppressed = summary.suppressed,
        "End of capture."
    );

    Ok(summary)
}
