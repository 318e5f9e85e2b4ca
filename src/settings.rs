//! Decoder settings.
//!
//! Settings persist as a single line of whitespace-separated fields, the input
//! channel (`-` if unset), the bit rate, and whether idle frames are dropped:
//!
//! ```text
//! 0 1250000 true
//! ```

use core::{fmt, str::FromStr};

use thiserror::Error;

use crate::avec::sampler::{BitTiming, TimingError};

/// Slowest supported bit rate, in bits per second.
pub const MIN_BIT_RATE: u32 = 1;
/// Fastest supported bit rate, in bits per second.
pub const MAX_BIT_RATE: u32 = 10_000_000;

/// An error validating or reading settings.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// No input channel.
    #[error("No input channel selected.")]
    UndefinedChannel,
    /// Bit rate outside the supported range.
    #[error("Bit rate ({0} bit/s) is outside the supported range.")]
    BitRateOutOfRange(u32),
    /// Sample rate unusable at this bit rate.
    #[error("Unusable sample rate: {0}")]
    Timing(#[from] TimingError),
    /// Missing field in stored settings.
    #[error("Missing setting ({0}).")]
    Missing(&'static str),
    /// Unreadable field in stored settings.
    #[error("Malformed setting ({0}).")]
    Malformed(&'static str),
}

/// Settings for a decode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Identifier of the channel to decode, chosen by the host.
    pub input_channel: Option<u32>,
    /// Bits per second.
    pub bit_rate: u32,
    /// Whether to drop idle ordered sets from the output.
    pub drop_idle_frames: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_channel: None,
            bit_rate: 9600,
            drop_idle_frames: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.input_channel.is_none() {
            Err(SettingsError::UndefinedChannel)?;
        }

        if !(MIN_BIT_RATE..=MAX_BIT_RATE).contains(&self.bit_rate) {
            Err(SettingsError::BitRateOutOfRange(self.bit_rate))?;
        }

        Ok(())
    }

    /// Lowest sample rate, in hertz, able to decode at this bit rate.
    ///
    /// Sample rates just above this that are not a whole multiple of the bit
    /// rate may still drift out of step. See [`BitTiming`].
    pub fn minimum_sample_rate(&self) -> u64 {
        u64::from(self.bit_rate) * BitTiming::MIN_SAMPLES_PER_BIT
    }

    /// Validate these settings and derive bit timing for a capture.
    pub fn timing(&self, sample_rate: u32) -> Result<BitTiming, SettingsError> {
        self.validate()?;
        Ok(BitTiming::new(sample_rate, self.bit_rate)?)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.input_channel {
            Some(channel) => write!(f, "{channel}")?,
            None => f.write_str("-")?,
        }

        write!(f, " {} {}", self.bit_rate, self.drop_idle_frames)
    }
}

impl FromStr for Settings {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let mut next = |name| fields.next().ok_or(SettingsError::Missing(name));

        let input_channel = match next("channel")? {
            "-" => None,
            c => Some(c.parse().map_err(|_| SettingsError::Malformed("channel"))?),
        };

        let bit_rate: u32 = next("bit rate")?
            .parse()
            .map_err(|_| SettingsError::Malformed("bit rate"))?;

        let drop_idle_frames: bool = next("drop idle frames")?
            .parse()
            .map_err(|_| SettingsError::Malformed("drop idle frames"))?;

        if !(MIN_BIT_RATE..=MAX_BIT_RATE).contains(&bit_rate) {
            Err(SettingsError::BitRateOutOfRange(bit_rate))?;
        }

        Ok(Self {
            input_channel,
            bit_rate,
            drop_idle_frames,
        })
    }
}
