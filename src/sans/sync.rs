//! States aligning the bit stream to symbol boundaries.

use either::Either::{self, Left, Right};
use tracing::{debug, trace};

use super::{
    disparity::Validator,
    symbol::Symbol,
    window::{BitSample, Window},
};

/// State token hunting for a K28.5 comma.
#[derive(Debug)]
pub struct Unsynchronized {
    window: Window,
    half_bit: u64,
}

impl Unsynchronized {
    /// Begin a run, given half a bit period in samples.
    pub fn new(half_bit: u64) -> Self {
        Self {
            window: Window::new(),
            half_bit,
        }
    }

    /// Transition to another state by shifting in a bit.
    ///
    /// Once the window holds a comma, returns that comma decoded as the first
    /// symbol, and the synchronized successor state.
    pub fn advance(mut self, sample: BitSample) -> Either<Self, (Symbol, Synchronized)> {
        self.window.push(sample);

        let codeword = self.window.codeword();
        if !(self.window.is_full() && codeword.is_comma()) {
            return Left(self);
        }

        debug!(
            sample = sample.center,
            codeword = codeword.raw(),
            "Found comma, synchronized."
        );

        let mut state = Synchronized {
            window: self.window,
            half_bit: self.half_bit,
            validator: Validator::new(),
        };

        let symbol = state.decode();

        Right((symbol, state))
    }
}

/// State token decoding every ten bits.
///
/// There is no way back to [`Unsynchronized`]: framing is fixed by the first
/// comma, and later commas are decoded like any other symbol.
#[derive(Debug)]
pub struct Synchronized {
    window: Window,
    half_bit: u64,
    validator: Validator,
}

impl Synchronized {
    /// Transition to another state by shifting in a bit.
    ///
    /// Returns a symbol for every tenth bit, and the successor state.
    pub fn advance(mut self, sample: BitSample) -> (Option<Symbol>, Self) {
        self.window.push(sample);

        let symbol = self.window.is_full().then(|| self.decode());

        (symbol, self)
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    fn decode(&mut self) -> Symbol {
        let codeword = self.window.codeword();
        let span = self.window.span(self.half_bit);
        let violation = self.validator.advance(codeword);

        self.window.clear();

        let symbol = Symbol::new(
            codeword,
            self.validator.running_disparity(),
            violation,
            span,
        );

        match (symbol.is_valid(), symbol.violation) {
            (false, _) => debug!(start = span.0, codeword = codeword.raw(), "Unknown codeword."),
            (true, Some(violation)) => debug!(start = span.0, %violation),
            (true, None) => trace!(start = span.0, value = symbol.value()),
        }

        symbol
    }
}
