//! Decoded symbols and idle filtering.

use super::{
    disparity::{RunningDisparity, Violation},
    table::{self, Codeword, Decoded, Disparity, Octet, SymbolName},
};

/// How a symbol decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A data character.
    Data,
    /// A control (K) character.
    Control,
    /// A codeword missing from the table.
    Error,
}

/// A decoded ten-bit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// The codeword as sampled.
    pub codeword: Codeword,
    /// The table entry, if the codeword was legal.
    pub decoded: Option<Decoded>,
    pub kind: Kind,
    /// Running disparity after this codeword.
    pub running_disparity: RunningDisparity,
    /// Set if the codeword was sent at the wrong disparity.
    pub violation: Option<Violation>,
    /// First sample covered, inclusive.
    pub start: u64,
    /// Last sample covered, inclusive.
    pub end: u64,
}

impl Symbol {
    /// Look up and classify a codeword.
    pub fn new(
        codeword: Codeword,
        running_disparity: RunningDisparity,
        violation: Option<Violation>,
        (start, end): (u64, u64),
    ) -> Self {
        let decoded = table::lookup(codeword);

        let kind = match decoded {
            None => Kind::Error,
            Some(d) if d.octet.is_control() => Kind::Control,
            Some(_) => Kind::Data,
        };

        Self {
            codeword,
            decoded,
            kind,
            running_disparity,
            violation,
            start,
            end,
        }
    }

    pub fn octet(&self) -> Option<Octet> {
        self.decoded.map(|d| d.octet)
    }

    /// The decoded value with the control flag in bit 8, or zero for an
    /// illegal codeword.
    pub fn value(&self) -> u16 {
        self.octet().map_or(0, Octet::raw)
    }

    pub fn is_valid(&self) -> bool {
        self.decoded.is_some()
    }

    /// The disparity class of the matched codeword.
    pub fn disparity(&self) -> Option<Disparity> {
        self.decoded.map(|d| d.disparity)
    }

    pub fn name(&self) -> Option<SymbolName> {
        let octet = self.octet()?;
        let name = table::name(octet);
        debug_assert!(name.is_some(), "table entry {octet:?} has no name");
        name
    }
}

/// Drops idle ordered sets from a symbol stream.
///
/// A symbol is idle if it is K28.5, or D10.2 or D19.5 directly after K28.5.
/// Every symbol must be shown to the filter, emitted or not, so it can track
/// what came before.
#[derive(Debug, Clone)]
pub struct IdleFilter {
    enabled: bool,
    after_comma: bool,
}

impl IdleFilter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            after_comma: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a symbol should be emitted.
    pub fn admit(&mut self, symbol: &Symbol) -> bool {
        let octet = symbol.octet();

        let idle = match octet {
            Some(Octet::K28_5) => true,
            Some(Octet::D10_2 | Octet::D19_5) => self.after_comma,
            _ => false,
        };

        self.after_comma = octet == Some(Octet::K28_5);

        !(self.enabled && idle)
    }
}
