//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module sample a captured channel and publish decoded
//! symbols to the [`FromSymbols`] trait. Iterate a [`decode::Symbols`] instead
//! to pull symbols one at a time, or to stop part way through a capture.
//!
//! In many cases, the receiver can be derived. See the
//! [`FromSymbols`](macro@FromSymbols) macro for details.

pub mod decode;
pub mod edges;
pub mod sampler;

pub use decode::decode as decode_channel;

use crate::sans::symbol::{Kind, Symbol};

/// Derive [`FromSymbols`] for a struct collecting decoded symbols.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// Add the `symbols(K)` attribute to a struct field, where `K` is one of
/// `data`, `control`, or `error`. A `Vec<Symbol>` field collects every symbol
/// of that kind, while an `Option<Symbol>` field keeps the latest one. Several
/// fields may receive the same kind.
///
/// ```
/// #[derive(Debug, Default, FromSymbols)]
/// struct Capture {
///     #[symbols(data)]
///     data: Vec<Symbol>,
///     #[symbols(control)]
///     last_control: Option<Symbol>,
///     #[symbols(error)]
///     errors: Vec<Symbol>,
/// }
/// ```
///
/// To receive into other types, supply an accumulator closure. Since the
/// symbol type cannot be inferred, the second argument must be typed.
///
/// ```
/// #[derive(Debug, Default, FromSymbols)]
/// struct Payload {
///     #[symbols(data, |v, s: Symbol| v.push(s.octet().map_or(0, |o| o.byte())))]
///     bytes: Vec<u8>,
///     #[symbols(error, |n, _: Symbol| *n += 1)]
///     errors: usize,
/// }
/// ```
#[cfg(feature = "derive")]
pub use disparate_derive::FromSymbols;

/// Receive decoded symbols.
///
/// Symbols are dispatched by kind to [`add_data`](FromSymbols::add_data),
/// [`add_control`](FromSymbols::add_control), and
/// [`add_error`](FromSymbols::add_error). The default implementation of each
/// method ignores received symbols.
///
/// See the [`FromSymbols`](macro@FromSymbols) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromSymbols {
    /// Add a symbol of any kind.
    fn add_symbol(&mut self, symbol: Symbol) {
        match symbol.kind {
            Kind::Data => self.add_data(symbol),
            Kind::Control => self.add_control(symbol),
            Kind::Error => self.add_error(symbol),
        }
    }

    /// Add a data symbol.
    fn add_data(&mut self, symbol: Symbol) {}
    /// Add a control symbol.
    fn add_control(&mut self, symbol: Symbol) {}
    /// Add a symbol holding an illegal codeword.
    fn add_error(&mut self, symbol: Symbol) {}
}

#[cfg(feature = "std")]
impl FromSymbols for std::vec::Vec<Symbol> {
    fn add_symbol(&mut self, symbol: Symbol) {
        self.push(symbol);
    }
}
