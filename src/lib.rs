#![no_std]

//! A symbol decoder for 8b/10b line-coded serial captures.
//!
//! Disparate recovers bits from a captured digital channel, aligns to the
//! K28.5 comma, and decodes each ten-bit codeword into a data or control
//! octet, checking running disparity along the way. Illegal codewords and
//! disparity violations are reported alongside the symbols rather than
//! stopping the decode.
//!
//! Most users should begin with the functions and derive macro in the [`avec`]
//! module. Applications recovering bits themselves (such as those running on
//! embedded systems) can drive the finite-state machine described in the
//! [`sans`] module directly. Run parameters are held in
//! [`settings::Settings`].
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable collecting symbols into a `Vec` (default).

#[cfg(feature = "std")]
extern crate std;

pub mod avec;
pub mod sans;
pub mod settings;
