//! Internal finite-state machine for implementing decoders.
//!
//! This module is intended for applications that recover bits themselves, or
//! need control over how symbols are consumed. See [`crate::avec`] for drivers
//! that sample a captured channel and publish symbols.
//!
//! # Architecture
//!
//! Synchronization is represented by two state tokens. Feed recovered bits to
//! the initial state, re-exported as [`Decoder`], by calling its `advance`
//! method. Once a K28.5 comma fills the window, it returns the comma decoded
//! as a [`symbol::Symbol`] along with a [`sync::Synchronized`] token, which
//! then returns a symbol for every ten bits advanced. There is no transition
//! back: a dropped or repeated bit after lock shows up only as a run of
//! [`symbol::Kind::Error`] symbols.
//!
//! The synchronized state owns the running disparity [`disparity::Validator`]
//! and annotates each symbol with any violation. Decoding never fails; illegal
//! codewords and disparity violations are data.
//!
//! Some parts of a decoder are not represented in the state machine and must
//! be written carefully:
//!
//! - Sampling bits at their centres. A software clock recovery over an edge
//! channel is provided in [`crate::avec::sampler`].
//!
//! - Dropping idle characters. Pass every symbol through a
//! [`symbol::IdleFilter`], including those not emitted.
//!
//! - Starting afresh for each capture. Tokens must not be reused across
//! unrelated captures.

pub mod disparity;
pub mod symbol;
pub mod sync;
pub mod table;
pub mod window;

/// Entrypoint to the finite-state machine.
pub type Decoder = sync::Unsynchronized;
