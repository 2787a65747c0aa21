//! Nullable infrastructure for deterministic testing.
//!
//! The ledger takes the block time of every call as a parameter; tests use
//! these stand-ins instead of the system clock so timestamps are exact and
//! controllable.

pub mod clock;

pub use clock::NullClock;
