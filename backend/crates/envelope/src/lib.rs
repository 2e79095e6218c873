//! Shared response envelope and outcome primitives.
//!
//! Everything in this crate is a total function over in-memory values: no
//! I/O, no logging, no failure modes. The service crate composes these
//! pieces with translation and route metadata so every HTTP and GraphQL
//! response is shaped the same way.

pub mod outcome;
pub mod payload;
pub mod wire;

pub use outcome::OutcomeKey;
pub use payload::{Classified, classify, declare, unwrap_declared};
pub use wire::{GraphQlEnvelope, HttpEnvelope};
