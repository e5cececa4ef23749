//! Core types for deepsearch.

pub mod generation;
pub mod message;

pub use generation::*;
pub use message::*;
