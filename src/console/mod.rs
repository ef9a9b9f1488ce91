//! Console front-end
//!
//! A line-oriented stand-in for the presentation layer: reads commands,
//! drives a `GameSession`, prints the resulting state.

pub mod protocol;

pub use protocol::Console;
