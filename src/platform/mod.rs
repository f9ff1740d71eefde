//! Platform abstraction layer
//!
//! Handles browser/native differences for input events.

pub mod input;

pub use input::KeyAction;
