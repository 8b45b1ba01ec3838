//! Typed decimal wrappers used throughout the engine.

mod types;

pub use types::*;
