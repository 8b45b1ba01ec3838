//! Position safety and limit engine for the Breakwater money market.
//!
//! Given immutable reserve and obligation snapshots supplied by the caller,
//! the engine computes, for each of the four user actions (deposit, withdraw,
//! borrow, repay):
//!
//! * an ordered list of named ceiling constraints and the maximum actionable
//!   amount they reduce to,
//! * a projected post-action borrow limit and utilization,
//! * a submit-eligibility decision carrying the first violated constraint,
//!
//! plus a classifier that flags looped (self-referential) positions across
//! the full obligation.
//!
//! Every computation is a pure function of its inputs: no I/O, no storage,
//! no shared mutable state. All arithmetic is `Decimal256` based and checked.
#![deny(missing_docs)]
#![deny(clippy::as_conversions)]

pub mod action;
pub mod constants;
pub mod constraint;
pub mod error;
pub mod gate;
/// Feature-gated logging functionality
pub mod log;
pub mod looping;
pub mod market;
/// Number types and helpers
pub mod number;
/// Exports very commonly used items into the prelude glob
pub mod prelude;
pub mod price;
pub mod projection;

#[cfg(test)]
pub(crate) mod testing;
