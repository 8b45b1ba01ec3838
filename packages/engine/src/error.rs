//! Error handling helpers for the limit engine.
//!
//! Domain edge cases (zero divisors, missing obligations, empty input) never
//! error; they resolve to documented sentinels. [EngineError] is reserved for
//! snapshots that violate their own invariants, and `anyhow` carries any
//! arithmetic overflow up from the evaluation paths.

use cosmwasm_std::Decimal256;

use crate::market::CoinType;

/// A broken snapshot invariant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An obligation carried more than one position per coin type.
    #[error("duplicate {side} position for coin type {coin_type}")]
    DuplicatePosition {
        /// Which position list the duplicate was found in.
        side: &'static str,
        /// The offending coin type.
        coin_type: CoinType,
    },
    /// Price bounds must satisfy `lower <= spot <= upper`.
    #[error("price bounds out of order: lower {lower}, spot {spot}, upper {upper}")]
    InvertedPriceBounds {
        /// Conservative lower bound.
        lower: Decimal256,
        /// Spot price.
        spot: Decimal256,
        /// Conservative upper bound.
        upper: Decimal256,
    },
    /// Open LTV is a percentage and cannot exceed 100.
    #[error("open LTV must be at most 100%, got {pct}%")]
    LtvOutOfRange {
        /// The rejected percentage.
        pct: Decimal256,
    },
}
