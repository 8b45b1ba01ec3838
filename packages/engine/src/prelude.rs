//! Common imports for the whole crate and its consumers.
//!
//! Deliberately not batteries-included: only the types that show up in
//! nearly every use of the engine live here.

pub use crate::action::Action;
pub use crate::constraint::{evaluate_constraints, Constraint, ConstraintKind, ConstraintList};
pub use crate::error::EngineError;
pub use crate::gate::{check_submit, SubmitDecision};
pub use crate::looping::{classify_loops, LoopPair};
pub use crate::market::{
    BorrowPosition, CoinType, DepositPosition, ObligationSnapshot, RateLimiter, ReserveConfig,
    ReserveSnapshot, WalletBalances,
};
pub use crate::number::{TokenAmount, UnsignedDecimal, Usd};
pub use crate::price::PriceBounds;
pub use crate::projection::{project_after_action, Projection};
pub use crate::{debug_log, debug_log_any};
pub use anyhow::{anyhow, bail, Context, Result};
pub use cosmwasm_schema::cw_serde;
pub use cosmwasm_std::{Decimal256, Uint256};
pub use std::fmt::Display;
pub use std::str::FromStr;
