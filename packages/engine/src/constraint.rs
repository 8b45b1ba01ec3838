//! Ceiling constraints per action and their reduction to a maximum amount.
//!
//! Each action produces an **ordered** list of named ceilings. The ordering
//! is part of the API contract: the submit gate surfaces the first violated
//! entry, so the order here decides which reason the user sees when several
//! constraints are violated at once.

use crate::constants::{NATIVE_GAS_COIN, NATIVE_GAS_MIN};
#[cfg(feature = "debug_log")]
use crate::log::DebugLog;
use crate::number::{TokenAmount, UnsignedDecimal, Usd};
use crate::prelude::*;

/// Names every ceiling the engine produces, across all four actions.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum ConstraintKind {
    /// The wallet does not hold enough of the asset.
    InsufficientBalance,
    /// The reserve's token-denominated deposit cap, less the stale-snapshot
    /// growth margin.
    DepositLimit,
    /// The reserve's USD-denominated deposit cap, converted at the upper
    /// price bound.
    DepositLimitUsd,
    /// Native gas token must keep a minimum balance for transaction fees.
    GasReserve,
    /// Cannot withdraw more than is deposited.
    ExceedsDeposited,
    /// The reserve does not hold enough spare liquidity.
    InsufficientLiquidity,
    /// The position would no longer cover its weighted borrows.
    Undercollateralized,
    /// The protocol-wide outflow rate limit.
    OutflowLimit,
    /// The reserve's cap on total borrows.
    ReserveBorrowLimit,
    /// The obligation's remaining borrow headroom.
    PositionBorrowLimit,
    /// Cannot repay more than is owed.
    OutstandingDebt,
}

impl ConstraintKind {
    /// Whether violating this ceiling blocks submission outright.
    ///
    /// The outflow limit is a soft warning: the budget is a rolling window
    /// shared by all users and frees up on its own.
    pub fn is_hard_block(&self) -> bool {
        !matches!(self, ConstraintKind::OutflowLimit)
    }
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            ConstraintKind::InsufficientBalance => "Insufficient balance",
            ConstraintKind::DepositLimit => "Reserve deposit limit reached",
            ConstraintKind::DepositLimitUsd => "Reserve USD deposit limit reached",
            ConstraintKind::GasReserve => "Keep a minimum native balance for gas",
            ConstraintKind::ExceedsDeposited => "Amount exceeds deposited amount",
            ConstraintKind::InsufficientLiquidity => "Insufficient reserve liquidity",
            ConstraintKind::Undercollateralized => "Position would become undercollateralized",
            ConstraintKind::OutflowLimit => "Protocol outflow rate limit reached",
            ConstraintKind::ReserveBorrowLimit => "Reserve borrow limit reached",
            ConstraintKind::PositionBorrowLimit => "Position borrow limit exceeded",
            ConstraintKind::OutstandingDebt => "Amount exceeds outstanding debt",
        })
    }
}

/// One named ceiling: a non-negative upper bound on the action amount.
#[cw_serde]
#[derive(Copy, Eq)]
pub struct Constraint {
    /// Which ceiling this is.
    pub kind: ConstraintKind,
    /// The bound itself, in the reserve's token units. [TokenAmount::MAX]
    /// marks a ceiling that cannot bind.
    pub ceiling: TokenAmount,
}

/// An ordered list of ceilings for one action on one reserve.
///
/// Order is significant and matches the order the constructors emit; see the
/// module docs.
#[cw_serde]
#[derive(Eq)]
pub struct ConstraintList(Vec<Constraint>);

impl ConstraintList {
    /// Iterate the ceilings in their defined order.
    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.0.iter()
    }

    /// The ceilings as a slice.
    pub fn as_slice(&self) -> &[Constraint] {
        &self.0
    }

    /// The first ceiling (in defined order) strictly exceeded by `amount`.
    pub fn first_violated(&self, amount: TokenAmount) -> Option<&Constraint> {
        self.0.iter().find(|c| amount > c.ceiling)
    }

    /// Reduce to the maximum actionable amount: the least ceiling, truncated
    /// (never rounded) to `mint_decimals`.
    ///
    /// Truncation direction is a hard invariant: overestimating the maximum
    /// produces on-chain transactions that revert.
    pub fn compute_max(&self, mint_decimals: u32) -> TokenAmount {
        let max = self
            .0
            .iter()
            .map(|c| c.ceiling)
            .min()
            .unwrap_or_else(TokenAmount::zero);
        max.floor_with_precision(mint_decimals)
    }
}

impl From<Vec<Constraint>> for ConstraintList {
    fn from(src: Vec<Constraint>) -> Self {
        ConstraintList(src)
    }
}

/// Produce the ordered ceiling list for an action.
///
/// A missing obligation is valid input: position-dependent ceilings fall
/// back to zero-valued aggregates.
pub fn evaluate_constraints(
    action: Action,
    reserve: &ReserveSnapshot,
    obligation: Option<&ObligationSnapshot>,
    wallet: &WalletBalances,
) -> Result<ConstraintList> {
    let list = match action {
        Action::Deposit => deposit_constraints(reserve, wallet)?,
        Action::Withdraw => withdraw_constraints(reserve, obligation)?,
        Action::Borrow => borrow_constraints(reserve, obligation)?,
        Action::Repay => repay_constraints(reserve, obligation, wallet),
    };
    debug_log!(
        DebugLog::ConstraintCeilings,
        "{action} on {}: {} ceilings",
        reserve.coin_type,
        list.as_slice().len()
    );
    Ok(list)
}

fn deposit_constraints(
    reserve: &ReserveSnapshot,
    wallet: &WalletBalances,
) -> Result<ConstraintList> {
    let balance = wallet.balance(&reserve.coin_type);

    // Project ten minutes of APR growth onto current deposits so a stale
    // snapshot cannot make us overshoot the cap.
    let growth_factor = Decimal256::one()
        .checked_add(reserve.ten_minute_apr_margin()?)
        .context("deposit growth factor overflowed")?;
    let projected_deposits = reserve.total_deposits.checked_mul_dec(growth_factor)?;

    let limit_tokens = reserve
        .config
        .deposit_limit
        .checked_sub(projected_deposits)
        .unwrap_or_default();

    let projected_deposits_usd = reserve.price.value_upper(projected_deposits)?;
    let headroom_usd = reserve
        .config
        .deposit_limit_usd
        .checked_sub(projected_deposits_usd)
        .unwrap_or_default();
    let limit_usd_tokens = reserve
        .price
        .amount_upper(headroom_usd)?
        .unwrap_or(TokenAmount::MAX);

    Ok(vec![
        Constraint {
            kind: ConstraintKind::InsufficientBalance,
            ceiling: balance,
        },
        Constraint {
            kind: ConstraintKind::DepositLimit,
            ceiling: limit_tokens,
        },
        Constraint {
            kind: ConstraintKind::DepositLimitUsd,
            ceiling: limit_usd_tokens,
        },
        Constraint {
            kind: ConstraintKind::GasReserve,
            ceiling: gas_reserve_ceiling(reserve, balance),
        },
    ]
    .into())
}

fn withdraw_constraints(
    reserve: &ReserveSnapshot,
    obligation: Option<&ObligationSnapshot>,
) -> Result<ConstraintList> {
    let deposited = obligation
        .map(|ob| ob.deposited_amount(&reserve.coin_type))
        .unwrap_or_default();

    let liquidity = reserve
        .available_amount
        .checked_sub(reserve.liquidity_floor())
        .unwrap_or_default();

    let health = withdraw_health_ceiling(reserve, obligation)?;

    let outflow = reserve
        .price
        .amount_upper(reserve.rate_limiter.remaining_outflow_usd)?
        .unwrap_or(TokenAmount::MAX);

    Ok(vec![
        Constraint {
            kind: ConstraintKind::ExceedsDeposited,
            ceiling: deposited,
        },
        Constraint {
            kind: ConstraintKind::InsufficientLiquidity,
            ceiling: liquidity,
        },
        Constraint {
            kind: ConstraintKind::Undercollateralized,
            ceiling: health,
        },
        Constraint {
            kind: ConstraintKind::OutflowLimit,
            ceiling: outflow,
        },
    ]
    .into())
}

/// How much of this asset can leave the position before weighted borrows no
/// longer fit under the borrow limit.
///
/// Uses the lower price bound and the open (not close) LTV, both the more
/// conservative choice for an outgoing deposit. An asset with zero LTV or a
/// zero lower bound contributes nothing to the borrow limit, so removing it
/// cannot hurt the position and the ceiling is unbounded.
fn withdraw_health_ceiling(
    reserve: &ReserveSnapshot,
    obligation: Option<&ObligationSnapshot>,
) -> Result<TokenAmount> {
    let (limit, weighted) = borrow_aggregates(obligation);
    if weighted > limit {
        return Ok(TokenAmount::zero());
    }
    let headroom_usd = limit
        .checked_sub(weighted)
        .context("withdraw headroom underflowed")?;

    let open_ltv = reserve.config.open_ltv();
    if open_ltv.is_zero() {
        return Ok(TokenAmount::MAX);
    }
    match reserve.price.amount_lower(headroom_usd)? {
        Some(tokens) => tokens.checked_div_dec(open_ltv),
        None => Ok(TokenAmount::MAX),
    }
}

fn borrow_constraints(
    reserve: &ReserveSnapshot,
    obligation: Option<&ObligationSnapshot>,
) -> Result<ConstraintList> {
    // The fee is charged on top of the requested amount, so every ceiling
    // shrinks by the fee factor.
    let fee_factor = Decimal256::one()
        .checked_add(reserve.config.borrow_fee())
        .context("borrow fee factor overflowed")?;

    let liquidity = reserve.available_amount.checked_div_dec(fee_factor)?;

    let reserve_limit = reserve
        .config
        .borrow_limit
        .checked_sub(reserve.borrowed_amount)
        .unwrap_or_default()
        .checked_div_dec(fee_factor)?;

    let position_headroom =
        borrow_position_headroom(reserve, obligation)?.checked_div_dec(fee_factor)?;

    let outflow = reserve
        .price
        .amount_upper(reserve.rate_limiter.remaining_outflow_usd)?
        .unwrap_or(TokenAmount::MAX)
        .checked_div_dec(fee_factor)?;

    Ok(vec![
        Constraint {
            kind: ConstraintKind::InsufficientLiquidity,
            ceiling: liquidity,
        },
        Constraint {
            kind: ConstraintKind::ReserveBorrowLimit,
            ceiling: reserve_limit,
        },
        Constraint {
            kind: ConstraintKind::PositionBorrowLimit,
            ceiling: position_headroom,
        },
        Constraint {
            kind: ConstraintKind::OutflowLimit,
            ceiling: outflow,
        },
    ]
    .into())
}

/// Remaining borrow headroom in this asset's units, valued at the upper
/// price bound times the borrow weight (both conservative for new debt).
fn borrow_position_headroom(
    reserve: &ReserveSnapshot,
    obligation: Option<&ObligationSnapshot>,
) -> Result<TokenAmount> {
    let (limit, weighted) = borrow_aggregates(obligation);
    if weighted > limit {
        return Ok(TokenAmount::zero());
    }
    let headroom_usd = limit
        .checked_sub(weighted)
        .context("borrow headroom underflowed")?;

    let divisor = reserve
        .price
        .upper
        .checked_mul(reserve.config.borrow_weight())
        .context("borrow headroom divisor overflowed")?;
    if divisor.is_zero() {
        return Ok(TokenAmount::MAX);
    }
    headroom_usd
        .into_decimal256()
        .checked_div(divisor)
        .map(TokenAmount::from_decimal256)
        .context("borrow headroom division overflowed")
}

fn repay_constraints(
    reserve: &ReserveSnapshot,
    obligation: Option<&ObligationSnapshot>,
    wallet: &WalletBalances,
) -> ConstraintList {
    let balance = wallet.balance(&reserve.coin_type);
    let outstanding = obligation
        .map(|ob| ob.borrowed_amount(&reserve.coin_type))
        .unwrap_or_default();

    vec![
        Constraint {
            kind: ConstraintKind::InsufficientBalance,
            ceiling: balance,
        },
        Constraint {
            kind: ConstraintKind::OutstandingDebt,
            ceiling: outstanding,
        },
        Constraint {
            kind: ConstraintKind::GasReserve,
            ceiling: gas_reserve_ceiling(reserve, balance),
        },
    ]
    .into()
}

/// For the native gas token, the wallet balance less the reserved gas
/// minimum; unbounded for every other asset.
fn gas_reserve_ceiling(reserve: &ReserveSnapshot, balance: TokenAmount) -> TokenAmount {
    if reserve.coin_type.as_str() == NATIVE_GAS_COIN {
        balance.checked_sub(*NATIVE_GAS_MIN).unwrap_or_default()
    } else {
        TokenAmount::MAX
    }
}

fn borrow_aggregates(obligation: Option<&ObligationSnapshot>) -> (Usd, Usd) {
    obligation
        .map(|ob| {
            (
                ob.min_price_borrow_limit_usd,
                ob.max_price_total_weighted_borrow_usd,
            )
        })
        .unwrap_or_default()
}
