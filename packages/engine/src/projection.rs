//! Post-action projections of the obligation's borrow limit and utilization.

#[cfg(feature = "debug_log")]
use crate::log::DebugLog;
use crate::number::{TokenAmount, UnsignedDecimal, Usd};
use crate::prelude::*;

/// Projected position health after a candidate action.
///
/// `None` fields mean "not computable" (empty input, non-numeric input,
/// missing obligation, or a zero divisor), never zero.
#[cw_serde]
#[derive(Copy, Eq, Default)]
pub struct Projection {
    /// The borrow limit after the action, where the action changes it.
    pub new_borrow_limit: Option<Usd>,
    /// Weighted borrows over the borrow limit after the action, clamped to
    /// `[0, 1]`.
    pub new_utilization: Option<Decimal256>,
}

/// Project the obligation's borrow limit and utilization after applying
/// `amount` of `action` against `reserve`.
pub fn project_after_action(
    action: Action,
    reserve: &ReserveSnapshot,
    obligation: Option<&ObligationSnapshot>,
    amount: &str,
) -> Result<Projection> {
    let obligation = match obligation {
        Some(obligation) => obligation,
        None => return Ok(Projection::default()),
    };
    let amount = match TokenAmount::parse_input(amount) {
        Some(amount) => amount,
        None => return Ok(Projection::default()),
    };

    let limit = obligation.min_price_borrow_limit_usd;
    let weighted = obligation.max_price_total_weighted_borrow_usd;

    let projection = match action {
        Action::Deposit => {
            let delta = collateral_delta(reserve, amount)?;
            let new_limit = limit.checked_add(delta).context("borrow limit overflowed")?;
            Projection {
                new_borrow_limit: Some(new_limit),
                new_utilization: utilization(weighted, new_limit)?,
            }
        }
        Action::Withdraw => {
            let delta = collateral_delta(reserve, amount)?;
            let new_limit = limit.checked_sub(delta).unwrap_or_default();
            Projection {
                new_borrow_limit: Some(new_limit),
                new_utilization: utilization(weighted, new_limit)?,
            }
        }
        Action::Borrow => {
            // borrowing does not change the borrow limit, only what is
            // weighed against it
            let added = reserve
                .price
                .value_upper(amount)?
                .checked_mul_dec(reserve.config.borrow_weight())?;
            let new_weighted = weighted
                .checked_add(added)
                .context("weighted borrow overflowed")?;
            Projection {
                new_borrow_limit: None,
                new_utilization: utilization(new_weighted, limit)?,
            }
        }
        Action::Repay => {
            let repaid = reserve
                .price
                .value_upper(amount)?
                .checked_mul_dec(reserve.config.borrow_fee())?;
            let new_borrow = obligation
                .total_borrow_usd
                .checked_sub(repaid)
                .unwrap_or_default();
            Projection {
                new_borrow_limit: None,
                new_utilization: utilization(new_borrow, limit)?,
            }
        }
    };
    debug_log!(
        DebugLog::ProjectionResult,
        "{action} {amount} on {}: {projection:?}",
        reserve.coin_type
    );
    Ok(projection)
}

/// USD the amount adds to (or removes from) the borrow limit: valued at the
/// lower price bound and scaled by the open LTV.
fn collateral_delta(reserve: &ReserveSnapshot, amount: TokenAmount) -> Result<Usd> {
    reserve
        .price
        .value_lower(amount)?
        .checked_mul_dec(reserve.config.open_ltv())
}

fn utilization(weighted: Usd, limit: Usd) -> Result<Option<Decimal256>> {
    if limit.is_zero() {
        return Ok(None);
    }
    let ratio = weighted
        .into_decimal256()
        .checked_div(limit.into_decimal256())
        .context("utilization overflowed")?;
    Ok(Some(ratio.min(Decimal256::one())))
}
