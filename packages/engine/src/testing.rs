//! Snapshot builders shared by the unit tests.
//!
//! `reserve` produces a benign reserve no default test trips over: flat unit
//! price, roomy limits, no fees. Tests tighten the field they exercise.

use crate::prelude::*;

pub(crate) fn dec(src: &str) -> Decimal256 {
    src.parse().unwrap()
}

pub(crate) fn tokens(src: &str) -> TokenAmount {
    src.parse().unwrap()
}

pub(crate) fn usd(src: &str) -> Usd {
    src.parse().unwrap()
}

pub(crate) fn reserve(coin_type: &str) -> ReserveSnapshot {
    ReserveSnapshot {
        coin_type: coin_type.into(),
        mint_decimals: 9,
        price: PriceBounds::flat(Decimal256::one()),
        available_amount: tokens("1000"),
        borrowed_amount: TokenAmount::zero(),
        total_deposits: TokenAmount::zero(),
        deposit_apr_pct: Decimal256::zero(),
        config: ReserveConfig {
            open_ltv_pct: dec("50"),
            borrow_weight_bps: 10_000,
            borrow_fee_bps: 0,
            deposit_limit: tokens("1000000000"),
            deposit_limit_usd: usd("1000000000"),
            borrow_limit: tokens("1000000000"),
        },
        rate_limiter: RateLimiter {
            remaining_outflow_usd: usd("1000000000000"),
        },
    }
}

pub(crate) fn obligation() -> ObligationSnapshot {
    obligation_with(&[], &[], "0", "0", "0")
}

pub(crate) fn obligation_with(
    deposits: &[(&str, &str)],
    borrows: &[(&str, &str)],
    borrow_limit_usd: &str,
    weighted_borrow_usd: &str,
    total_borrow_usd: &str,
) -> ObligationSnapshot {
    ObligationSnapshot::new(
        deposits
            .iter()
            .map(|&(coin_type, amount)| DepositPosition {
                coin_type: coin_type.into(),
                deposited_amount: tokens(amount),
            })
            .collect(),
        borrows
            .iter()
            .map(|&(coin_type, amount)| BorrowPosition {
                coin_type: coin_type.into(),
                borrowed_amount: tokens(amount),
            })
            .collect(),
        usd(borrow_limit_usd),
        usd(weighted_borrow_usd),
        usd(total_borrow_usd),
    )
    .unwrap()
}

pub(crate) fn wallet(balances: &[(&str, &str)]) -> WalletBalances {
    balances
        .iter()
        .map(|&(coin_type, amount)| (coin_type.into(), tokens(amount)))
        .collect()
}
