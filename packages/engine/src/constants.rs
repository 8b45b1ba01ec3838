//! Protocol-wide constants consumed by the limit engine.

use std::collections::BTreeSet;

use cosmwasm_std::Decimal256;
use once_cell::sync::Lazy;

use crate::market::CoinType;
use crate::number::{TokenAmount, UnsignedDecimal};

/// Coin type of the chain's native gas token.
pub const NATIVE_GAS_COIN: &str = "0x2::sui::SUI";

/// Raw (integer) units left in a reserve on withdrawal so it is never
/// drained to exactly zero. Converted by the reserve's `mint_decimals`.
pub const AVAILABLE_AMOUNT_FLOOR_RAW: u128 = 100;

/// Length of the stale-snapshot safety window applied to deposit limits.
///
/// Snapshots are refreshed on a polling cycle; by the time a transaction
/// lands on chain, deposits may have grown by up to this much APR time.
pub const MARGIN_WINDOW_MS: u64 = 600_000;

/// Milliseconds per Julian year, the denominator for APR proration.
pub const MS_PER_YEAR: u64 = 31_556_952_000;

/// Minimum native-token balance kept back for transaction fees when
/// depositing or repaying with the gas token itself.
pub static NATIVE_GAS_MIN: Lazy<TokenAmount> =
    Lazy::new(|| TokenAmount::from_decimal256(Decimal256::from_ratio(5u32, 100u32)));

/// A deposit position at or below this size is treated as dust by the
/// borrow same-asset pre-check.
pub static DUST_THRESHOLD: Lazy<TokenAmount> =
    Lazy::new(|| TokenAmount::from_decimal256(Decimal256::from_ratio(1u32, 1_000_000u32)));

/// Recognized stablecoins. Deposits and borrows across this set are treated
/// as economically fungible by the looping classifier.
pub static STABLECOINS: Lazy<BTreeSet<CoinType>> = Lazy::new(|| {
    ["0x2::usdc::USDC", "0x2::usdt::USDT", "0x2::ausd::AUSD"]
        .into_iter()
        .map(CoinType::new)
        .collect()
});

/// Whether the given coin type is a recognized stablecoin.
pub fn is_stablecoin(coin_type: &CoinType) -> bool {
    STABLECOINS.contains(coin_type)
}
