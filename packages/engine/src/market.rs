//! Immutable market snapshots the engine computes over.
//!
//! All types here are owned by the external data-fetch layer: it parses
//! on-chain state into decimal-converted values, hands one consistent
//! snapshot reference per invocation, and replaces snapshots wholesale on
//! its refresh cycle. The engine never mutates them.

use std::collections::BTreeMap;

use crate::constants::AVAILABLE_AMOUNT_FLOOR_RAW;
use crate::error::EngineError;
use crate::number::{TokenAmount, UnsignedDecimal, Usd};
use crate::prelude::*;

/// Unique key for a listed asset.
#[cw_serde]
#[derive(Eq, PartialOrd, Ord, Hash)]
pub struct CoinType(String);

impl CoinType {
    /// Wrap a coin type string.
    pub fn new(src: impl Into<String>) -> Self {
        CoinType(src.into())
    }

    /// The underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CoinType {
    fn from(src: &str) -> Self {
        CoinType::new(src)
    }
}

/// Per-reserve risk configuration, set by protocol governance.
#[cw_serde]
pub struct ReserveConfig {
    /// Open LTV as a percentage (0-100): how much borrow power a deposit
    /// of this asset contributes.
    pub open_ltv_pct: Decimal256,
    /// Borrow weight in basis points: multiplier applied to this asset's
    /// borrowed USD value in risk calculations.
    pub borrow_weight_bps: u32,
    /// Fee charged on top of a borrow, in basis points.
    pub borrow_fee_bps: u32,
    /// Cap on total deposits, in token units.
    pub deposit_limit: TokenAmount,
    /// Cap on total deposits, in USD.
    pub deposit_limit_usd: Usd,
    /// Cap on total borrows, in token units.
    pub borrow_limit: TokenAmount,
}

impl ReserveConfig {
    /// Open LTV as a ratio in `[0, 1]`.
    pub fn open_ltv(&self) -> Decimal256 {
        self.open_ltv_pct / Decimal256::from_ratio(100u32, 1u32)
    }

    /// Borrow weight as a ratio.
    pub fn borrow_weight(&self) -> Decimal256 {
        Decimal256::from_ratio(self.borrow_weight_bps, 10_000u32)
    }

    /// Borrow fee as a ratio.
    pub fn borrow_fee(&self) -> Decimal256 {
        Decimal256::from_ratio(self.borrow_fee_bps, 10_000u32)
    }

    /// Check configuration invariants.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.open_ltv_pct > Decimal256::from_ratio(100u32, 1u32) {
            return Err(EngineError::LtvOutOfRange {
                pct: self.open_ltv_pct,
            });
        }
        Ok(())
    }
}

/// Protocol-wide rolling outflow budget, shared across all reserves.
#[cw_serde]
#[derive(Copy)]
pub struct RateLimiter {
    /// USD value still allowed to leave the protocol in the current window.
    pub remaining_outflow_usd: Usd,
}

/// One listed asset's full state, refreshed wholesale each data cycle.
#[cw_serde]
pub struct ReserveSnapshot {
    /// Unique asset key.
    pub coin_type: CoinType,
    /// Decimal places of the underlying mint; maxima are truncated to this.
    pub mint_decimals: u32,
    /// Oracle price bounds.
    pub price: PriceBounds,
    /// Liquidity currently available for withdrawal or borrowing.
    pub available_amount: TokenAmount,
    /// Total outstanding borrows from this reserve.
    pub borrowed_amount: TokenAmount,
    /// Total deposits held by this reserve.
    pub total_deposits: TokenAmount,
    /// Current deposit APR as a percentage, input to the stale-snapshot
    /// margin on the deposit limit.
    pub deposit_apr_pct: Decimal256,
    /// Governance risk parameters.
    pub config: ReserveConfig,
    /// Shared protocol outflow budget.
    pub rate_limiter: RateLimiter,
}

impl ReserveSnapshot {
    /// The withdrawal floor in token units: [AVAILABLE_AMOUNT_FLOOR_RAW] raw
    /// units scaled by this reserve's `mint_decimals`.
    pub fn liquidity_floor(&self) -> TokenAmount {
        // exponent capped so the power of ten stays within Uint256
        let scale = Uint256::from_u128(10).pow(self.mint_decimals.min(76));
        TokenAmount::from_decimal256(Decimal256::from_ratio(AVAILABLE_AMOUNT_FLOOR_RAW, scale))
    }

    /// Projected deposit growth over the stale-snapshot window, as a ratio
    /// to add to 1. See [crate::constants::MARGIN_WINDOW_MS].
    pub fn ten_minute_apr_margin(&self) -> Result<Decimal256> {
        let window = Decimal256::from_ratio(
            crate::constants::MARGIN_WINDOW_MS,
            crate::constants::MS_PER_YEAR,
        );
        self.deposit_apr_pct
            .checked_mul(window)
            .map(|x| x / Decimal256::from_ratio(100u32, 1u32))
            .with_context(|| format!("APR margin overflowed on {}", self.deposit_apr_pct))
    }
}

/// A collateral position within an obligation.
#[cw_serde]
pub struct DepositPosition {
    /// The deposited asset.
    pub coin_type: CoinType,
    /// Deposited amount, in token units.
    pub deposited_amount: TokenAmount,
}

/// A debt position within an obligation.
#[cw_serde]
pub struct BorrowPosition {
    /// The borrowed asset.
    pub coin_type: CoinType,
    /// Outstanding borrowed amount, in token units.
    pub borrowed_amount: TokenAmount,
}

/// One user sub-account: its positions plus precomputed USD aggregates.
#[cw_serde]
pub struct ObligationSnapshot {
    /// Collateral positions, at most one per coin type.
    pub deposits: Vec<DepositPosition>,
    /// Debt positions, at most one per coin type.
    pub borrows: Vec<BorrowPosition>,
    /// Borrow limit: deposited USD values at the lower price bound, each
    /// weighted by its open LTV.
    pub min_price_borrow_limit_usd: Usd,
    /// Weighted borrows: borrowed USD values at the upper price bound, each
    /// multiplied by its borrow weight.
    pub max_price_total_weighted_borrow_usd: Usd,
    /// Unweighted total borrowed USD value.
    pub total_borrow_usd: Usd,
}

impl ObligationSnapshot {
    /// Construct an obligation, validating the one-position-per-coin-type
    /// invariant.
    pub fn new(
        deposits: Vec<DepositPosition>,
        borrows: Vec<BorrowPosition>,
        min_price_borrow_limit_usd: Usd,
        max_price_total_weighted_borrow_usd: Usd,
        total_borrow_usd: Usd,
    ) -> Result<Self, EngineError> {
        check_unique(deposits.iter().map(|p| &p.coin_type), "deposit")?;
        check_unique(borrows.iter().map(|p| &p.coin_type), "borrow")?;
        Ok(ObligationSnapshot {
            deposits,
            borrows,
            min_price_borrow_limit_usd,
            max_price_total_weighted_borrow_usd,
            total_borrow_usd,
        })
    }

    /// Deposited amount for a coin type, zero when no position exists.
    pub fn deposited_amount(&self, coin_type: &CoinType) -> TokenAmount {
        self.deposits
            .iter()
            .find(|p| &p.coin_type == coin_type)
            .map(|p| p.deposited_amount)
            .unwrap_or_default()
    }

    /// Borrowed amount for a coin type, zero when no position exists.
    pub fn borrowed_amount(&self, coin_type: &CoinType) -> TokenAmount {
        self.borrows
            .iter()
            .find(|p| &p.coin_type == coin_type)
            .map(|p| p.borrowed_amount)
            .unwrap_or_default()
    }
}

fn check_unique<'a>(
    coins: impl Iterator<Item = &'a CoinType>,
    side: &'static str,
) -> Result<(), EngineError> {
    let mut seen = std::collections::BTreeSet::new();
    for coin_type in coins {
        if !seen.insert(coin_type) {
            return Err(EngineError::DuplicatePosition {
                side,
                coin_type: coin_type.clone(),
            });
        }
    }
    Ok(())
}

/// The user's spendable balances, read-only input from the wallet layer.
#[cw_serde]
#[derive(Default)]
pub struct WalletBalances(BTreeMap<CoinType, TokenAmount>);

impl WalletBalances {
    /// An empty wallet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spendable balance for a coin type, zero when absent.
    pub fn balance(&self, coin_type: &CoinType) -> TokenAmount {
        self.0.get(coin_type).copied().unwrap_or_default()
    }

    /// Set the balance for a coin type.
    pub fn set_balance(&mut self, coin_type: CoinType, amount: TokenAmount) {
        self.0.insert(coin_type, amount);
    }
}

impl FromIterator<(CoinType, TokenAmount)> for WalletBalances {
    fn from_iter<I: IntoIterator<Item = (CoinType, TokenAmount)>>(iter: I) -> Self {
        WalletBalances(iter.into_iter().collect())
    }
}
