//! Conservative price bounds for a reserve's underlying asset.
//!
//! The upstream oracle supplies a spot price plus EMA-derived bounds. The
//! engine applies them asymmetrically: the lower bound values collateral
//! (what a deposit is worth at worst), the upper bound values debt and
//! outflows (what leaving value costs at worst). Staleness handling belongs
//! to the oracle layer, not here.

use crate::error::EngineError;
use crate::number::{TokenAmount, UnsignedDecimal, Usd};
use crate::prelude::*;

/// Spot price with conservative lower and upper bounds, in USD per token.
#[cw_serde]
#[derive(Copy)]
pub struct PriceBounds {
    /// Current spot price.
    pub spot: Decimal256,
    /// Conservative lower bound, used to value collateral.
    pub lower: Decimal256,
    /// Conservative upper bound, used to value debt and outflows.
    pub upper: Decimal256,
}

impl PriceBounds {
    /// Construct bounds, validating `lower <= spot <= upper`.
    pub fn new(
        spot: Decimal256,
        lower: Decimal256,
        upper: Decimal256,
    ) -> Result<Self, EngineError> {
        if lower > spot || spot > upper {
            return Err(EngineError::InvertedPriceBounds { lower, spot, upper });
        }
        Ok(PriceBounds { spot, lower, upper })
    }

    /// Bounds collapsed onto a single price, for assets with no EMA spread.
    pub fn flat(price: Decimal256) -> Self {
        PriceBounds {
            spot: price,
            lower: price,
            upper: price,
        }
    }

    /// Value an amount at the lower bound.
    pub fn value_lower(&self, amount: TokenAmount) -> Result<Usd> {
        amount
            .into_decimal256()
            .checked_mul(self.lower)
            .map(Usd::from_decimal256)
            .with_context(|| format!("value_lower overflowed on {amount} * {}", self.lower))
    }

    /// Value an amount at the upper bound.
    pub fn value_upper(&self, amount: TokenAmount) -> Result<Usd> {
        amount
            .into_decimal256()
            .checked_mul(self.upper)
            .map(Usd::from_decimal256)
            .with_context(|| format!("value_upper overflowed on {amount} * {}", self.upper))
    }

    /// Convert a USD value to token units at the lower bound.
    ///
    /// `None` when the bound is zero: such an asset carries no USD value and
    /// the conversion has no answer.
    pub fn amount_lower(&self, value: Usd) -> Result<Option<TokenAmount>> {
        Self::amount_at(value, self.lower)
    }

    /// Convert a USD value to token units at the upper bound.
    pub fn amount_upper(&self, value: Usd) -> Result<Option<TokenAmount>> {
        Self::amount_at(value, self.upper)
    }

    fn amount_at(value: Usd, price: Decimal256) -> Result<Option<TokenAmount>> {
        if price.is_zero() {
            return Ok(None);
        }
        value
            .into_decimal256()
            .checked_div(price)
            .map(|x| Some(TokenAmount::from_decimal256(x)))
            .with_context(|| format!("amount_at overflowed on {value} / {price}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dec;

    #[test]
    fn ordering_validated() {
        assert!(PriceBounds::new(dec("2"), dec("1.9"), dec("2.1")).is_ok());
        assert_eq!(
            PriceBounds::new(dec("2"), dec("2.5"), dec("2.1")),
            Err(EngineError::InvertedPriceBounds {
                lower: dec("2.5"),
                spot: dec("2"),
                upper: dec("2.1"),
            })
        );
    }

    #[test]
    fn conversions() {
        let price = PriceBounds::new(dec("2"), dec("1.5"), dec("2.5")).unwrap();
        let amount = TokenAmount::from(10u64);
        assert_eq!(price.value_lower(amount).unwrap(), Usd::from(15u64));
        assert_eq!(price.value_upper(amount).unwrap(), Usd::from(25u64));
        assert_eq!(
            price.amount_upper(Usd::from(25u64)).unwrap(),
            Some(TokenAmount::from(10u64))
        );
    }

    #[test]
    fn zero_price_has_no_conversion() {
        let price = PriceBounds::flat(Decimal256::zero());
        assert_eq!(price.amount_lower(Usd::from(5u64)).unwrap(), None);
        assert_eq!(price.amount_upper(Usd::from(5u64)).unwrap(), None);
        assert_eq!(
            price.value_upper(TokenAmount::from(5u64)).unwrap(),
            Usd::zero()
        );
    }
}
