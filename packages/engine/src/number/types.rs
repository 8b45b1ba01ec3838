//! This module provides the raw numeric types and just enough functionality
//! to construct them. Amounts are decimal-converted token quantities and USD
//! values, never raw integer units.

use anyhow::{Context, Result};
use cosmwasm_std::{Decimal256, OverflowError, Uint256};
use std::{
    fmt::Display,
    ops::{Add, Sub},
    str::FromStr,
};

/// Generalizes any newtype wrapper around a [Decimal256].
pub trait UnsignedDecimal:
    Display
    + std::fmt::Debug
    + serde::Serialize
    + serde::de::DeserializeOwned
    + Copy
    + Ord
    + FromStr
    + Default
{
    /// Convert into the underlying [Decimal256].
    fn into_decimal256(self) -> Decimal256;

    /// Convert from a [Decimal256].
    fn from_decimal256(src: Decimal256) -> Self;

    /// Check if the underlying value is 0.
    fn is_zero(&self) -> bool {
        self.into_decimal256().is_zero()
    }

    /// Add two values together
    fn checked_add(self, rhs: Self) -> Result<Self, OverflowError> {
        self.into_decimal256()
            .checked_add(rhs.into_decimal256())
            .map(Self::from_decimal256)
    }

    /// Subtract two values
    fn checked_sub(self, rhs: Self) -> Result<Self, OverflowError> {
        self.into_decimal256()
            .checked_sub(rhs.into_decimal256())
            .map(Self::from_decimal256)
    }

    /// The value 0
    fn zero() -> Self {
        Self::from_decimal256(Decimal256::zero())
    }

    /// Difference between two values
    fn diff(self, rhs: Self) -> Self {
        Self::from_decimal256(if self > rhs {
            self.into_decimal256() - rhs.into_decimal256()
        } else {
            rhs.into_decimal256() - self.into_decimal256()
        })
    }

    // Note: we do _not_ include general multiplication and division, since
    // some operations (like multiplying two token amounts) are non-sensical.
}

impl UnsignedDecimal for Decimal256 {
    fn into_decimal256(self) -> Decimal256 {
        self
    }

    fn from_decimal256(src: Decimal256) -> Self {
        src
    }
}

macro_rules! unsigned {
    ($t:tt) => {
        // Avoid using cw_serde because Decimal256 has a bad Debug impl
        #[derive(
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Clone,
            Copy,
            Default,
            serde::Serialize,
            serde::Deserialize,
            schemars::JsonSchema,
        )]
        /// Unsigned value
        pub struct $t(Decimal256);

        impl $t {
            /// Zero value
            pub const fn zero() -> Self {
                Self(Decimal256::zero())
            }

            /// One value
            pub const fn one() -> Self {
                Self(Decimal256::one())
            }

            /// The largest representable value, used as an unbounded ceiling.
            pub const MAX: Self = Self(Decimal256::MAX);
        }

        impl UnsignedDecimal for $t {
            fn into_decimal256(self) -> Decimal256 {
                self.0
            }

            fn from_decimal256(src: Decimal256) -> Self {
                Self(src)
            }
        }

        impl Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::fmt::Debug for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($t), self.0)
            }
        }

        impl FromStr for $t {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self> {
                parse_decimal256(s).map(Self::from_decimal256)
            }
        }

        impl TryFrom<&str> for $t {
            type Error = anyhow::Error;

            fn try_from(value: &str) -> Result<Self> {
                value.parse()
            }
        }

        impl TryFrom<String> for $t {
            type Error = anyhow::Error;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl Add for $t {
            type Output = anyhow::Result<Self, OverflowError>;

            fn add(self, rhs: Self) -> Self::Output {
                Ok(Self(self.0.checked_add(rhs.0)?))
            }
        }

        impl Sub for $t {
            type Output = anyhow::Result<Self, OverflowError>;

            fn sub(self, rhs: Self) -> Self::Output {
                Ok(Self(self.0.checked_sub(rhs.0)?))
            }
        }

        impl From<u64> for $t {
            fn from(src: u64) -> Self {
                u128::from(src).into()
            }
        }

        impl From<u128> for $t {
            fn from(src: u128) -> Self {
                Self::from_decimal256(Decimal256::from_ratio(src, 1u32))
            }
        }

        impl $t {
            /// Floor the current value with given decimal precision
            pub fn floor_with_precision(&self, precision: u32) -> Self {
                // Decimal256 carries 18 fractional digits; deeper token
                // precision cannot be represented and needs no truncation.
                if precision >= 18 {
                    return *self;
                }
                let factor = Decimal256::one().atomics() / Uint256::from_u128(10).pow(precision);
                let raw = self.0.atomics() / factor * factor;

                Self(Decimal256::new(raw))
            }

            /// Multiply by the given [Decimal256]
            pub fn checked_mul_dec(self, rhs: Decimal256) -> Result<Self> {
                self.0.checked_mul(rhs).map(Self).with_context(|| {
                    format!(
                        "{}::checked_mul_dec failed on {self} * {rhs}",
                        stringify!($t)
                    )
                })
            }

            /// Divide by the given [Decimal256]
            pub fn checked_div_dec(self, rhs: Decimal256) -> Result<Self> {
                self.0.checked_div(rhs).map(Self).with_context(|| {
                    format!(
                        "{}::checked_div_dec failed on {self} / {rhs}",
                        stringify!($t)
                    )
                })
            }
        }
    };
}

fn parse_decimal256(s: &str) -> Result<Decimal256> {
    s.parse()
        .with_context(|| format!("Unable to parse unsigned decimal from {s}"))
}

unsigned!(TokenAmount);
unsigned!(Usd);

impl TokenAmount {
    /// Parse a user-entered amount string.
    ///
    /// Returns `None` for empty or non-numeric input. Callers treat that as
    /// "nothing entered yet", never as zero.
    pub fn parse_input(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        s.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_with_precision_truncates_toward_zero() {
        assert_eq!(
            TokenAmount::from_str("12.3456789")
                .unwrap()
                .floor_with_precision(2),
            TokenAmount::from_str("12.34").unwrap()
        );
        // never rounds up, even at .999..
        assert_eq!(
            TokenAmount::from_str("0.9999999")
                .unwrap()
                .floor_with_precision(6),
            TokenAmount::from_str("0.999999").unwrap()
        );
        // precision at or beyond the representation is the identity
        let x = TokenAmount::from_str("1.000000000000000001").unwrap();
        assert_eq!(x.floor_with_precision(18), x);
        assert_eq!(x.floor_with_precision(30), x);
    }

    #[test]
    fn parse_input_sentinels() {
        assert_eq!(TokenAmount::parse_input(""), None);
        assert_eq!(TokenAmount::parse_input("   "), None);
        assert_eq!(TokenAmount::parse_input("abc"), None);
        assert_eq!(TokenAmount::parse_input("-5"), None);
        assert_eq!(
            TokenAmount::parse_input(" 5.5 "),
            Some(TokenAmount::from_str("5.5").unwrap())
        );
    }

    #[test]
    fn checked_ops() {
        let a = TokenAmount::from(7u64);
        let b = TokenAmount::from(3u64);
        assert_eq!((a - b).unwrap(), TokenAmount::from(4u64));
        assert!((b - a).is_err());
        assert_eq!(a.diff(b), (a - b).unwrap());
        assert_eq!(b.diff(a), (a - b).unwrap());
        assert!(TokenAmount::MAX.checked_mul_dec(Decimal256::one()).is_ok());
        assert!(Usd::from(1u64)
            .checked_div_dec(Decimal256::zero())
            .is_err());
    }
}
