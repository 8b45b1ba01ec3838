//! Detection of self-referential (looped) positions.
//!
//! A position loops when the obligation deposits an asset and borrows the
//! same asset, or an asset from the same fungibility group. Today the only
//! group is the major stablecoins: depositing USDC while borrowing USDT
//! counts as a loop.

use crate::constants::{is_stablecoin, STABLECOINS};
#[cfg(feature = "debug_log")]
use crate::log::DebugLog;
use crate::number::UnsignedDecimal;
use crate::prelude::*;

/// One detected deposit/borrow loop.
#[cw_serde]
#[derive(Eq)]
pub struct LoopPair {
    /// The deposited asset.
    pub deposit: CoinType,
    /// The borrowed asset.
    pub borrow: CoinType,
}

/// Find every looped deposit/borrow pairing in the obligation.
///
/// Stablecoins are treated as one fungible group: a deposit in any of them
/// pairs against a borrow in any of them. Cross pairs within the group are
/// dropped when both sides also loop reflexively, since the reflexive pairs
/// already describe the position.
pub fn classify_loops(
    reserves: &[ReserveSnapshot],
    obligation: Option<&ObligationSnapshot>,
) -> Vec<LoopPair> {
    let obligation = match obligation {
        Some(obligation) => obligation,
        None => return Vec::new(),
    };

    let mut pairs = Vec::new();
    for reserve in reserves {
        let deposit = &reserve.coin_type;
        if obligation.deposited_amount(deposit).is_zero() {
            continue;
        }
        let borrow_side: Vec<CoinType> = if is_stablecoin(deposit) {
            STABLECOINS.iter().cloned().collect()
        } else {
            vec![deposit.clone()]
        };
        for borrow in borrow_side {
            if !obligation.borrowed_amount(&borrow).is_zero() {
                pairs.push(LoopPair {
                    deposit: deposit.clone(),
                    borrow,
                });
            }
        }
    }
    dedup_stable_cross_pairs(&mut pairs);
    debug_log!(DebugLog::LoopPairs, "loop pairs: {pairs:?}");
    pairs
}

/// Drop stable cross pairs `[A, B]` and `[B, A]` when reflexive pairs
/// `[A, A]` and `[B, B]` are both present. A cross pair with only one
/// reflexive side stays: it carries information the reflexive pair does not.
fn dedup_stable_cross_pairs(pairs: &mut Vec<LoopPair>) {
    let reflexive: std::collections::BTreeSet<CoinType> = pairs
        .iter()
        .filter(|p| p.deposit == p.borrow && is_stablecoin(&p.deposit))
        .map(|p| p.deposit.clone())
        .collect();

    pairs.retain(|p| {
        p.deposit == p.borrow
            || !(reflexive.contains(&p.deposit) && reflexive.contains(&p.borrow))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{obligation_with, reserve};

    fn pair(deposit: &str, borrow: &str) -> LoopPair {
        LoopPair {
            deposit: deposit.into(),
            borrow: borrow.into(),
        }
    }

    #[test]
    fn reflexive_loop_detected() {
        let reserves = vec![reserve("0x2::sui::SUI")];
        let ob = obligation_with(
            &[("0x2::sui::SUI", "10")],
            &[("0x2::sui::SUI", "5")],
            "0",
            "0",
            "0",
        );
        assert_eq!(
            classify_loops(&reserves, Some(&ob)),
            vec![pair("0x2::sui::SUI", "0x2::sui::SUI")]
        );
    }

    #[test]
    fn stablecoins_loop_as_a_group() {
        let reserves = vec![reserve("0x2::usdc::USDC"), reserve("0x2::usdt::USDT")];
        let ob = obligation_with(
            &[("0x2::usdc::USDC", "10")],
            &[("0x2::usdt::USDT", "5")],
            "0",
            "0",
            "0",
        );
        assert_eq!(
            classify_loops(&reserves, Some(&ob)),
            vec![pair("0x2::usdc::USDC", "0x2::usdt::USDT")]
        );
    }

    #[test]
    fn cross_pairs_dropped_when_both_sides_reflexive() {
        let reserves = vec![reserve("0x2::usdc::USDC"), reserve("0x2::usdt::USDT")];
        let ob = obligation_with(
            &[("0x2::usdc::USDC", "10"), ("0x2::usdt::USDT", "8")],
            &[("0x2::usdt::USDT", "5"), ("0x2::usdc::USDC", "3")],
            "0",
            "0",
            "0",
        );
        let mut pairs = classify_loops(&reserves, Some(&ob));
        pairs.sort_by(|a, b| (a.deposit.clone(), a.borrow.clone()).cmp(&(b.deposit.clone(), b.borrow.clone())));
        assert_eq!(
            pairs,
            vec![
                pair("0x2::usdc::USDC", "0x2::usdc::USDC"),
                pair("0x2::usdt::USDT", "0x2::usdt::USDT"),
            ]
        );
    }

    #[test]
    fn cross_pair_kept_when_only_one_side_reflexive() {
        // USDC deposited and borrowed, USDT only borrowed: the cross pair
        // [USDC, USDT] is the only record of the USDT exposure
        let reserves = vec![reserve("0x2::usdc::USDC"), reserve("0x2::usdt::USDT")];
        let ob = obligation_with(
            &[("0x2::usdc::USDC", "10")],
            &[("0x2::usdc::USDC", "3"), ("0x2::usdt::USDT", "5")],
            "0",
            "0",
            "0",
        );
        let mut pairs = classify_loops(&reserves, Some(&ob));
        pairs.sort_by(|a, b| (a.deposit.clone(), a.borrow.clone()).cmp(&(b.deposit.clone(), b.borrow.clone())));
        assert_eq!(
            pairs,
            vec![
                pair("0x2::usdc::USDC", "0x2::usdc::USDC"),
                pair("0x2::usdc::USDC", "0x2::usdt::USDT"),
            ]
        );
    }

    #[test]
    fn zero_amounts_and_missing_obligation_yield_nothing() {
        let reserves = vec![reserve("0x2::sui::SUI")];
        assert!(classify_loops(&reserves, None).is_empty());

        let ob = obligation_with(&[("0x2::sui::SUI", "0")], &[("0x2::sui::SUI", "5")], "0", "0", "0");
        assert!(classify_loops(&reserves, Some(&ob)).is_empty());

        let ob = obligation_with(&[("0x2::sui::SUI", "10")], &[], "0", "0", "0");
        assert!(classify_loops(&reserves, Some(&ob)).is_empty());
    }
}
