//! Submit-eligibility decisions.
//!
//! The gate scans the same ordered ceiling list the evaluator produced and
//! surfaces the first violated constraint. For borrows there is one check
//! that precedes any amount handling: borrowing an asset the obligation is
//! already supplying is refused outright.

use crate::constants::DUST_THRESHOLD;
#[cfg(feature = "debug_log")]
use crate::log::DebugLog;
use crate::number::TokenAmount;
use crate::prelude::*;

/// Blocking reason for borrowing an asset the obligation already supplies.
pub const BORROWING_SUPPLIED_ASSET: &str = "Cannot borrow an asset you are supplying";

/// Whether a proposed amount may be submitted.
#[cw_serde]
#[derive(Eq)]
pub enum SubmitDecision {
    /// No blocking condition.
    Allowed,
    /// A constraint is violated.
    Blocked {
        /// Human-readable reason, shown as the disabled-button tooltip.
        reason: String,
        /// Hard blocks refuse submission; soft warnings merely caution.
        hard: bool,
    },
}

impl SubmitDecision {
    /// Whether submission is blocked at all.
    pub fn is_blocked(&self) -> bool {
        matches!(self, SubmitDecision::Blocked { .. })
    }

    /// Whether submission is blocked by a hard constraint.
    pub fn is_hard_block(&self) -> bool {
        matches!(self, SubmitDecision::Blocked { hard: true, .. })
    }
}

/// Decide whether `amount` may be submitted for `action`.
///
/// An empty or non-numeric amount yields [SubmitDecision::Allowed]: judging
/// incomplete input is the caller's concern, the gate only judges ceilings.
pub fn check_submit(
    action: Action,
    reserve: &ReserveSnapshot,
    obligation: Option<&ObligationSnapshot>,
    constraints: &ConstraintList,
    amount: &str,
) -> SubmitDecision {
    if action == Action::Borrow {
        if let Some(ob) = obligation {
            if ob.deposited_amount(&reserve.coin_type) > *DUST_THRESHOLD {
                return SubmitDecision::Blocked {
                    reason: BORROWING_SUPPLIED_ASSET.to_string(),
                    hard: true,
                };
            }
        }
    }

    let amount = match TokenAmount::parse_input(amount) {
        Some(amount) => amount,
        None => return SubmitDecision::Allowed,
    };

    let decision = match constraints.first_violated(amount) {
        Some(constraint) => SubmitDecision::Blocked {
            reason: constraint.kind.to_string(),
            hard: constraint.kind.is_hard_block(),
        },
        None => SubmitDecision::Allowed,
    };
    debug_log!(
        DebugLog::SubmitGate,
        "{action} {amount} on {}: {decision:?}",
        reserve.coin_type
    );
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Constraint, ConstraintKind};
    use crate::testing::{obligation_with, reserve, tokens, wallet};

    fn list(ceilings: &[(ConstraintKind, &str)]) -> ConstraintList {
        ceilings
            .iter()
            .map(|&(kind, ceiling)| Constraint {
                kind,
                ceiling: tokens(ceiling),
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn first_violated_constraint_wins() {
        let r = reserve("0x2::sui::SUI");
        let constraints = list(&[
            (ConstraintKind::InsufficientBalance, "5"),
            (ConstraintKind::OutstandingDebt, "3"),
            (ConstraintKind::GasReserve, "7"),
        ]);

        // 4 violates only the second ceiling
        let decision = check_submit(Action::Repay, &r, None, &constraints, "4");
        assert_eq!(
            decision,
            SubmitDecision::Blocked {
                reason: ConstraintKind::OutstandingDebt.to_string(),
                hard: true,
            }
        );

        // 6 violates both; the first in order is reported
        let decision = check_submit(Action::Repay, &r, None, &constraints, "6");
        assert_eq!(
            decision,
            SubmitDecision::Blocked {
                reason: ConstraintKind::InsufficientBalance.to_string(),
                hard: true,
            }
        );

        // the binding ceiling itself is fine
        let decision = check_submit(Action::Repay, &r, None, &constraints, "3");
        assert_eq!(decision, SubmitDecision::Allowed);
    }

    #[test]
    fn blocks_iff_amount_exceeds_computed_max() {
        let r = reserve("0x2::sui::SUI");
        let ob = obligation_with(&[], &[("0x2::sui::SUI", "7.5")], "0", "0", "15");
        let w = wallet(&[("0x2::sui::SUI", "100")]);
        let constraints =
            crate::constraint::evaluate_constraints(Action::Repay, &r, Some(&ob), &w).unwrap();
        let max = constraints.compute_max(r.mint_decimals);

        assert!(!check_submit(Action::Repay, &r, Some(&ob), &constraints, &max.to_string())
            .is_blocked());
        assert!(check_submit(Action::Repay, &r, Some(&ob), &constraints, "7.500001")
            .is_blocked());
    }

    #[test]
    fn outflow_violation_is_soft() {
        let r = reserve("0x2::sui::SUI");
        let constraints = list(&[(ConstraintKind::OutflowLimit, "10")]);
        let decision = check_submit(Action::Withdraw, &r, None, &constraints, "11");
        assert!(decision.is_blocked());
        assert!(!decision.is_hard_block());
    }

    #[test]
    fn borrowing_supplied_asset_blocks_regardless_of_amount() {
        let r = reserve("0x2::sui::SUI");
        let ob = obligation_with(&[("0x2::sui::SUI", "5")], &[], "10", "0", "0");
        let w = wallet(&[]);
        let constraints =
            crate::constraint::evaluate_constraints(Action::Borrow, &r, Some(&ob), &w).unwrap();

        for amount in ["0.001", "", "1000000"] {
            assert_eq!(
                check_submit(Action::Borrow, &r, Some(&ob), &constraints, amount),
                SubmitDecision::Blocked {
                    reason: BORROWING_SUPPLIED_ASSET.to_string(),
                    hard: true,
                },
                "amount {amount:?}"
            );
        }
    }

    #[test]
    fn dust_deposit_does_not_trigger_borrow_precheck() {
        let r = reserve("0x2::sui::SUI");
        let ob = obligation_with(&[("0x2::sui::SUI", "0.000001")], &[], "10", "0", "0");
        let constraints = list(&[(ConstraintKind::InsufficientLiquidity, "100")]);
        assert_eq!(
            check_submit(Action::Borrow, &r, Some(&ob), &constraints, "1"),
            SubmitDecision::Allowed
        );
    }

    #[test]
    fn incomplete_input_is_not_blocked() {
        let r = reserve("0x2::sui::SUI");
        let constraints = list(&[(ConstraintKind::InsufficientBalance, "0")]);
        for amount in ["", "   ", "abc", "1.2.3"] {
            assert_eq!(
                check_submit(Action::Deposit, &r, None, &constraints, amount),
                SubmitDecision::Allowed,
                "amount {amount:?}"
            );
        }
    }
}
