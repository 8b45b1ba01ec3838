//! The four user actions the engine evaluates.

use cosmwasm_schema::cw_serde;
use enum_iterator::Sequence;
use std::fmt::Display;

/// A user action against a single reserve.
#[cw_serde]
#[derive(Copy, Eq, Sequence)]
pub enum Action {
    /// Supply tokens to a reserve as collateral.
    Deposit,
    /// Remove previously supplied tokens.
    Withdraw,
    /// Borrow tokens against the obligation's collateral.
    Borrow,
    /// Pay down an outstanding borrow.
    Repay,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Action::Deposit => "deposit",
            Action::Withdraw => "withdraw",
            Action::Borrow => "borrow",
            Action::Repay => "repay",
        })
    }
}
