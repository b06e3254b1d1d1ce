//! Credit balance — the simulated currency spent on calls.

use serde::{Deserialize, Serialize};

use crate::error::HelplineError;

/// Balance a fresh installation starts with.
pub const INITIAL_CREDIT: u32 = 100;

/// Cost of placing a single call.
pub const CALL_COST: u32 = 20;

/// Non-negative credit balance.
///
/// Spending is all-or-nothing: a spend that the balance does not cover is
/// rejected and the balance is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditBalance(u32);

impl Default for CreditBalance {
    fn default() -> Self {
        Self(INITIAL_CREDIT)
    }
}

impl CreditBalance {
    #[must_use]
    pub fn new(amount: u32) -> Self {
        Self(amount)
    }

    #[must_use]
    pub fn amount(self) -> u32 {
        self.0
    }

    /// Whether the balance covers `cost`.
    #[must_use]
    pub fn covers(self, cost: u32) -> bool {
        self.0 >= cost
    }

    /// Subtract `cost` from the balance.
    ///
    /// # Errors
    ///
    /// Returns [`HelplineError::InsufficientCredit`] when the balance is below
    /// `cost`. The balance is not modified in that case.
    pub fn try_spend(&mut self, cost: u32) -> Result<(), HelplineError> {
        let remaining = self
            .0
            .checked_sub(cost)
            .ok_or(HelplineError::InsufficientCredit {
                balance: self.0,
                cost,
            })?;
        self.0 = remaining;
        Ok(())
    }
}

impl std::fmt::Display for CreditBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
