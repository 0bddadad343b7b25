//! Global debit/credit check over all postings

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::Posting;
use crate::utils::money;

/// Outcome of the global balance check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceCheck {
    pub total_debits: BigDecimal,
    pub total_credits: BigDecimal,
    pub balanced: bool,
}

/// Compare total debits and credits rounded to cents. An imbalance is
/// reported, never raised.
pub fn check_balance(postings: &[Posting]) -> BalanceCheck {
    let total_debits = money::round2(&postings.iter().map(|p| &p.debit).sum::<BigDecimal>());
    let total_credits = money::round2(&postings.iter().map(|p| &p.credit).sum::<BigDecimal>());
    let balanced = total_debits == total_credits;

    if !balanced {
        tracing::warn!(
            debits = %total_debits,
            credits = %total_credits,
            "postings do not balance"
        );
    }

    BalanceCheck {
        total_debits,
        total_credits,
        balanced,
    }
}
