//! Ledger aggregator: per-account trial balance

use std::collections::HashMap;

use crate::ledger::accounts::account_type;
use crate::types::*;
use crate::utils::money;

/// Fold postings into per-account debit and credit totals.
///
/// Lines keep the order in which accounts first appear.
pub fn trial_balance(postings: &[Posting]) -> Vec<TrialBalanceLine> {
    let mut lines: Vec<TrialBalanceLine> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for posting in postings {
        let position = *index.entry(posting.account.as_str()).or_insert_with(|| {
            lines.push(TrialBalanceLine {
                account: posting.account.clone(),
                debit: money::zero(),
                credit: money::zero(),
                normal_balance: account_type(&posting.account).normal_balance(),
                balance: money::zero(),
            });
            lines.len() - 1
        });
        let line = &mut lines[position];
        line.debit += &posting.debit;
        line.credit += &posting.credit;
    }

    for line in &mut lines {
        line.debit = money::round2(&line.debit);
        line.credit = money::round2(&line.credit);
        line.balance = match line.normal_balance {
            EntryType::Debit => &line.debit - &line.credit,
            EntryType::Credit => &line.credit - &line.debit,
        };
    }

    lines
}
