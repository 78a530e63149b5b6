use chrono::{DateTime, TimeZone, Utc};

use super::time::{previous_month, this_month, DateRange};
use super::transaction::TransactionInfo;

/// True iff `transaction` was reconciled at an instant within `[from, to]`
pub fn did_reconcile_transaction_within_date_range(
    transaction: &TransactionInfo,
    from: &DateTime<Utc>,
    to: &DateTime<Utc>,
) -> bool {
    did_reconcile_transaction_within(transaction, &DateRange::new(*from, *to))
}

pub fn did_reconcile_transaction_within(transaction: &TransactionInfo, range: &DateRange) -> bool {
    transaction
        .reconciled_at
        .as_ref()
        .is_some_and(|reconciled_at| range.contains(reconciled_at))
}

pub fn did_reconcile_transactions_within(transactions: &[TransactionInfo], range: &DateRange) -> bool {
    transactions
        .iter()
        .any(|transaction| did_reconcile_transaction_within(transaction, range))
}

pub fn did_reconcile_transactions_this_month<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    now: &DateTime<Tz>,
) -> bool {
    did_reconcile_transactions_within(transactions, &this_month(now))
}

pub fn did_reconcile_transactions_last_month<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    now: &DateTime<Tz>,
) -> bool {
    did_reconcile_transactions_within(transactions, &previous_month(now))
}
