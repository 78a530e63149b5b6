//! Transaction history and the earnings statement derived from it.

pub mod payment_date;
pub mod reconciliation;
pub mod statement;
pub mod time;
pub mod transaction;

#[cfg(test)]
mod test_helpers;

pub use payment_date::calculate_next_payment_date;
pub use reconciliation::{
    did_reconcile_transaction_within_date_range, did_reconcile_transactions_last_month,
    did_reconcile_transactions_this_month,
};
pub use statement::{
    build_statement, build_statement_now, get_ads_received_this_month,
    get_estimated_earnings_for_this_month, get_reconciled_earnings_for_previous_month,
    get_reconciled_earnings_for_this_month, get_unreconciled_earnings, EstimatedEarnings,
    StatementInfo,
};
pub use time::DateRange;
pub use transaction::{
    load_transactions, load_transactions_from_path, AdType, ConfirmationType, TransactionInfo,
    TransactionList,
};
