//! Earnings statement: per-month sums over the transaction history.
//!
//! Every function takes `now` explicitly; month windows are computed in the
//! time zone of `now`.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use super::payment_date::calculate_next_payment_date;
use super::reconciliation::did_reconcile_transaction_within;
use super::time::{previous_month, this_month, DateRange};
use super::transaction::{AdType, TransactionInfo};
use crate::config::LedgerConfig;

/// Low and high end of the estimate for the current month
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct EstimatedEarnings {
    pub low: f64,
    pub high: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatementInfo {
    pub next_payment_date: DateTime<Utc>,
    pub estimated_earnings_this_month: EstimatedEarnings,
    pub earnings_last_month: f64,
    pub ads_received_this_month: usize,
}

fn sum_values<'a>(transactions: impl Iterator<Item = &'a TransactionInfo>) -> f64 {
    transactions.map(|transaction| transaction.value).sum()
}

fn reconciled_earnings_within(transactions: &[TransactionInfo], range: &DateRange) -> f64 {
    sum_values(
        transactions
            .iter()
            .filter(|transaction| did_reconcile_transaction_within(transaction, range)),
    )
}

/// Sum of values not reconciled between the distant past and the end of the
/// current month. Includes transactions reconciled after this month ends.
pub fn get_unreconciled_earnings<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    now: &DateTime<Tz>,
) -> f64 {
    let range = DateRange::until(this_month(now).to);
    sum_values(
        transactions
            .iter()
            .filter(|transaction| !did_reconcile_transaction_within(transaction, &range)),
    )
}

pub fn get_reconciled_earnings_for_this_month<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    now: &DateTime<Tz>,
) -> f64 {
    reconciled_earnings_within(transactions, &this_month(now))
}

pub fn get_reconciled_earnings_for_previous_month<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    now: &DateTime<Tz>,
) -> f64 {
    reconciled_earnings_within(transactions, &previous_month(now))
}

/// Unreconciled plus reconciled-this-month, over the transactions `include` accepts
fn earnings_this_month<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    now: &DateTime<Tz>,
    include: impl Fn(&TransactionInfo) -> bool,
) -> f64 {
    let month = this_month(now);
    let to_date = DateRange::until(month.to);

    let unreconciled = sum_values(transactions.iter().filter(|transaction| {
        include(*transaction) && !did_reconcile_transaction_within(transaction, &to_date)
    }));
    let reconciled = sum_values(transactions.iter().filter(|transaction| {
        include(*transaction) && did_reconcile_transaction_within(transaction, &month)
    }));

    unreconciled + reconciled
}

/// `high` is unreconciled plus reconciled-this-month over every transaction.
/// `low` repeats that without new tab page ads, scaled by the configured
/// multiplier.
pub fn get_estimated_earnings_for_this_month<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    config: &LedgerConfig,
    now: &DateTime<Tz>,
) -> EstimatedEarnings {
    let high = earnings_this_month(transactions, now, |_| true);
    let low = earnings_this_month(transactions, now, |transaction| {
        transaction.ad_type != AdType::NewTabPageAd
    }) * config.min_estimated_earnings_multiplier;

    EstimatedEarnings { low, high }
}

pub fn get_ads_received_this_month<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    now: &DateTime<Tz>,
) -> usize {
    let range = this_month(now);
    transactions
        .iter()
        .filter(|transaction| range.contains(&transaction.created_at))
        .count()
}

pub fn build_statement<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    next_token_redemption_at: DateTime<Utc>,
    config: &LedgerConfig,
    now: &DateTime<Tz>,
) -> StatementInfo {
    StatementInfo {
        next_payment_date: calculate_next_payment_date(
            transactions,
            next_token_redemption_at,
            config,
            now,
        ),
        estimated_earnings_this_month: get_estimated_earnings_for_this_month(
            transactions,
            config,
            now,
        ),
        earnings_last_month: get_reconciled_earnings_for_previous_month(transactions, now),
        ads_received_this_month: get_ads_received_this_month(transactions, now),
    }
}

/// Statement as of the current wall-clock time in the local zone
pub fn build_statement_now(
    transactions: &[TransactionInfo],
    next_token_redemption_at: DateTime<Utc>,
    config: &LedgerConfig,
) -> StatementInfo {
    build_statement(transactions, next_token_redemption_at, config, &Local::now())
}
