use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};

use super::reconciliation::did_reconcile_transactions_last_month;
use super::time::{days_in_month, first_day_of_month, local_midnight};
use super::transaction::TransactionInfo;
use crate::config::LedgerConfig;

/// Local midnight of the payment day in the month starting at `first_day`,
/// with the day clamped to the month length
fn payment_date_in_month<Tz: TimeZone>(tz: &Tz, first_day: NaiveDate, payment_day: u32) -> DateTime<Utc> {
    let day = payment_day.clamp(1, days_in_month(first_day));
    let date = first_day.with_day(day).unwrap_or(first_day);
    local_midnight(tz, date)
}

/// Payout lands on this month's payment day when it has not passed yet and
/// something was reconciled last month; otherwise on next month's. Never
/// earlier than the next scheduled token redemption.
pub fn calculate_next_payment_date<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    next_token_redemption_at: DateTime<Utc>,
    config: &LedgerConfig,
    now: &DateTime<Tz>,
) -> DateTime<Utc> {
    let tz = now.timezone();
    let today = now.date_naive();
    let this_month = first_day_of_month(today);
    let payment_day_this_month = config.next_payment_day.clamp(1, days_in_month(this_month));

    let month = if today.day() <= payment_day_this_month
        && did_reconcile_transactions_last_month(transactions, now)
    {
        this_month
    } else {
        this_month
            .checked_add_months(Months::new(1))
            .unwrap_or(this_month)
    };

    payment_date_in_month(&tz, month, config.next_payment_day).max(next_token_redemption_at)
}
