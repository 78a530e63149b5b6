use chrono::{DateTime, Utc};

use super::transaction::{AdType, ConfirmationType, TransactionInfo};

fn build(value: f64, ad_type: AdType, created_at: &str, reconciled_at: Option<&str>) -> TransactionInfo {
    let created_at: DateTime<Utc> = created_at.parse().unwrap();
    TransactionInfo {
        id: format!("tx-{}-{}", created_at.timestamp(), value),
        created_at,
        value,
        confirmation_type: ConfirmationType::Viewed,
        ad_type,
        reconciled_at: reconciled_at.map(|s| s.parse().unwrap()),
    }
}

pub fn transaction(value: f64, created_at: &str, reconciled_at: Option<&str>) -> TransactionInfo {
    build(value, AdType::NotificationAd, created_at, reconciled_at)
}

pub fn new_tab_page_transaction(
    value: f64,
    created_at: &str,
    reconciled_at: Option<&str>,
) -> TransactionInfo {
    build(value, AdType::NewTabPageAd, created_at, reconciled_at)
}
