use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SdkError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdType {
    NotificationAd,
    NewTabPageAd,
    PromotedContentAd,
    InlineContentAd,
    SearchResultAd,
}

impl AdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdType::NotificationAd => "notification_ad",
            AdType::NewTabPageAd => "new_tab_page_ad",
            AdType::PromotedContentAd => "promoted_content_ad",
            AdType::InlineContentAd => "inline_content_ad",
            AdType::SearchResultAd => "search_result_ad",
        }
    }
}

impl fmt::Display for AdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire names follow the confirmation endpoint ("view", "click", ...)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfirmationType {
    #[serde(rename = "view")]
    Viewed,
    #[serde(rename = "click")]
    Clicked,
    #[serde(rename = "dismiss")]
    Dismissed,
    #[serde(rename = "served")]
    Served,
    #[serde(rename = "landed")]
    Transferred,
    #[serde(rename = "bookmark")]
    Saved,
    #[serde(rename = "flag")]
    Flagged,
    #[serde(rename = "upvote")]
    Upvoted,
    #[serde(rename = "downvote")]
    Downvoted,
    #[serde(rename = "conversion")]
    Conversion,
}

impl ConfirmationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationType::Viewed => "view",
            ConfirmationType::Clicked => "click",
            ConfirmationType::Dismissed => "dismiss",
            ConfirmationType::Served => "served",
            ConfirmationType::Transferred => "landed",
            ConfirmationType::Saved => "bookmark",
            ConfirmationType::Flagged => "flag",
            ConfirmationType::Upvoted => "upvote",
            ConfirmationType::Downvoted => "downvote",
            ConfirmationType::Conversion => "conversion",
        }
    }
}

impl fmt::Display for ConfirmationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One redeemed confirmation. Immutable once recorded; settlement by the
/// issuer sets `reconciled_at`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub value: f64,
    pub confirmation_type: ConfirmationType,
    pub ad_type: AdType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconciled_at: Option<DateTime<Utc>>,
}

pub type TransactionList = Vec<TransactionInfo>;

impl TransactionInfo {
    pub fn is_reconciled(&self) -> bool {
        self.reconciled_at.is_some()
    }

    /// Producer-side sanity check; the statement functions do not call it
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && self.value.is_finite()
    }
}

/// Parses a JSON array of transactions
pub fn load_transactions(json: &[u8]) -> Result<TransactionList> {
    serde_json::from_slice(json).map_err(|e| SdkError::Serialization(e.to_string()))
}

pub fn load_transactions_from_path(path: impl AsRef<Path>) -> Result<TransactionList> {
    let bytes = std::fs::read(path)?;
    load_transactions(&bytes)
}
