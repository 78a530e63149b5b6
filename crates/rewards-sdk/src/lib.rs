//! Client side of the ad rewards system.
//!
//! [`privacy`] wraps the challenge bypass token protocol behind values that
//! tolerate malformed input, and [`ledger`] turns the redeemed transaction
//! history into an earnings statement.

pub mod config;
pub mod error;
pub mod ledger;
pub mod privacy;

pub use config::LedgerConfig;
pub use error::{Result, SdkError};
pub use ledger::{build_statement, StatementInfo, TransactionInfo};
pub use privacy::{
    BatchDLEQProof, BlindedToken, PublicKey, SignedToken, SigningKey, Token, UnblindedToken,
};
