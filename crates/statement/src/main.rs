use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use clap::Parser;
use colored::Colorize;
use rewards_sdk::ledger::{build_statement, load_transactions_from_path, TransactionInfo};
use rewards_sdk::{LedgerConfig, StatementInfo};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "statement")]
#[command(about = "Print the earnings statement for a transaction snapshot")]
struct Args {
    /// JSON array of transactions
    #[arg(value_name = "TRANSACTIONS_JSON")]
    transactions: PathBuf,

    /// Next scheduled token redemption (RFC 3339)
    #[arg(long)]
    next_token_redemption_at: Option<DateTime<Utc>>,

    /// Day of month payouts happen on [env: NEXT_PAYMENT_DAY]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
    payment_day: Option<u32>,

    /// Low estimate multiplier [env: MIN_ESTIMATED_EARNINGS_MULTIPLIER]
    #[arg(long)]
    multiplier: Option<f64>,

    /// Evaluate as of this instant (RFC 3339) instead of the local clock
    #[arg(long)]
    now: Option<DateTime<FixedOffset>>,

    /// Print the statement as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn ledger_config(&self) -> LedgerConfig {
        let mut config = LedgerConfig::from_env();
        if let Some(day) = self.payment_day {
            config = config.with_next_payment_day(day);
        }
        if let Some(multiplier) = self.multiplier {
            config = config.with_min_estimated_earnings_multiplier(multiplier);
        }
        config
    }
}

fn statement_at<Tz: TimeZone>(
    transactions: &[TransactionInfo],
    args: &Args,
    config: &LedgerConfig,
    now: &DateTime<Tz>,
) -> StatementInfo {
    let next_token_redemption_at = args
        .next_token_redemption_at
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    build_statement(transactions, next_token_redemption_at, config, now)
}

/// Dates are shown in `tz`, the zone the month windows were computed in
fn render<Tz: TimeZone>(statement: &StatementInfo, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let estimate = &statement.estimated_earnings_this_month;
    let next_payment = statement
        .next_payment_date
        .with_timezone(tz)
        .format("%Y-%m-%d")
        .to_string();

    let mut out = String::new();
    out.push_str(&format!("{}\n", "Earnings statement".bold()));
    out.push_str(&format!("  Next payment date:      {}\n", next_payment.cyan()));
    out.push_str(&format!(
        "  Estimated this month:   {} to {}\n",
        format!("{:.3}", estimate.low).yellow(),
        format!("{:.3}", estimate.high).green()
    ));
    out.push_str(&format!(
        "  Earned last month:      {}\n",
        format!("{:.3}", statement.earnings_last_month).green()
    ));
    out.push_str(&format!(
        "  Ads received this month: {}\n",
        statement.ads_received_this_month
    ));
    out
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statement=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let transactions = load_transactions_from_path(&args.transactions)
        .with_context(|| format!("Failed to load {}", args.transactions.display()))?;
    info!("Loaded {} transaction(s)", transactions.len());

    let invalid = transactions.iter().filter(|tx| !tx.is_valid()).count();
    if invalid > 0 {
        warn!("{} transaction(s) fail validation and are still counted", invalid);
    }

    let config = args.ledger_config();
    let (statement, text) = match &args.now {
        Some(now) => {
            let statement = statement_at(&transactions, &args, &config, now);
            let text = render(&statement, &now.timezone());
            (statement, text)
        }
        None => {
            let statement = statement_at(&transactions, &args, &config, &Local::now());
            let text = render(&statement, &Local);
            (statement, text)
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&statement)?);
    } else {
        print!("{}", text);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"[
        {"id": "a", "created_at": "2020-10-12T09:00:00Z", "value": 0.05,
         "confirmation_type": "view", "ad_type": "notification_ad",
         "reconciled_at": "2020-10-20T00:00:00Z"},
        {"id": "b", "created_at": "2020-11-02T09:00:00Z", "value": 0.04,
         "confirmation_type": "click", "ad_type": "inline_content_ad"}
    ]"#;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "statement",
            "transactions.json",
            "--payment-day",
            "15",
            "--multiplier",
            "0.5",
            "--now",
            "2020-11-18T12:00:00+01:00",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.transactions, PathBuf::from("transactions.json"));
        assert!(args.json);
        let config = args.ledger_config();
        assert_eq!(config.next_payment_day, 15);
        assert!((config.min_estimated_earnings_multiplier - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_args_reject_bad_payment_day() {
        assert!(Args::try_parse_from(["statement", "t.json", "--payment-day", "0"]).is_err());
    }

    #[test]
    fn test_statement_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let args = Args::try_parse_from([
            "statement",
            file.path().to_str().unwrap(),
            "--now",
            "2020-11-18T12:00:00Z",
        ])
        .unwrap();
        let transactions = load_transactions_from_path(&args.transactions).unwrap();
        let now = args.now.unwrap();
        let statement = statement_at(&transactions, &args, &LedgerConfig::default(), &now);

        assert!((statement.earnings_last_month - 0.05).abs() < 1e-9);
        assert_eq!(statement.ads_received_this_month, 1);

        colored::control::set_override(false);
        let text = render(&statement, &now.timezone());
        assert!(text.contains("Earned last month:      0.050"));
        assert!(text.contains("Ads received this month: 1"));
    }

    #[test]
    fn test_render_uses_evaluation_offset() {
        let args = Args::try_parse_from([
            "statement",
            "t.json",
            "--now",
            "2020-11-18T12:00:00+10:00",
        ])
        .unwrap();
        let now = args.now.unwrap();
        let statement = statement_at(&[], &args, &LedgerConfig::default(), &now);

        // Local midnight Dec 7 at +10:00 is still Dec 6 in UTC
        assert_eq!(
            statement.next_payment_date,
            "2020-12-06T14:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );

        colored::control::set_override(false);
        assert!(render(&statement, &now.timezone()).contains("Next payment date:      2020-12-07"));
        assert!(render(&statement, &Utc).contains("Next payment date:      2020-12-06"));
    }
}
