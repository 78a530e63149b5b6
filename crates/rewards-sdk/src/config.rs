use tracing::warn;

pub const DEFAULT_NEXT_PAYMENT_DAY: u32 = 7;
pub const DEFAULT_MIN_ESTIMATED_EARNINGS_MULTIPLIER: f64 = 0.8;

/// Parameters that feed the earnings statement
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerConfig {
    /// Day of month payouts happen on; clamped to the month length when applied
    pub next_payment_day: u32,
    /// Scales the low end of the estimated earnings range
    pub min_estimated_earnings_multiplier: f64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            next_payment_day: DEFAULT_NEXT_PAYMENT_DAY,
            min_estimated_earnings_multiplier: DEFAULT_MIN_ESTIMATED_EARNINGS_MULTIPLIER,
        }
    }
}

impl LedgerConfig {
    pub fn with_next_payment_day(mut self, day: u32) -> Self {
        self.next_payment_day = day.clamp(1, 31);
        self
    }

    pub fn with_min_estimated_earnings_multiplier(mut self, multiplier: f64) -> Self {
        self.min_estimated_earnings_multiplier = multiplier;
        self
    }

    /// Reads `NEXT_PAYMENT_DAY` and `MIN_ESTIMATED_EARNINGS_MULTIPLIER`.
    /// Unparseable values are logged and replaced by the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("NEXT_PAYMENT_DAY") {
            match raw.trim().parse::<u32>() {
                Ok(day) if (1..=31).contains(&day) => config.next_payment_day = day,
                _ => warn!(
                    "Ignoring NEXT_PAYMENT_DAY={:?}, using {}",
                    raw, DEFAULT_NEXT_PAYMENT_DAY
                ),
            }
        }

        if let Some(raw) = lookup("MIN_ESTIMATED_EARNINGS_MULTIPLIER") {
            match raw.trim().parse::<f64>() {
                Ok(m) if m.is_finite() && m >= 0.0 => config.min_estimated_earnings_multiplier = m,
                _ => warn!(
                    "Ignoring MIN_ESTIMATED_EARNINGS_MULTIPLIER={:?}, using {}",
                    raw, DEFAULT_MIN_ESTIMATED_EARNINGS_MULTIPLIER
                ),
            }
        }

        config
    }
}
