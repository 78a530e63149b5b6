use std::path::PathBuf;

pub const DEFAULT_SIGNING_KEY_PATH: &str = "~/.config/ads-rewards/signing_key";
pub const DEFAULT_MAX_BATCH_SIZE: usize = 50;
pub const DEFAULT_RATE_LIMIT_PER_SECOND: u64 = 10;

#[derive(Clone, Debug)]
pub struct IssuerConfig {
    pub host: String,
    pub port: u16,
    pub signing_key_path: PathBuf,
    /// Upper bound on blinded tokens per signing request
    pub max_batch_size: usize,
    pub rate_limit_per_second: u64,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            signing_key_path: PathBuf::from(shellexpand::tilde(DEFAULT_SIGNING_KEY_PATH).into_owned()),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            rate_limit_per_second: DEFAULT_RATE_LIMIT_PER_SECOND,
        }
    }
}

impl IssuerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let signing_key_path = lookup("SIGNING_KEY_PATH")
            .map(|s| PathBuf::from(shellexpand::tilde(&s).into_owned()))
            .unwrap_or(defaults.signing_key_path);

        let max_batch_size = lookup("MAX_BATCH_SIZE")
            .and_then(|s| s.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.max_batch_size);

        let rate_limit_per_second = lookup("RATE_LIMIT_PER_SECOND")
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u64| n > 0)
            .unwrap_or(defaults.rate_limit_per_second);

        Self {
            host,
            port,
            signing_key_path,
            max_batch_size,
            rate_limit_per_second,
        }
    }

    #[allow(dead_code)]
    pub fn with_signing_key_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.signing_key_path = path.into();
        self
    }

    #[allow(dead_code)]
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IssuerConfig::from_lookup(|_| None);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_batch_size, 50);
        assert_eq!(config.rate_limit_per_second, 10);
        assert!(config.signing_key_path.ends_with(".config/ads-rewards/signing_key"));
        assert!(!config.signing_key_path.starts_with("~"));
    }

    #[test]
    fn test_overrides() {
        let config = IssuerConfig::from_lookup(|key| match key {
            "PORT" => Some("9090".to_string()),
            "SIGNING_KEY_PATH" => Some("/tmp/issuer_key".to_string()),
            "MAX_BATCH_SIZE" => Some("0".to_string()),
            "RATE_LIMIT_PER_SECOND" => Some("fast".to_string()),
            _ => None,
        });
        assert_eq!(config.port, 9090);
        assert_eq!(config.signing_key_path, PathBuf::from("/tmp/issuer_key"));
        assert_eq!(config.max_batch_size, DEFAULT_MAX_BATCH_SIZE);
        assert_eq!(config.rate_limit_per_second, DEFAULT_RATE_LIMIT_PER_SECOND);
    }
}
