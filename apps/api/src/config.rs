use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the upstream API key is required; everything else has a default
/// matching the original deployment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub perplexity_api_key: String,
    pub perplexity_api_url: String,
    pub perplexity_model: String,
    pub frontend_url: String,
    pub rate_limit_window_ms: u64,
    pub rate_limit_max_requests: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "3000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            perplexity_api_key: require_env("PERPLEXITY_API_KEY")?,
            perplexity_api_url: env_or(
                "PERPLEXITY_API_URL",
                "https://api.perplexity.ai/chat/completions",
            ),
            perplexity_model: env_or("PERPLEXITY_MODEL", "sonar-pro"),
            frontend_url: env_or("FRONTEND_URL", "http://localhost:5173"),
            rate_limit_window_ms: env_or("RATE_LIMIT_WINDOW_MS", "900000")
                .parse::<u64>()
                .context("RATE_LIMIT_WINDOW_MS must be an integer")?,
            rate_limit_max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", "100")
                .parse::<u32>()
                .context("RATE_LIMIT_MAX_REQUESTS must be an integer")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Token replenish interval for the rate limiter, derived from the
    /// window/max pair the original deployment exposed.
    pub fn rate_limit_replenish_ms(&self) -> u64 {
        (self.rate_limit_window_ms / u64::from(self.rate_limit_max_requests.max(1))).max(1)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_rate_limit(window_ms: u64, max_requests: u32) -> Config {
        Config {
            port: 3000,
            perplexity_api_key: "test-key".to_string(),
            perplexity_api_url: "https://api.perplexity.ai/chat/completions".to_string(),
            perplexity_model: "sonar-pro".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            rate_limit_window_ms: window_ms,
            rate_limit_max_requests: max_requests,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_replenish_interval_from_defaults() {
        // 100 requests per 900s window -> one token every 9s
        let config = config_with_rate_limit(900_000, 100);
        assert_eq!(config.rate_limit_replenish_ms(), 9_000);
    }

    #[test]
    fn test_replenish_interval_never_zero() {
        let config = config_with_rate_limit(10, 1000);
        assert_eq!(config.rate_limit_replenish_ms(), 1);

        let config = config_with_rate_limit(900_000, 0);
        assert_eq!(config.rate_limit_replenish_ms(), 900_000);
    }
}
