//! Gateway configuration

use crate::{CashbillError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Production REST endpoint
pub const PRODUCTION_URL: &str = "https://pay.cashbill.pl/ws/rest";

/// Test (sandbox) REST endpoint
pub const TEST_URL: &str = "https://pay.cashbill.pl/testws/rest";

/// Which gateway environment requests go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Production,
    Test,
}

impl Mode {
    pub fn base_url(&self) -> &'static str {
        match self {
            Mode::Production => PRODUCTION_URL,
            Mode::Test => TEST_URL,
        }
    }
}

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GatewayConfig {
    /// Target environment
    pub mode: Mode,
    /// Explicit base URL, overriding the one implied by `mode`
    pub base_url: Option<String>,
    /// Request timeout; the HTTP client default applies when unset
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            base_url: None,
            timeout: None,
        }
    }

    pub fn production() -> Self {
        Self::new(Mode::Production)
    }

    pub fn test() -> Self {
        Self::new(Mode::Test)
    }

    /// Build a configuration from `CASHBILL_TEST_MODE` and `CASHBILL_BASE_URL`
    pub fn from_env() -> Self {
        let mode = match std::env::var("CASHBILL_TEST_MODE") {
            Ok(value) if matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes") => {
                Mode::Test
            }
            _ => Mode::Production,
        };

        let mut config = Self::new(mode);
        if let Ok(base_url) = std::env::var("CASHBILL_BASE_URL") {
            if !base_url.is_empty() {
                config.base_url = Some(base_url);
            }
        }
        config
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn is_test_mode(&self) -> bool {
        self.mode == Mode::Test
    }

    /// Base URL requests are built on
    pub fn request_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(self.mode.base_url())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.request_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CashbillError::config(
                "Gateway URL must start with http:// or https://",
            ));
        }

        Ok(())
    }

    /// Base URL followed by the given path segments, each percent-encoded
    pub fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        self.validate()?;
        let mut url = Url::parse(self.request_url())?;
        url.path_segments_mut()
            .map_err(|_| CashbillError::config("Gateway URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// HTTP client honoring the configured timeout
    pub fn http_client(&self) -> Result<Client> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        client_builder
            .build()
            .map_err(|e| CashbillError::config(format!("Failed to create HTTP client: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_urls() {
        assert_eq!(GatewayConfig::production().request_url(), PRODUCTION_URL);
        assert_eq!(GatewayConfig::test().request_url(), TEST_URL);
        assert!(GatewayConfig::test().is_test_mode());
        assert_eq!(GatewayConfig::default().mode, Mode::Production);
    }

    #[test]
    fn test_base_url_override() {
        let config = GatewayConfig::test().with_base_url("http://127.0.0.1:1234");
        assert_eq!(config.request_url(), "http://127.0.0.1:1234");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let config = GatewayConfig::production();
        let url = config.endpoint(["payment", "shop 1", "a/b"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://pay.cashbill.pl/ws/rest/payment/shop%201/a%2Fb"
        );

        let trailing = GatewayConfig::production().with_base_url("http://localhost:8080/");
        assert_eq!(
            trailing.endpoint(["paymentchannels", "shop"]).unwrap().as_str(),
            "http://localhost:8080/paymentchannels/shop"
        );
    }

    #[test]
    fn test_validate() {
        assert!(GatewayConfig::production().validate().is_ok());
        let empty = GatewayConfig::test().with_base_url("");
        assert_eq!(empty.request_url(), TEST_URL);
        assert!(empty.validate().is_ok());
        assert!(GatewayConfig::production()
            .with_base_url("ftp://example.com")
            .validate()
            .is_err());
    }

    #[test]
    fn test_timeout() {
        let config = GatewayConfig::test().with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.http_client().is_ok());
    }
}
