//! Gateway configuration and endpoint resolution.
//!
//! A [`RaveConfig`] is built once at startup and handed to the service;
//! nothing in the client mutates it afterwards. Switching between test and
//! live mode means building a new config.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

const TEST_MODE_BASE_URL: &str = "http://flw-pms-dev.eu-west-1.elasticbeanstalk.com";
const LIVE_MODE_BASE_URL: &str = "https://api.ravepay.co";

/// Public key of the gateway's shared sandbox merchant.
pub const SANDBOX_PUBLIC_KEY: &str = "FLWPUBK-e634d14d9ded04eaf05d5b63a0a06d2f-X";

/// Secret key of the gateway's shared sandbox merchant.
pub const SANDBOX_SECRET_KEY: &str = "FLWSECK-bb971402072265fb156e90a3578fe5e6-X";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which gateway environment requests are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Test,
    Live,
}

impl Mode {
    /// Returns the well-known base URL for this mode.
    pub fn base_url(&self) -> &'static str {
        match self {
            Mode::Test => TEST_MODE_BASE_URL,
            Mode::Live => LIVE_MODE_BASE_URL,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Test => write!(f, "test"),
            Mode::Live => write!(f, "live"),
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "test" => Ok(Mode::Test),
            "live" => Ok(Mode::Live),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

/// Abstract gateway operations, resolved to a concrete URL by [`RaveConfig::url_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ChargeCard,
    ChargeAccount,
    ChargeMpesa,
    ChargeMobileMoneyGh,
    ChargeUssd,
    ValidateCard,
    ValidateAccount,
    Verify,
    Requery,
    ListBanks,
    Fee,
}

impl Operation {
    /// Path of the operation relative to the gateway base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Operation::ChargeCard
            | Operation::ChargeAccount
            | Operation::ChargeMpesa
            | Operation::ChargeMobileMoneyGh => "/flwv3-pug/getpaidx/api/charge",
            Operation::ChargeUssd | Operation::ValidateCard => {
                "/flwv3-pug/getpaidx/api/validatecharge"
            }
            Operation::ValidateAccount => "/flwv3-pug/getpaidx/api/validate",
            Operation::Verify => "/flwv3-pug/getpaidx/api/verify",
            Operation::Requery => "/flwv3-pug/getpaidx/api/xrequery",
            Operation::ListBanks => "/flwv3-pug/getpaidx/api/flwpbf-banks.js?json=1",
            Operation::Fee => "/flwv3-pug/getpaidx/api/fee",
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaveConfig {
    pub mode: Mode,
    /// Public key used when a charge request does not carry its own.
    pub public_key: String,
    /// Merchant secret key, required only by verification and requery.
    pub secret_key: Option<String>,
    /// Replaces the mode's base URL when set.
    pub base_url: Option<String>,
    /// Request timeout applied by the HTTP transport.
    pub timeout_secs: u64,
}

impl Default for RaveConfig {
    fn default() -> Self {
        Self::test(SANDBOX_PUBLIC_KEY).with_secret_key(SANDBOX_SECRET_KEY)
    }
}

impl RaveConfig {
    /// Configuration for the test environment.
    pub fn test(public_key: impl Into<String>) -> Self {
        Self {
            mode: Mode::Test,
            public_key: public_key.into(),
            secret_key: None,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Configuration for the live environment.
    pub fn live(public_key: impl Into<String>) -> Self {
        Self {
            mode: Mode::Live,
            ..Self::test(public_key)
        }
    }

    /// Overrides the base URL (e.g. a local stub server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// - `RAVE_MODE` (`test` or `live`, default `test`)
    /// - `RAVE_PUBLIC_KEY` (default: the sandbox key)
    /// - `RAVE_SECRET_KEY` (optional; the sandbox secret when the sandbox
    ///   public key is in use)
    /// - `RAVE_BASE_URL` (optional)
    /// - `RAVE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mode = match env::var("RAVE_MODE") {
            Ok(v) => v.parse()?,
            Err(_) => Mode::Test,
        };

        let public_key =
            env::var("RAVE_PUBLIC_KEY").unwrap_or_else(|_| SANDBOX_PUBLIC_KEY.to_string());

        let secret_key = env::var("RAVE_SECRET_KEY").ok().or_else(|| {
            (public_key == SANDBOX_PUBLIC_KEY).then(|| SANDBOX_SECRET_KEY.to_string())
        });

        let timeout_secs = match env::var("RAVE_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(v.clone()))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self {
            mode,
            public_key,
            secret_key,
            base_url: None,
            timeout_secs,
        };
        if let Ok(url) = env::var("RAVE_BASE_URL") {
            config = config.with_base_url(url);
        }
        Ok(config)
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.mode.base_url())
    }

    /// Resolves an operation to its absolute URL.
    pub fn url_for(&self, operation: Operation) -> String {
        format!("{}{}", self.base_url(), operation.path())
    }

    /// The secret key, or an error naming the operation that needs it.
    pub fn require_secret_key(&self, operation: Operation) -> Result<&str, ConfigError> {
        self.secret_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingSecretKey(operation))
    }
}
