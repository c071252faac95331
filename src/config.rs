use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Bet submission gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

/// Betting slip configuration
#[derive(Debug, Clone)]
pub struct SlipConfig {
    pub gateway: GatewayConfig,
    /// Fixed RWF-per-USD exchange rate. Not a live rate.
    pub rwf_per_usd: Decimal,
    pub min_stake_rwf: Decimal,
    pub min_stake_usd: Decimal,
    /// Directory for the file-backed slip store, when one is used
    pub store_dir: Option<PathBuf>,
}

impl GatewayConfig {
    /// Create gateway config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let url = env::var("BET_GATEWAY_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api/bets".to_string());

        let timeout_secs = env::var("BET_GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let connect_timeout_secs = env::var("BET_GATEWAY_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);

        if url.is_empty() {
            return Err("BET_GATEWAY_URL must not be empty".to_string());
        }

        if timeout_secs == 0 {
            return Err("BET_GATEWAY_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            url,
            timeout_secs,
            connect_timeout_secs,
        })
    }

    /// Get submission timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/api/bets".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl SlipConfig {
    /// Create slip config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let gateway = GatewayConfig::from_env()?;

        let rwf_per_usd = env::var("RWF_PER_USD")
            .ok()
            .and_then(|s| s.parse::<Decimal>().ok())
            .unwrap_or_else(|| Decimal::new(1200, 0));

        let min_stake_rwf = env::var("MIN_STAKE_RWF")
            .ok()
            .and_then(|s| s.parse::<Decimal>().ok())
            .unwrap_or_else(|| Decimal::new(1000, 0));

        let min_stake_usd = env::var("MIN_STAKE_USD")
            .ok()
            .and_then(|s| s.parse::<Decimal>().ok())
            .unwrap_or(Decimal::ONE);

        let store_dir = env::var("SLIP_STORE_DIR").ok().map(PathBuf::from);

        // Validate configuration
        if rwf_per_usd <= Decimal::ZERO {
            return Err("RWF_PER_USD must be greater than 0".to_string());
        }

        if min_stake_rwf <= Decimal::ZERO {
            return Err("MIN_STAKE_RWF must be greater than 0".to_string());
        }

        if min_stake_usd <= Decimal::ZERO {
            return Err("MIN_STAKE_USD must be greater than 0".to_string());
        }

        Ok(Self {
            gateway,
            rwf_per_usd,
            min_stake_rwf,
            min_stake_usd,
            store_dir,
        })
    }
}

impl Default for SlipConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            rwf_per_usd: Decimal::new(1200, 0),
            min_stake_rwf: Decimal::new(1000, 0),
            min_stake_usd: Decimal::ONE,
            store_dir: None,
        }
    }
}
