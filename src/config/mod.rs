use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;

/// Knobs for the candidate pipeline and the position monitor.
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    /// Acceptable |delta| band for contracts to sell.
    pub delta_min: f64,
    pub delta_max: f64,
    /// Minimum open interest for a contract to be considered liquid.
    pub min_open_interest: u64,
    /// Maximum days to expiration.
    pub max_dte: i64,
    /// Buy a put back once |unrealized P&L| reaches this fraction of the
    /// premium collected.
    pub target_pct: Decimal,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            delta_min: 0.15,
            delta_max: 0.35,
            min_open_interest: 50,
            max_dte: 45,
            target_pct: Decimal::new(90, 2), // 0.90
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key_id: String,
    pub api_secret_key: String,
    /// Trade against the live account instead of paper.
    pub live: bool,

    /// Underlyings eligible for put selling.
    pub allowed_symbols: Vec<String>,
    /// Capital ceiling for cash-secured puts, in dollars.
    pub buying_power_limit: Decimal,

    pub strategy: StrategyConfig,

    /// Directory for run records; journaling is off when unset.
    pub journal_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let symbols_raw = env::var("ALLOWED_SYMBOLS").unwrap_or_default();
        let allowed_symbols: Vec<String> = symbols_raw
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        let defaults = StrategyConfig::default();
        let strategy = StrategyConfig {
            delta_min: env_parse("DELTA_MIN", defaults.delta_min),
            delta_max: env_parse("DELTA_MAX", defaults.delta_max),
            min_open_interest: env_parse("MIN_OPEN_INTEREST", defaults.min_open_interest),
            max_dte: env_parse("MAX_DTE", defaults.max_dte),
            target_pct: env_parse("TARGET_PCT", defaults.target_pct),
        };

        Ok(Self {
            api_key_id: env::var("APCA_API_KEY_ID")
                .map_err(|_| anyhow::anyhow!("APCA_API_KEY_ID must be set"))?,
            api_secret_key: env::var("APCA_API_SECRET_KEY")
                .map_err(|_| anyhow::anyhow!("APCA_API_SECRET_KEY must be set"))?,
            live: env_parse("ALPACA_LIVE", false),
            allowed_symbols,
            buying_power_limit: env_parse("BUYING_POWER_LIMIT", Decimal::ZERO),
            strategy,
            journal_dir: env::var("JOURNAL_DIR").ok().map(PathBuf::from),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
