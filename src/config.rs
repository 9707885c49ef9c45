use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,

    // Chain defaults
    pub default_fee_rate: f64,

    // Golden-section search defaults
    pub search_lower_bound: f64,
    pub search_upper_bound: f64,
    pub search_tolerance: f64,
    pub search_max_iterations: usize,

    // Comparison baselines
    pub baseline_trials: usize,
    pub baseline_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            default_fee_rate: 0.003,
            search_lower_bound: 0.0,
            search_upper_bound: 1e11,
            search_tolerance: 0.01,
            search_max_iterations: 500,
            baseline_trials: 100,
            baseline_seed: 42,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Optional files; process env wins over both
        dotenv::from_filename("config/search.env").ok();
        dotenv::dotenv().ok();

        let defaults = Config::default();
        Ok(Config {
            port: var_or("PORT", defaults.port)?,
            default_fee_rate: var_or("DEFAULT_FEE_RATE", defaults.default_fee_rate)?,
            search_lower_bound: var_or("SEARCH_LOWER_BOUND", defaults.search_lower_bound)?,
            search_upper_bound: var_or("SEARCH_UPPER_BOUND", defaults.search_upper_bound)?,
            search_tolerance: var_or("SEARCH_TOLERANCE", defaults.search_tolerance)?,
            search_max_iterations: var_or("SEARCH_MAX_ITERATIONS", defaults.search_max_iterations)?,
            baseline_trials: var_or("BASELINE_TRIALS", defaults.baseline_trials)?,
            baseline_seed: var_or("BASELINE_SEED", defaults.baseline_seed)?,
        })
    }
}

/// Parse `key` if set; a set-but-malformed value is an error, not a fallback.
fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => parse_var(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} has invalid value {raw:?}"))
}
