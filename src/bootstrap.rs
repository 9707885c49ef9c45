use anyhow::{Context, Result};

use crate::config::Config;
use crate::engine::baselines::{NelderMead, RandomTrials};
use crate::engine::optimizer::Maximizer;
use crate::engine::service::SearchParams;
use crate::math::constant_product::Precision;
use crate::models::{ChainConfig, SearchInterval, MAX_FEE_RATE};

/// Immutable defaults shared by every request. Each request builds its own
/// chain and runs its own searches; nothing here is mutated after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub default_fee_rate: f64,
    pub search: SearchParams,
    pub nelder_mead: NelderMead,
    pub random_trials: RandomTrials,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        // Reject bad defaults at startup rather than on the first request
        ChainConfig::default_chain()
            .with_fee_rate(config.default_fee_rate)
            .context("DEFAULT_FEE_RATE")?;
        if config.default_fee_rate > MAX_FEE_RATE {
            anyhow::bail!(
                "DEFAULT_FEE_RATE must be at most {}, got {}",
                MAX_FEE_RATE,
                config.default_fee_rate
            );
        }
        let interval = SearchInterval::new(config.search_lower_bound, config.search_upper_bound)
            .context("SEARCH_LOWER_BOUND / SEARCH_UPPER_BOUND")?;
        if !config.search_tolerance.is_finite() || config.search_tolerance <= 0.0 {
            anyhow::bail!("SEARCH_TOLERANCE must be > 0, got {}", config.search_tolerance);
        }
        if config.search_max_iterations == 0 {
            anyhow::bail!("SEARCH_MAX_ITERATIONS must be > 0");
        }

        Ok(AppState {
            default_fee_rate: config.default_fee_rate,
            search: SearchParams {
                interval,
                tolerance: config.search_tolerance,
                max_iterations: config.search_max_iterations,
                precision: Precision::Double,
            },
            nelder_mead: NelderMead::default(),
            random_trials: RandomTrials { trials: config.baseline_trials, seed: config.baseline_seed },
        })
    }

    pub fn baselines(&self) -> [&dyn Maximizer; 2] {
        [&self.nelder_mead, &self.random_trials]
    }
}
