use crate::engine::optimizer::{maximize_with_report, Maximizer, Maximum, SearchReport, DEFAULT_MAX_ITERATIONS};
use crate::error::SearchError;
use crate::math::constant_product::{ChainProfitModel, Precision};
use crate::models::{ChainConfig, SearchInterval};

/// Knobs for one chain search. Chain and fee travel separately in `ChainConfig`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchParams {
    pub interval: SearchInterval,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub precision: Precision,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            interval: SearchInterval::default(),
            tolerance: 0.01,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            precision: Precision::Double,
        }
    }
}

/// What a converged search means for the trader.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    Profitable {
        initial_amount: f64,
        profit: f64,
        final_amount: f64,
    },
    /// The search converged, but the best amount found does not make money.
    NoProfitableTrade {
        best_amount: f64,
        best_profit: f64,
    },
}

impl SearchOutcome {
    /// A trade counts as profitable only when both the amount and its profit
    /// are strictly positive.
    pub fn classify(amount: f64, profit: f64) -> Self {
        if amount > 0.0 && profit > 0.0 {
            SearchOutcome::Profitable {
                initial_amount: amount,
                profit,
                final_amount: amount + profit,
            }
        } else {
            SearchOutcome::NoProfitableTrade { best_amount: amount, best_profit: profit }
        }
    }

    pub fn is_profitable(&self) -> bool {
        matches!(self, SearchOutcome::Profitable { .. })
    }

    pub fn recommended_action(&self) -> &'static str {
        match self {
            SearchOutcome::Profitable { .. } => "ARBITRAGE_DETECTED",
            SearchOutcome::NoProfitableTrade { .. } => "NO_PROFITABLE_TRADE",
        }
    }
}

pub struct ChainSearch {
    pub outcome: SearchOutcome,
    pub report: SearchReport,
    /// Amount held after each hop when trading the argmax.
    pub hop_amounts: Vec<f64>,
    pub marginal_profit_at_zero: f64,
}

/// Golden-section search over the chain-profit objective, classified.
pub fn search_chain(chain: &ChainConfig, params: &SearchParams) -> Result<ChainSearch, SearchError> {
    let model = ChainProfitModel::new(chain, params.precision);
    if params.precision == Precision::Decimal {
        // intermediates grow with the input, so the upper bound is the worst case
        model.evaluate(params.interval.upper)?;
    }

    let report = maximize_with_report(
        model.objective(),
        params.interval.lower,
        params.interval.upper,
        params.tolerance,
        params.max_iterations,
    )?;

    let outcome = SearchOutcome::classify(report.argmax, report.value);
    let marginal = model.marginal_profit_at_zero();
    match outcome {
        SearchOutcome::Profitable { initial_amount, profit, .. } => log::info!(
            "{}-hop chain profitable: amount={:.4} profit={:.4} ({} evaluations)",
            chain.len(), initial_amount, profit, report.evaluations
        ),
        SearchOutcome::NoProfitableTrade { best_amount, best_profit } => log::info!(
            "{}-hop chain not profitable: best amount={:.4} profit={:.4} marginal rate={:.6}",
            chain.len(), best_amount, best_profit, marginal
        ),
    }

    Ok(ChainSearch {
        outcome,
        hop_amounts: model.hop_amounts(report.argmax),
        report,
        marginal_profit_at_zero: marginal,
    })
}

pub struct BaselineRun {
    pub name: &'static str,
    pub result: Result<Maximum, SearchError>,
}

/// Run every backend on its own invocation of the chain objective. A failing
/// backend is reported in place; it does not abort the others.
pub fn compare_baselines(
    chain: &ChainConfig,
    interval: SearchInterval,
    backends: &[&dyn Maximizer],
) -> Vec<BaselineRun> {
    let model = ChainProfitModel::new(chain, Precision::Double);
    let objective = model.objective();
    backends
        .iter()
        .map(|backend| {
            let result = backend.maximize(&objective, interval.lower, interval.upper);
            if let Err(e) = &result {
                log::warn!("baseline {} failed: {}", backend.name(), e);
            }
            BaselineRun { name: backend.name(), result }
        })
        .collect()
}
