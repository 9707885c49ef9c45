use thiserror::Error;

/// Failures raised by the chain model, the optimizers and the chain service.
///
/// A search that converges on a non-positive profit is *not* an error; see
/// [`crate::engine::service::SearchOutcome::NoProfitableTrade`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("chain must contain at least one pool")]
    EmptyChain,

    #[error("pool {index} has invalid reserves ({reserve_in}, {reserve_out}); both must be finite and > 0")]
    InvalidReserve {
        index: usize,
        reserve_in: f64,
        reserve_out: f64,
    },

    #[error("fee rate {0} is outside [0, 1)")]
    InvalidFeeRate(f64),

    #[error("invalid search interval [{lower}, {upper}]: bounds must be finite with lower < upper")]
    InvalidInterval { lower: f64, upper: f64 },

    #[error("tolerance {0} must be finite and > 0")]
    InvalidTolerance(f64),

    #[error("trade amount {0} must be finite and >= 0")]
    InvalidTradeAmount(f64),

    #[error("objective returned a non-finite value at x = {x}")]
    NonFiniteObjective { x: f64 },

    #[error("search did not converge after {iterations} iterations (bracket width {width})")]
    NonConvergence { iterations: usize, width: f64 },

    #[error("arithmetic overflow while evaluating hop {hop}")]
    ArithmeticOverflow { hop: usize },
}
