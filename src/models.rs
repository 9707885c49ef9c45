use crate::error::SearchError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fee retained by every pool on the default chain (0.3%).
pub const DEFAULT_FEE_RATE: f64 = 0.003;

/// Highest fee rate the service accepts, for requests and for its own default.
pub const MAX_FEE_RATE: f64 = 0.1;

/// Five-hop sample chain used as the out-of-the-box configuration.
pub const DEFAULT_POOLS: [(f64, f64); 5] = [
    (3_753_139_396.0, 166_740_188_573.0),
    (724_520_588_560.0, 766_050_680_304.0),
    (10_457_920_653.0, 1_051_487_855.0),
    (1_722_571_966_294.0, 2_846_977_754_550.0),
    (22_496_742_244_741.0, 4_310_194_783_973.0),
];

/// One hop of the chain: reserves of the asset paid in and the asset received.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LiquidityPool {
    pub reserve_in: f64,
    pub reserve_out: f64,
}

impl LiquidityPool {
    pub const fn new(reserve_in: f64, reserve_out: f64) -> Self {
        Self { reserve_in, reserve_out }
    }

    /// Same pool traded in the opposite direction.
    pub const fn flipped(&self) -> Self {
        Self { reserve_in: self.reserve_out, reserve_out: self.reserve_in }
    }

    #[inline]
    fn is_valid(&self) -> bool {
        self.reserve_in.is_finite()
            && self.reserve_out.is_finite()
            && self.reserve_in > 0.0
            && self.reserve_out > 0.0
    }
}

/// A validated cyclic chain plus the per-hop fee rate.
///
/// Construction is the only place reserves and fee are checked; the profit
/// model itself assumes a well-formed chain.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ChainConfig {
    pools: Vec<LiquidityPool>,
    fee_rate: f64,
}

impl ChainConfig {
    pub fn new(pools: Vec<LiquidityPool>, fee_rate: f64) -> Result<Self, SearchError> {
        if pools.is_empty() {
            return Err(SearchError::EmptyChain);
        }
        if let Some((index, pool)) = pools.iter().enumerate().find(|(_, p)| !p.is_valid()) {
            return Err(SearchError::InvalidReserve {
                index,
                reserve_in: pool.reserve_in,
                reserve_out: pool.reserve_out,
            });
        }
        if !fee_rate.is_finite() || !(0.0..1.0).contains(&fee_rate) {
            return Err(SearchError::InvalidFeeRate(fee_rate));
        }
        Ok(Self { pools, fee_rate })
    }

    pub fn from_pairs(pairs: &[(f64, f64)], fee_rate: f64) -> Result<Self, SearchError> {
        let pools = pairs.iter().map(|&(rin, rout)| LiquidityPool::new(rin, rout)).collect();
        Self::new(pools, fee_rate)
    }

    /// The five-pool sample chain at the default fee.
    pub fn default_chain() -> Self {
        Self {
            pools: DEFAULT_POOLS.iter().map(|&(rin, rout)| LiquidityPool::new(rin, rout)).collect(),
            fee_rate: DEFAULT_FEE_RATE,
        }
    }

    /// Walk the same cycle backwards (last pool first, each pool flipped).
    pub fn reversed(&self) -> Self {
        Self {
            pools: self.pools.iter().rev().map(LiquidityPool::flipped).collect(),
            fee_rate: self.fee_rate,
        }
    }

    pub fn with_fee_rate(&self, fee_rate: f64) -> Result<Self, SearchError> {
        Self::new(self.pools.clone(), fee_rate)
    }

    pub fn pools(&self) -> &[LiquidityPool] {
        &self.pools
    }

    pub fn fee_rate(&self) -> f64 {
        self.fee_rate
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// Bracket `[lower, upper]` of candidate trade amounts.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchInterval {
    pub lower: f64,
    pub upper: f64,
}

impl SearchInterval {
    /// Trade-amount bracket: both bounds finite, non-negative, `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, SearchError> {
        if !lower.is_finite() || !upper.is_finite() || lower < 0.0 || lower >= upper {
            return Err(SearchError::InvalidInterval { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl Default for SearchInterval {
    fn default() -> Self {
        Self { lower: 0.0, upper: 1e11 }
    }
}
