use rocket::serde::{Deserialize, Serialize};

use crate::math::constant_product::Precision;

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ChainSearchRequest {
    /// `[reserve_in, reserve_out]` per hop, in trade order.
    pub pools: Vec<[f64; 2]>,
    pub fee_rate: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub tolerance: Option<f64>,
    pub precision: Option<PrecisionDto>,
    #[serde(default)]
    pub compare_baselines: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum PrecisionDto {
    Double,
    Decimal,
}

impl From<PrecisionDto> for Precision {
    fn from(p: PrecisionDto) -> Self {
        match p {
            PrecisionDto::Double => Precision::Double,
            PrecisionDto::Decimal => Precision::Decimal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct GoldenSectionDetails {
    pub initial_amount: f64,
    pub profit: f64,
    pub final_amount: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub profit_at_lower_bound: f64,
    pub profit_at_upper_bound: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct BaselineDetails {
    pub name: String,
    pub initial_amount: Option<f64>,
    pub profit: Option<f64>,
    pub evaluations: Option<usize>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ChainSearchResponse {
    pub timestamp_utc: String,
    pub pool_count: usize,
    pub fee_rate: f64,
    pub profitable: bool,
    pub recommended_action: String,
    pub marginal_profit_at_zero: f64,
    pub golden_section: GoldenSectionDetails,
    pub hop_amounts: Vec<f64>,
    pub baselines: Vec<BaselineDetails>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct DefaultChainResponse {
    pub pools: Vec<[f64; 2]>,
    pub fee_rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub timestamp_utc: String,
    pub error: String,
}
