use rocket::response::status::BadRequest;
use rocket::serde::json::{self, Json};
use rocket::{get, post, State};
use std::sync::Arc;

use crate::bootstrap::AppState;
use crate::engine::service::{compare_baselines, search_chain, SearchOutcome, SearchParams};
use crate::math::constant_product::Precision;
use crate::models::{ChainConfig, LiquidityPool, SearchInterval, MAX_FEE_RATE};
use crate::web::dto::{
    BaselineDetails, ChainSearchRequest, ChainSearchResponse, DefaultChainResponse, ErrorResponse,
    GoldenSectionDetails,
};

/// Pool counts accepted over HTTP.
pub const MIN_POOLS: usize = 3;
pub const MAX_POOLS: usize = 10;

type ApiError = BadRequest<Json<ErrorResponse>>;

fn bad_request(message: impl Into<String>) -> ApiError {
    let error = message.into();
    log::warn!("rejected chain search: {}", error);
    BadRequest(Json(ErrorResponse { timestamp_utc: chrono::Utc::now().to_rfc3339(), error }))
}

#[post("/api/v1/chain-search", format = "json", data = "<request>")]
pub fn chain_search(
    request: Result<Json<ChainSearchRequest>, json::Error<'_>>,
    app_state: &State<Arc<AppState>>,
) -> Result<Json<ChainSearchResponse>, ApiError> {
    // body errors get the same JSON shape as validation errors
    let request = request
        .map_err(|e| bad_request(format!("malformed request body: {}", e)))?
        .into_inner();

    if !(MIN_POOLS..=MAX_POOLS).contains(&request.pools.len()) {
        return Err(bad_request(format!(
            "pool count must be between {} and {}, got {}",
            MIN_POOLS, MAX_POOLS, request.pools.len()
        )));
    }
    let fee_rate = request.fee_rate.unwrap_or(app_state.default_fee_rate);
    if !(0.0..=MAX_FEE_RATE).contains(&fee_rate) {
        return Err(bad_request(format!("fee_rate must be between 0 and {}, got {}", MAX_FEE_RATE, fee_rate)));
    }

    let pools = request.pools.iter().map(|&[rin, rout]| LiquidityPool::new(rin, rout)).collect();
    let chain = ChainConfig::new(pools, fee_rate).map_err(|e| bad_request(e.to_string()))?;

    let defaults = app_state.search;
    let interval = SearchInterval::new(
        request.lower_bound.unwrap_or(defaults.interval.lower),
        request.upper_bound.unwrap_or(defaults.interval.upper),
    )
    .map_err(|e| bad_request(e.to_string()))?;
    let params = SearchParams {
        interval,
        tolerance: request.tolerance.unwrap_or(defaults.tolerance),
        precision: request.precision.map(Precision::from).unwrap_or(defaults.precision),
        ..defaults
    };

    let search = search_chain(&chain, &params).map_err(|e| {
        log::error!("chain search failed: {}", e);
        bad_request(e.to_string())
    })?;

    let baselines = if request.compare_baselines {
        compare_baselines(&chain, interval, &app_state.baselines())
            .into_iter()
            .map(|run| match run.result {
                Ok(m) => BaselineDetails {
                    name: run.name.to_string(),
                    initial_amount: Some(m.argmax),
                    profit: Some(m.value),
                    evaluations: Some(m.evaluations),
                    error: None,
                },
                Err(e) => BaselineDetails {
                    name: run.name.to_string(),
                    initial_amount: None,
                    profit: None,
                    evaluations: None,
                    error: Some(e.to_string()),
                },
            })
            .collect()
    } else {
        Vec::new()
    };

    let report = &search.report;
    let (profit_at_lower_bound, profit_at_upper_bound) = report.boundary_values;
    Ok(Json(ChainSearchResponse {
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        pool_count: chain.len(),
        fee_rate: chain.fee_rate(),
        profitable: search.outcome.is_profitable(),
        recommended_action: search.outcome.recommended_action().to_string(),
        marginal_profit_at_zero: search.marginal_profit_at_zero,
        golden_section: GoldenSectionDetails {
            initial_amount: report.argmax,
            profit: report.value,
            final_amount: match search.outcome {
                SearchOutcome::Profitable { final_amount, .. } => final_amount,
                SearchOutcome::NoProfitableTrade { best_amount, best_profit } => best_amount + best_profit,
            },
            iterations: report.iterations,
            evaluations: report.evaluations,
            profit_at_lower_bound,
            profit_at_upper_bound,
        },
        hop_amounts: search.hop_amounts,
        baselines,
    }))
}

#[get("/api/v1/default-chain")]
pub fn default_chain(app_state: &State<Arc<AppState>>) -> Json<DefaultChainResponse> {
    let chain = ChainConfig::default_chain();
    Json(DefaultChainResponse {
        pools: chain.pools().iter().map(|p| [p.reserve_in, p.reserve_out]).collect(),
        fee_rate: app_state.default_fee_rate,
    })
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}
