use crate::error::ApiError;
use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use stock_insight_analytics::{AnalysisReport, AnalysisService};
use stock_insight_core::PayoffConfig;
use stock_insight_market_data::MarketDataProvider;
use stock_insight_payoff::{
    break_even_points, default_price_range, generate_curve, CurvePoint, Position, PriceRange,
};

/// Shared handler state.
pub struct AppState {
    pub analysis: AnalysisService,
    pub market: Arc<dyn MarketDataProvider>,
    pub payoff: PayoffConfig,
}

#[derive(Deserialize)]
pub struct RangeRequest {
    pub low: Decimal,
    pub high: Decimal,
}

#[derive(Deserialize)]
pub struct CurveRequest {
    pub position: Position,
    /// Derived from the live quote when omitted.
    pub range: Option<RangeRequest>,
    pub samples: Option<usize>,
}

#[derive(Serialize)]
pub struct CurveResponse {
    pub low: Decimal,
    pub high: Decimal,
    pub points: Vec<CurvePoint>,
}

#[derive(Deserialize)]
pub struct BreakEvenRequest {
    pub position: Position,
    pub range: Option<RangeRequest>,
}

#[derive(Serialize)]
pub struct BreakEvenResponse {
    pub low: Decimal,
    pub high: Decimal,
    pub break_evens: Vec<Decimal>,
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Runs the full three-section analysis for one ticker.
///
/// # Errors
/// Returns 400 for a malformed ticker. Upstream failures degrade to
/// per-section errors inside the report rather than failing the request.
pub async fn analyze_ticker(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let ticker = ticker.trim();
    let valid = !ticker.is_empty()
        && ticker.len() <= 10
        && ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if !valid {
        return Err(ApiError::BadRequest(format!("invalid ticker: {ticker:?}")));
    }

    Ok(Json(state.analysis.analyze(ticker).await))
}

/// Samples a payoff curve for a position.
///
/// # Errors
/// Returns 422 when the position or range fails engine validation.
pub async fn payoff_curve(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CurveRequest>,
) -> Result<Json<CurveResponse>, ApiError> {
    let range = resolve_range(&state, &req.position, req.range.as_ref()).await?;
    let samples = req.samples.unwrap_or(state.payoff.curve_samples);
    let points = generate_curve(&req.position, range, samples)?;

    Ok(Json(CurveResponse {
        low: range.low,
        high: range.high,
        points,
    }))
}

/// Finds the break-even prices of a position inside a range.
///
/// # Errors
/// Returns 422 when the position or range fails engine validation.
pub async fn payoff_break_even(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BreakEvenRequest>,
) -> Result<Json<BreakEvenResponse>, ApiError> {
    let range = resolve_range(&state, &req.position, req.range.as_ref()).await?;
    let break_evens = break_even_points(&req.position, range)?;

    Ok(Json(BreakEvenResponse {
        low: range.low,
        high: range.high,
        break_evens,
    }))
}

/// Uses the caller's range when given, otherwise derives one around the
/// live quote (or the position's own cost basis when the quote fails).
async fn resolve_range(
    state: &AppState,
    position: &Position,
    requested: Option<&RangeRequest>,
) -> Result<PriceRange, ApiError> {
    if let Some(range) = requested {
        return Ok(PriceRange::new(range.low, range.high)?);
    }

    let spot = match state.market.quote(&position.ticker).await {
        Ok(quote) => Some(quote.price),
        Err(err) => {
            tracing::warn!(
                ticker = %position.ticker,
                error = %err,
                "quote unavailable, deriving range from position"
            );
            None
        }
    };

    Ok(default_price_range(
        position,
        spot,
        state.payoff.default_range_pct,
    )?)
}
