//! Quote calculation route.

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::CalculateRequest;
use crate::error::ApiError;
use crate::pricing;

/// Reject dimensions the engine cannot meaningfully price. Enumerated
/// fields are already constrained at deserialization; only the free-form
/// numbers need a gate here.
fn validate(req: &CalculateRequest) -> Result<(), ApiError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(req.house.length_m) || !valid(req.house.width_m) {
        return Err(ApiError::BadRequest(
            "house dimensions must be positive numbers".to_string(),
        ));
    }
    Ok(())
}

/// POST /calculate
///
/// Compute an itemized quote for one house configuration. Missing reference
/// rows price as zero; only a store failure produces an error response.
pub async fn calculate_quote(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CalculateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&req)?;

    tracing::info!(
        length_m = req.house.length_m,
        width_m = req.house.width_m,
        tech = %req.insulation.build_tech,
        windows = req.windows.len(),
        addons = req.addons.len(),
        "Calculating quote"
    );

    let quote = pricing::calculate(&state.store, &req).await?;
    Ok(Json(quote))
}
