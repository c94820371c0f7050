//! HTTP handler for crop recommendations

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use shared::{FormContext, RecommendResponse};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::{RecommendationService, WeatherService};
use crate::AppState;

/// Produce a recommendation for the submitted form context
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<FormContext>, JsonRejection>,
) -> AppResult<Json<RecommendResponse>> {
    let Json(ctx) = payload.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;
    ctx.validate()?;

    tracing::info!(
        location = %ctx.location.name,
        season = %ctx.season,
        budget = %ctx.budget,
        "Recommendation requested"
    );

    let service = RecommendationService::new(
        WeatherService::new(state.weather.clone()),
        state.model.clone(),
    );
    let response = service.recommend(&ctx).await?;
    Ok(Json(response))
}
