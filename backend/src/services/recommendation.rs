//! Recommendation orchestration
//!
//! weather (with fallback) -> prompt -> generative model -> fence strip ->
//! typed parse -> shape validation. There is no repair or retry of a bad
//! model reply.

use shared::{validate_recommendation, FormContext, RecommendResponse, Recommendation};

use crate::error::{AppError, AppResult};
use crate::external::GenerativeModelClient;
use crate::services::prompt::build_prompt;
use crate::services::WeatherService;

#[derive(Clone)]
pub struct RecommendationService {
    weather: WeatherService,
    model: GenerativeModelClient,
}

impl RecommendationService {
    pub fn new(weather: WeatherService, model: GenerativeModelClient) -> Self {
        Self { weather, model }
    }

    pub async fn recommend(&self, ctx: &FormContext) -> AppResult<RecommendResponse> {
        let reading = self
            .weather
            .current_or_fallback(ctx.location.latitude, ctx.location.longitude)
            .await;

        let prompt = build_prompt(ctx, &reading.snapshot);
        tracing::debug!(model = self.model.model(), prompt_len = prompt.len(), "Invoking generative model");

        let raw = self.model.generate(&prompt).await?;
        let ai = parse_recommendation(&raw)?;

        tracing::info!(
            season = %ctx.season,
            weather_source = ?reading.source,
            best_crops = ai.best_crops.len(),
            "Recommendation generated"
        );

        Ok(RecommendResponse {
            weather: reading.snapshot,
            ai,
        })
    }
}

/// Remove every literal "```json" and "```" marker, then trim
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a raw model reply into a validated recommendation
pub fn parse_recommendation(raw: &str) -> AppResult<Recommendation> {
    let cleaned = strip_code_fences(raw);

    let recommendation: Recommendation = serde_json::from_str(&cleaned)
        .map_err(|e| AppError::AiResponse(format!("reply is not a valid recommendation: {}", e)))?;

    validate_recommendation(&recommendation).map_err(|e| AppError::AiResponse(e.to_string()))?;

    Ok(recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"{
        "best_crops": [{"name": "Mustard", "water_need": "Low", "reason": "Tolerates dry rabi"}],
        "budget_friendly": ["Chickpea"],
        "not_recommended": ["Rice"],
        "explanation": "Rainfall is low this week."
    }"#;

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```{}```"), "{}");
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_plain_and_fenced() {
        let plain = parse_recommendation(REPLY).unwrap();
        let fenced = parse_recommendation(&format!("```json\n{}\n```", REPLY)).unwrap();
        assert_eq!(plain, fenced);
        assert_eq!(plain.best_crops[0].name, "Mustard");
        assert_eq!(plain.not_recommended, vec!["Rice"]);
    }

    #[test]
    fn test_invalid_json_is_ai_response_error() {
        let err = parse_recommendation("Sure! Here are some crops: millet, sorghum").unwrap_err();
        assert!(matches!(err, AppError::AiResponse(_)));
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        // budget_friendly must be an array of strings
        let reply = r#"{"best_crops": [], "budget_friendly": "millet", "not_recommended": [], "explanation": "x"}"#;
        assert!(matches!(parse_recommendation(reply), Err(AppError::AiResponse(_))));

        // water_need is required
        let reply = r#"{"best_crops": [{"name": "Millet", "reason": "dry"}], "budget_friendly": [], "not_recommended": [], "explanation": "x"}"#;
        assert!(matches!(parse_recommendation(reply), Err(AppError::AiResponse(_))));
    }

    #[test]
    fn test_empty_crop_name_is_rejected() {
        let reply = r#"{"best_crops": [{"name": "", "water_need": "Low", "reason": "?"}], "budget_friendly": [], "not_recommended": [], "explanation": "x"}"#;
        assert!(matches!(parse_recommendation(reply), Err(AppError::AiResponse(_))));
    }
}
