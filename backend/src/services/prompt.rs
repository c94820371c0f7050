//! Prompt construction for the generative model

use std::fmt::Write;

use shared::{FormContext, WeatherSnapshot};

/// JSON shape the model is told to return
pub const RESPONSE_SCHEMA: &str = r#"{
  "best_crops": [
    { "name": "", "water_need": "", "reason": "" }
  ],
  "budget_friendly": [],
  "not_recommended": [],
  "explanation": ""
}"#;

const DECISION_RULES: &[&str] = &[
    "Avoid water-intensive crops if rainfall is low",
    "Prefer low-input crops if budget is low",
    "Be conservative",
    "This is decision support, NOT yield prediction",
];

/// Build the instruction embedding the farm context and current weather
pub fn build_prompt(ctx: &FormContext, weather: &WeatherSnapshot) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str("You are an agricultural decision-support system.\n");
    prompt.push_str("You do NOT chat.\n");
    prompt.push_str("You return ONLY valid JSON.\n\n");

    prompt.push_str("Context:\n");
    let _ = writeln!(prompt, "Location: {}", location_label(ctx));
    let _ = writeln!(prompt, "Season: {}", ctx.season);
    let _ = writeln!(prompt, "Soil: {}", ctx.soil);
    let _ = writeln!(prompt, "Budget: {}", ctx.budget);
    if let Some(previous) = &ctx.previous_crop {
        let _ = writeln!(prompt, "Previous crop: {}", previous);
    }
    if let Some(preference) = &ctx.crop_preference {
        let _ = writeln!(prompt, "Crop preference: {}", preference);
    }
    let _ = writeln!(prompt, "Risk tolerance: {}", ctx.risk_level);

    prompt.push_str("\nWeather:\n");
    let _ = writeln!(prompt, "Temperature: {} °C", weather.temp);
    let _ = writeln!(prompt, "Humidity: {} %", weather.humidity);
    let _ = writeln!(prompt, "Rainfall: {} mm", weather.rainfall);

    prompt.push_str("\nRules:\n");
    for rule in DECISION_RULES {
        let _ = writeln!(prompt, "- {}", rule);
    }

    prompt.push_str("\nReturn JSON ONLY:\n\n");
    prompt.push_str(RESPONSE_SCHEMA);
    prompt.push('\n');

    prompt
}

fn location_label(ctx: &FormContext) -> String {
    let name = ctx.location.name.trim();
    if name.is_empty() {
        format!("{:.4}, {:.4}", ctx.location.latitude, ctx.location.longitude)
    } else {
        name.to_string()
    }
}
