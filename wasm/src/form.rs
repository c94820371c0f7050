//! Form payload assembly and submission

use js_sys::Reflect;
use shared::{ErrorBody, FormContext, FormFieldError, FormFields, RecommendResponse};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Request, RequestInit, RequestMode, Response};

use crate::dom;

/// Endpoint used when the page does not name one
pub const DEFAULT_ENDPOINT: &str = "/recommend";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Form(#[from] FormFieldError),

    #[error("could not reach the server: {0}")]
    Network(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl SubmitError {
    /// Text shown to the farmer
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Form(e) => format!("Please check the form: {}", e),
            SubmitError::Network(_) => {
                "Could not reach the advisor. Check your connection and try again.".to_string()
            }
            SubmitError::Server { message, .. } => format!("The advisor failed: {}", message),
            SubmitError::Decode(_) => "The advisor sent an unexpected reply.".to_string(),
        }
    }
}

/// Pick the configured endpoint, falling back to [`DEFAULT_ENDPOINT`]
pub fn endpoint_or_default(configured: Option<String>) -> String {
    configured
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

/// Read the live field values; nothing here is cached between submissions
pub fn read_fields(document: &Document) -> FormFields {
    FormFields {
        location_name: dom::field_value(document, r#"input[name="location_name"]"#),
        latitude: dom::field_value(document, r#"input[name="latitude"]"#),
        longitude: dom::field_value(document, r#"input[name="longitude"]"#),
        season: dom::body_data(document, "season").unwrap_or_default(),
        soil: dom::body_data(document, "soil").unwrap_or_default(),
        budget: dom::field_value(document, r#"select[name="budget"]"#),
        crop_preference: dom::field_value(document, r#"select[name="crop_preference"]"#),
        previous_crop: dom::field_value(document, r#"select[name="previous_crop"]"#),
        risk_level: dom::field_value(document, r#"select[name="risk_level"]"#),
    }
}

pub fn build_payload(document: &Document) -> Result<FormContext, SubmitError> {
    Ok(FormContext::try_from(read_fields(document))?)
}

/// POST the context as JSON and decode the reply
pub async fn post_recommendation(
    endpoint: &str,
    ctx: &FormContext,
) -> Result<RecommendResponse, SubmitError> {
    let body = serde_json::to_string(ctx).map_err(|e| SubmitError::Decode(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(endpoint, &opts).map_err(network)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(network)?;

    let window = dom::window().map_err(network)?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?;
    let response: Response = response.dyn_into().map_err(network)?;

    let text = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or_else(|_| response.status_text());
        return Err(SubmitError::Server {
            status: response.status(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| SubmitError::Decode(e.to_string()))
}

fn network(err: JsValue) -> SubmitError {
    let message = Reflect::get(&err, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "request failed".to_string());
    SubmitError::Network(message)
}
