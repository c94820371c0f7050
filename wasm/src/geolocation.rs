//! Browser geolocation as a [`PositionSource`]

use js_sys::{Function, Promise, Reflect};
use shared::{Coordinates, PositionError, PositionRequest, PositionSource};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Geolocation, PositionOptions};

use crate::dom;

/// `navigator.geolocation`, if the browser has it
pub struct BrowserGeolocation {
    geolocation: Option<Geolocation>,
}

impl BrowserGeolocation {
    pub fn from_window() -> Self {
        let geolocation = dom::window()
            .ok()
            .and_then(|w| w.navigator().geolocation().ok());
        Self::new(geolocation)
    }

    /// Browsers without the API hand back `undefined` rather than an error
    pub fn new(geolocation: Option<Geolocation>) -> Self {
        let geolocation = geolocation.filter(|g| {
            let value: &JsValue = g.as_ref();
            !value.is_undefined() && !value.is_null()
        });
        Self { geolocation }
    }
}

impl PositionSource for BrowserGeolocation {
    fn is_available(&self) -> bool {
        self.geolocation.is_some()
    }

    async fn current_position(
        &self,
        request: PositionRequest,
    ) -> Result<Coordinates, PositionError> {
        let geolocation = self.geolocation.as_ref().ok_or(PositionError::NotSupported)?;
        let options = position_options(&request)
            .map_err(|e| PositionError::Unavailable(describe(&e)))?;

        // The success and error callbacks settle the promise directly
        let promise = Promise::new(&mut |resolve: Function, reject: Function| {
            if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
                &resolve,
                Some(&reject),
                &options,
            ) {
                let _ = reject.call1(&JsValue::NULL, &e);
            }
        });

        match JsFuture::from(promise).await {
            Ok(position) => read_coordinates(&position),
            Err(err) => Err(read_error(&err)),
        }
    }
}

fn position_options(request: &PositionRequest) -> Result<PositionOptions, JsValue> {
    let options = dom::js_object(&[
        ("enableHighAccuracy", JsValue::from_bool(request.high_accuracy)),
        ("timeout", JsValue::from_f64(request.timeout.as_millis() as f64)),
        ("maximumAge", JsValue::from_f64(request.maximum_age.as_millis() as f64)),
    ])?;
    Ok(options.unchecked_into())
}

fn read_coordinates(position: &JsValue) -> Result<Coordinates, PositionError> {
    let coords = Reflect::get(position, &"coords".into())
        .map_err(|e| PositionError::Unavailable(describe(&e)))?;
    let number = |key: &str| {
        Reflect::get(&coords, &key.into())
            .ok()
            .and_then(|v| v.as_f64())
            .ok_or_else(|| PositionError::Unavailable(format!("position has no {}", key)))
    };
    Ok(Coordinates::new(number("latitude")?, number("longitude")?))
}

fn read_error(err: &JsValue) -> PositionError {
    let code = Reflect::get(err, &"code".into())
        .ok()
        .and_then(|v| v.as_f64())
        .map(|c| c as u16);
    match code {
        Some(code) => PositionError::from_code(code, describe(err)),
        None => PositionError::Unavailable(describe(err)),
    }
}

fn describe(value: &JsValue) -> String {
    Reflect::get(value, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_undefined_api_is_unavailable() {
        let missing = BrowserGeolocation::new(Some(JsValue::UNDEFINED.unchecked_into()));
        assert!(!missing.is_available());
        assert!(!BrowserGeolocation::new(Some(JsValue::NULL.unchecked_into())).is_available());
        assert!(!BrowserGeolocation::new(None).is_available());
    }

    #[wasm_bindgen_test]
    async fn test_undefined_api_resolves_to_default() {
        let source = BrowserGeolocation::new(Some(JsValue::UNDEFINED.unchecked_into()));
        let policy = shared::GeolocationPolicy::default();
        let resolution = shared::resolve_location(&source, &policy).await;

        assert!(resolution.used_default());
        assert_eq!(resolution.errors, vec![PositionError::NotSupported]);
    }
}
