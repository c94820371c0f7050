//! WebAssembly client for the Crop Advisor
//!
//! Runs the page: season detection, geolocation with fallback, the map,
//! form submission and rendering of the recommendation. Pure helpers are
//! also exported for use from JavaScript.

use shared::{normalize_crop_name, CropImageCatalog, Season};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod app;
mod dom;
pub mod form;
pub mod geolocation;
pub mod map;
pub mod render;

/// Initialize the WASM module and start the page once it has loaded
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    // Set up panic hook for better error messages in browser console
    console_error_panic_hook::set_once();

    let document = dom::document()?;
    if document.ready_state() == "complete" {
        start(document);
    } else {
        let window = dom::window()?;
        let on_load = Closure::once_into_js(move || start(document));
        window.add_event_listener_with_callback("load", on_load.unchecked_ref())?;
    }
    Ok(())
}

fn start(document: web_sys::Document) {
    let app = app::App::new(document);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = app.mount().await {
            dom::error(&e);
        }
    });
}

/// Season for today's date ("kharif", "rabi" or "zaid")
#[wasm_bindgen]
pub fn detect_season() -> String {
    Season::current().as_str().to_string()
}

/// Season for a calendar month (1 = January)
#[wasm_bindgen]
pub fn season_for_month(month: u32) -> String {
    Season::from_month(month).as_str().to_string()
}

/// Catalog key for a crop name
#[wasm_bindgen]
pub fn crop_key(name: &str) -> String {
    normalize_crop_name(name)
}

/// Image reference for a crop name, or the generic image
#[wasm_bindgen]
pub fn crop_image(name: &str) -> String {
    CropImageCatalog::default().image_for(name).to_string()
}
