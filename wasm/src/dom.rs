//! Small DOM helpers

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn body(document: &Document) -> Result<HtmlElement, JsValue> {
    document.body().ok_or_else(|| JsValue::from_str("no body"))
}

/// Required element
pub fn query(document: &Document, selector: &str) -> Result<Element, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("missing element: {}", selector)))
}

/// Set the text of a feedback element; missing elements are ignored
pub fn set_text(document: &Document, selector: &str, text: &str) {
    if let Ok(Some(el)) = document.query_selector(selector) {
        el.set_text_content(Some(text));
    }
}

/// Current value of an input or select, empty when absent
pub fn field_value(document: &Document, selector: &str) -> String {
    let Ok(Some(el)) = document.query_selector(selector) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        el.text_content().unwrap_or_default()
    }
}

pub fn set_field_value(document: &Document, selector: &str, value: &str) {
    if let Ok(Some(el)) = document.query_selector(selector) {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }
}

/// Read a `data-*` attribute of `<body>`
pub fn body_data(document: &Document, key: &str) -> Option<String> {
    document.body().and_then(|b| b.dataset().get(key))
}

pub fn set_body_data(document: &Document, key: &str, value: &str) -> Result<(), JsValue> {
    body(document)?.dataset().set(key, value)
}

/// Plain JS object from key/value pairs
pub fn js_object(pairs: &[(&str, JsValue)]) -> Result<Object, JsValue> {
    let object = Object::new();
    for (key, value) in pairs {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object)
}

pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

pub fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

pub fn error(value: &JsValue) {
    web_sys::console::error_1(value);
}
