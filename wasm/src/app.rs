//! Page orchestration
//!
//! On load: detect the season, resolve the location (with fallback), fill
//! the soil placeholder, create the map once and wire up the form.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use shared::{
    format_coordinate, render_recommendation, resolve_location, Coordinates, CropImageCatalog,
    GeolocationPolicy, LocationPoint, LocationTracker, MapHandle, Resolution, Season, SubmitGuard,
    AUTO_SOIL, BUSY_LABEL,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlButtonElement};

use crate::dom;
use crate::form::{self, SubmitError};
use crate::geolocation::BrowserGeolocation;
use crate::map::LeafletBackend;
use crate::render::DomResults;

const SUBMIT_BUTTON: &str = r#"#crop-form button[type="submit"]"#;

pub struct App {
    document: Document,
    endpoint: String,
    policy: GeolocationPolicy,
    tracker: RefCell<LocationTracker>,
    map: RefCell<MapHandle<LeafletBackend>>,
    guard: SubmitGuard,
    catalog: CropImageCatalog,
}

impl App {
    pub fn new(document: Document) -> Rc<Self> {
        let endpoint = form::endpoint_or_default(dom::body_data(&document, "apiEndpoint"));
        let policy = match dom::body_data(&document, "geoRetry").as_deref() {
            Some("off") => GeolocationPolicy::single_attempt(),
            _ => GeolocationPolicy::default(),
        };

        Rc::new_cyclic(|weak: &Weak<App>| {
            let weak = weak.clone();
            let backend = LeafletBackend::new("map", move |coords| {
                if let Some(app) = weak.upgrade() {
                    app.on_marker_drag(coords);
                }
            });

            App {
                document,
                endpoint,
                policy,
                tracker: RefCell::new(LocationTracker::new()),
                map: RefCell::new(MapHandle::new(backend)),
                guard: SubmitGuard::new(),
                catalog: CropImageCatalog::default(),
            }
        })
    }

    /// Run the load sequence
    pub async fn mount(self: Rc<Self>) -> Result<(), JsValue> {
        self.detect_season()?;
        self.setup_form()?;
        self.detect_location().await;
        Ok(())
    }

    fn detect_season(&self) -> Result<(), JsValue> {
        let season = Season::current();
        dom::set_body_data(&self.document, "season", season.as_str())?;
        dom::set_text(&self.document, r#"[data-context="season"]"#, &season.detected_label());
        Ok(())
    }

    async fn detect_location(&self) {
        let source = BrowserGeolocation::from_window();
        let resolution = resolve_location(&source, &self.policy).await;

        for err in &resolution.errors {
            dom::warn(&format!("Geolocation error: {}", err));
        }
        self.apply_resolution(&resolution);
    }

    fn apply_resolution(&self, resolution: &Resolution) {
        self.tracker.borrow_mut().apply_resolution(resolution);
        let point = &resolution.point;

        if resolution.used_default() {
            self.write_location(point);
            dom::set_text(
                &self.document,
                "#location-name",
                &format!("Location unavailable — using {}", point.name),
            );
            dom::set_text(&self.document, r#"[data-context="location"]"#, "📍 Manual location");
        } else {
            dom::log(&format!(
                "Location detected: {}, {}",
                point.latitude, point.longitude
            ));
            self.write_location(point);
        }

        self.auto_detect_soil();

        if let Err(e) = self.map.borrow_mut().initialize(point) {
            dom::error(&e);
        }
    }

    fn write_location(&self, point: &LocationPoint) {
        dom::set_field_value(
            &self.document,
            r#"input[name="latitude"]"#,
            &format_coordinate(point.latitude),
        );
        dom::set_field_value(
            &self.document,
            r#"input[name="longitude"]"#,
            &format_coordinate(point.longitude),
        );
        dom::set_field_value(&self.document, r#"input[name="location_name"]"#, &point.name);
        dom::set_text(&self.document, "#location-name", &point.name);
        dom::set_text(&self.document, r#"[data-context="location"]"#, "📍 Location set");
    }

    fn on_marker_drag(&self, coords: Coordinates) {
        let point = self.tracker.borrow_mut().set_manual(coords).clone();
        self.write_location(&point);
    }

    fn auto_detect_soil(&self) {
        if let Err(e) = dom::set_body_data(&self.document, "soil", AUTO_SOIL) {
            dom::error(&e);
        }
        dom::set_text(
            &self.document,
            r#"[data-context="soil"]"#,
            "🪴 Soil: Loamy (auto-filled)",
        );
    }

    fn setup_form(self: &Rc<Self>) -> Result<(), JsValue> {
        let form = dom::query(&self.document, "#crop-form")?;
        let app = Rc::clone(self);
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let app = Rc::clone(&app);
            wasm_bindgen_futures::spawn_local(async move { app.submit().await });
        });
        form.add_event_listener_with_callback("submit", handler.as_ref().unchecked_ref())?;
        // The form lives for the whole page, and so does its handler
        handler.forget();
        Ok(())
    }

    async fn submit(&self) {
        let Some(_ticket) = self.guard.try_begin() else {
            dom::log("Submission already in progress");
            return;
        };

        self.set_status("");
        let button = self.submit_button();
        let idle_label = button.as_ref().and_then(|b| b.text_content());
        if let Some(b) = &button {
            b.set_disabled(true);
            b.set_text_content(Some(BUSY_LABEL));
        }

        let result = self.request_and_render().await;

        if let Some(b) = &button {
            b.set_disabled(false);
            b.set_text_content(idle_label.as_deref());
        }

        if let Err(e) = result {
            dom::warn(&e.to_string());
            self.set_status(&e.user_message());
        }
    }

    async fn request_and_render(&self) -> Result<(), SubmitError> {
        let ctx = form::build_payload(&self.document)?;
        let response = form::post_recommendation(&self.endpoint, &ctx).await?;

        let mut results = DomResults::from_document(&self.document).map_err(|e| {
            SubmitError::Decode(e.as_string().unwrap_or_else(|| "results region missing".into()))
        })?;
        render_recommendation(&mut results, &response.ai, &self.catalog)
            .map_err(|_| SubmitError::Decode("failed to render results".into()))?;
        Ok(())
    }

    fn submit_button(&self) -> Option<HtmlButtonElement> {
        self.document
            .query_selector(SUBMIT_BUTTON)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    }

    fn set_status(&self, message: &str) {
        dom::set_text(&self.document, "#form-status", message);
    }
}
