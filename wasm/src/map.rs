//! Leaflet map backend
//!
//! Binds the handful of Leaflet calls the page needs. Leaflet itself is
//! loaded by the page as the global `L`.

use std::rc::Rc;

use js_sys::Array;
use shared::{Coordinates, MapBackend};
use wasm_bindgen::prelude::*;

use crate::dom;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    pub type LeafletMap;

    #[derive(Clone)]
    pub type Marker;

    type TileLayer;

    type LatLng;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn leaflet_map(container_id: &str) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &Array, zoom: u8) -> LeafletMap;

    #[wasm_bindgen(method, js_name = panTo)]
    fn pan_to(this: &LeafletMap, center: &Array) -> LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Result<TileLayer, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_layer_to(this: &TileLayer, map: &LeafletMap) -> TileLayer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    fn leaflet_marker(at: &Array, options: &JsValue) -> Result<Marker, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_marker_to(this: &Marker, map: &LeafletMap) -> Marker;

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_lat_lng(this: &Marker, at: &Array) -> Marker;

    #[wasm_bindgen(method, js_name = getLatLng)]
    fn get_lat_lng(this: &Marker) -> LatLng;

    #[wasm_bindgen(method)]
    fn on(this: &Marker, event: &str, handler: &JsValue) -> Marker;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &LatLng) -> f64;
}

fn lat_lng(coords: Coordinates) -> Array {
    Array::of2(&coords.latitude.into(), &coords.longitude.into())
}

/// A live Leaflet map with its draggable marker
pub struct MapInstance {
    pub map: LeafletMap,
    pub marker: Marker,
}

/// Creates the map inside the element with `container_id`.
/// `on_drag` receives the marker position after every drag.
pub struct LeafletBackend {
    container_id: String,
    on_drag: Rc<dyn Fn(Coordinates)>,
}

impl LeafletBackend {
    pub fn new(container_id: impl Into<String>, on_drag: impl Fn(Coordinates) + 'static) -> Self {
        Self {
            container_id: container_id.into(),
            on_drag: Rc::new(on_drag),
        }
    }
}

impl MapBackend for LeafletBackend {
    type Map = MapInstance;
    type Error = JsValue;

    fn create(&self, center: Coordinates, zoom: u8) -> Result<MapInstance, JsValue> {
        let map = leaflet_map(&self.container_id)?;
        map.set_view(&lat_lng(center), zoom);

        let tile_options = dom::js_object(&[("attribution", JsValue::from_str(TILE_ATTRIBUTION))])?;
        tile_layer(TILE_URL, &tile_options)?.add_layer_to(&map);

        let marker_options = dom::js_object(&[("draggable", JsValue::from_bool(true))])?;
        let marker = leaflet_marker(&lat_lng(center), &marker_options)?;
        marker.add_marker_to(&map);

        let dragged = marker.clone();
        let on_drag = Rc::clone(&self.on_drag);
        let handler = Closure::<dyn FnMut()>::new(move || {
            let pos = dragged.get_lat_lng();
            on_drag(Coordinates::new(pos.lat(), pos.lng()));
        });
        marker.on("dragend", handler.as_ref());
        // The marker lives for the whole page, and so does its handler
        handler.forget();

        Ok(MapInstance { map, marker })
    }

    fn move_marker(&self, instance: &MapInstance, to: Coordinates) -> Result<(), JsValue> {
        let at = lat_lng(to);
        instance.marker.set_lat_lng(&at);
        instance.map.pan_to(&at);
        Ok(())
    }
}
