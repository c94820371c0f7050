//! Shared types and logic for the Crop Advisor
//!
//! This crate contains the domain model exchanged between the backend and the
//! browser client (via WASM), along with the client-side orchestration logic
//! that does not depend on a browser: season detection, the geolocation
//! fallback chain, the map handle and result rendering.

pub mod catalog;
pub mod geolocation;
pub mod map;
pub mod models;
pub mod render;
pub mod submit;
pub mod validation;

pub use catalog::*;
pub use geolocation::*;
pub use map::*;
pub use models::*;
pub use render::*;
pub use submit::*;
pub use validation::*;
