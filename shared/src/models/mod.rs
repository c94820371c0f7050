//! Domain models for the Crop Advisor

mod form;
mod location;
mod recommendation;
mod season;
mod weather;

pub use form::*;
pub use location::*;
pub use recommendation::*;
pub use season::*;
pub use weather::*;
