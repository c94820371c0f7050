//! HTTP request handlers

pub mod health;
pub mod recommend;

pub use health::*;
pub use recommend::*;
