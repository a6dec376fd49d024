//! API exposure
//!
//! The REST exposure consumes a `SiteHost` and produces an Axum router.

pub mod rest;

pub use rest::RestExposure;
