//! HTTP server for the wedding site
//!
//! The `ServerBuilder` wires storage backends into the site services and
//! exposes them as a REST API.

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::SiteHost;
