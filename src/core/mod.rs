//! Core module containing the traits and types shared by every feature

pub mod entity;
pub mod error;
pub mod query;
pub mod service;
pub mod validation;

pub use entity::Entity;
pub use error::{SiteError, SiteResult};
pub use query::{Direction, OrderBy};
pub use service::{ConditionalUpdate, DataService, FileStorage, StoredFile};
