//! Service traits for row storage and file storage

use crate::core::Entity;
use crate::core::query::OrderBy;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing rows of one table
///
/// Implementations provide row-level reads and writes keyed by primary key.
/// The site is agnostic to the underlying storage mechanism.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Insert a new row
    async fn insert(&self, entity: T) -> Result<T>;

    /// Get a row by primary key
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all rows in the given order
    async fn list(&self, order: &OrderBy) -> Result<Vec<T>>;

    /// Replace an existing row
    ///
    /// Fails when no row has this primary key.
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Replace an existing row only if `condition` holds for the stored one
    ///
    /// The check and the write must be atomic with respect to other writers.
    async fn update_if(
        &self,
        id: &Uuid,
        entity: T,
        condition: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync),
    ) -> Result<ConditionalUpdate<T>>;
}

/// Outcome of [`DataService::update_if`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionalUpdate<T> {
    /// The row was replaced; holds the new row
    Updated(T),
    /// The condition failed; holds the row as stored
    Rejected(T),
    /// No row has this primary key
    Missing,
}

/// A file kept by a [`FileStorage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Object name inside the bucket
    pub name: String,

    /// MIME type given at upload time
    pub content_type: String,

    /// Size in bytes
    pub size: usize,
}

/// Service trait for storing uploaded files
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Upload a file under `name`
    ///
    /// Fails if an object with the same name already exists.
    async fn upload(&self, name: &str, content_type: &str, bytes: Vec<u8>) -> Result<StoredFile>;

    /// Public URL of an uploaded object
    fn public_url(&self, name: &str) -> String;
}
