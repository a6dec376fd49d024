//! In-memory implementations of the storage traits for testing and development

use crate::core::{ConditionalUpdate, DataService, Entity, FileStorage, OrderBy, StoredFile};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory row service
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryDataService<T: Entity> {
    rows: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create an empty service
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a service holding `rows`
    pub fn with_rows(rows: impl IntoIterator<Item = T>) -> Self {
        let rows = rows.into_iter().map(|row| (row.id(), row)).collect();
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn insert(&self, entity: T) -> Result<T> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = entity.id();
        if rows.contains_key(&id) {
            bail!("{} with id '{}' already exists", T::entity_name(), id);
        }
        rows.insert(id, entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.get(id).cloned())
    }

    async fn list(&self, order: &OrderBy) -> Result<Vec<T>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut keyed: Vec<_> = rows
            .values()
            .map(|row| (row.field_value(&order.field), row.clone()))
            .collect();
        drop(rows);

        // Ties fall back to insertion time so listings are stable
        keyed.sort_by(|(a, ra), (b, rb)| {
            order
                .compare(a.as_ref(), b.as_ref())
                .then_with(|| ra.created_at().cmp(&rb.created_at()))
        });

        Ok(keyed.into_iter().map(|(_, row)| row).collect())
    }

    async fn update(&self, id: &Uuid, mut entity: T) -> Result<T> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = rows
            .get_mut(id)
            .ok_or_else(|| anyhow!("{} with id '{}' not found", T::entity_name(), id))?;
        entity.touch();
        *slot = entity.clone();

        Ok(entity)
    }

    async fn update_if(
        &self,
        id: &Uuid,
        mut entity: T,
        condition: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync),
    ) -> Result<ConditionalUpdate<T>> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(slot) = rows.get_mut(id) else {
            return Ok(ConditionalUpdate::Missing);
        };
        if !condition(slot) {
            return Ok(ConditionalUpdate::Rejected(slot.clone()));
        }

        entity.touch();
        *slot = entity.clone();
        Ok(ConditionalUpdate::Updated(entity))
    }
}

#[derive(Clone)]
struct StoredObject {
    file: StoredFile,
    bytes: Arc<Vec<u8>>,
}

/// In-memory file storage for one bucket
#[derive(Clone)]
pub struct InMemoryFileStorage {
    bucket: String,
    public_base_url: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl InMemoryFileStorage {
    /// Create a bucket whose objects are served under `public_base_url`
    pub fn new(bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Read back an uploaded object
    pub fn download(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let objects = self
            .objects
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(objects.get(name).map(|o| o.bytes.as_ref().clone()))
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn upload(&self, name: &str, content_type: &str, bytes: Vec<u8>) -> Result<StoredFile> {
        let mut objects = self
            .objects
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if objects.contains_key(name) {
            bail!("Object '{}' already exists in bucket '{}'", name, self.bucket);
        }

        let file = StoredFile {
            name: name.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len(),
        };
        objects.insert(
            name.to_string(),
            StoredObject {
                file: file.clone(),
                bytes: Arc::new(bytes),
            },
        );

        Ok(file)
    }

    fn public_url(&self, name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_base_url.trim_end_matches('/'),
            self.bucket,
            name
        )
    }
}

impl InMemoryFileStorage {
    /// Metadata of an uploaded object
    pub fn metadata(&self, name: &str) -> Option<StoredFile> {
        self.objects
            .read()
            .ok()
            .and_then(|o| o.get(name).map(|o| o.file.clone()))
    }
}
