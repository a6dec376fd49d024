//! Entity trait shared by every stored row

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use uuid::Uuid;

/// Base trait for all rows kept by a [`DataService`](crate::core::DataService).
///
/// Every entity has:
/// - id: Unique identifier (primary key)
/// - created_at: Creation timestamp
///
/// and exposes its fields by name so stores can order rows without knowing
/// the concrete type.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The table name (e.g., "wedding_gifts", "rsvps")
    fn table_name() -> &'static str;

    /// The singular name used in messages (e.g., "gift")
    fn entity_name() -> &'static str;

    /// Get the primary key
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Refresh the last-modified timestamp, if the entity tracks one
    fn touch(&mut self) {}

    /// Value of a field, used for ordering
    ///
    /// The default goes through the serialized form; unknown fields are `None`.
    fn field_value(&self, field: &str) -> Option<Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => map.remove(field),
            _ => None,
        }
    }
}
