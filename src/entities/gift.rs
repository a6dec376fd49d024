//! Gift list rows

use crate::impl_entity;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A gift on the couple's list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gift {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Price in reais
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_purchased: bool,
    pub purchased_by: Option<String>,
    /// Precomputed payment code, if the row was seeded with one
    pub qr_code_data: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Gift, "wedding_gifts", "gift", touch);

// The column is nullable; a missing flag means the gift is still available
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl Gift {
    /// Create a new, unreserved gift
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            price,
            image_url: None,
            is_purchased: false,
            purchased_by: None,
            qr_code_data: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Mark the gift as reserved by `buyer`
    pub fn reserve(&mut self, buyer: impl Into<String>) {
        self.is_purchased = true;
        self.purchased_by = Some(buyer.into());
        self.updated_at = Utc::now();
    }
}
