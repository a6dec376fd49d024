//! Guest photo rows

use crate::impl_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A photo shared by a guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestPhoto {
    pub id: Uuid,
    pub photo_url: String,
    pub caption: Option<String>,
    pub uploaded_by: String,
    pub is_approved: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl_entity!(GuestPhoto, "guest_photos", "photo");

impl GuestPhoto {
    pub fn new(photo_url: impl Into<String>, uploaded_by: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            photo_url: photo_url.into(),
            caption: None,
            uploaded_by: uploaded_by.into(),
            is_approved: None,
            created_at: Utc::now(),
        }
    }
}
