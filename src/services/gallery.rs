//! Guest photo gallery

use crate::core::error::{RequestError, StorageError};
use crate::core::validation::{FieldChecks, validators};
use crate::core::{DataService, Entity, FileStorage, OrderBy, SiteResult};
use crate::entities::GuestPhoto;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::sync::Arc;

/// A photo as received from the upload form
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// Name of the guest sending the photo
    pub uploaded_by: String,
    pub caption: Option<String>,
    /// Original file name, used for its extension
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Operations behind the gallery page
#[derive(Clone)]
pub struct GalleryService {
    photos: Arc<dyn DataService<GuestPhoto>>,
    files: Arc<dyn FileStorage>,
    max_upload_bytes: usize,
}

impl GalleryService {
    pub fn new(
        photos: Arc<dyn DataService<GuestPhoto>>,
        files: Arc<dyn FileStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            photos,
            files,
            max_upload_bytes,
        }
    }

    /// All photos, newest first
    pub async fn list(&self) -> SiteResult<Vec<GuestPhoto>> {
        Ok(self
            .photos
            .list(&OrderBy::desc("created_at"))
            .await
            .map_err(|e| StorageError::query(GuestPhoto::table_name(), e))?)
    }

    /// Store the file, then record it in the gallery
    pub async fn upload(&self, upload: PhotoUpload) -> SiteResult<GuestPhoto> {
        self.check(&upload)?;

        let object_name = object_name(&upload.file_name);
        let size = upload.bytes.len();
        self.files
            .upload(&object_name, &upload.content_type, upload.bytes)
            .await
            .map_err(|e| StorageError::UploadError {
                name: object_name.clone(),
                message: e.to_string(),
            })?;

        let mut photo = GuestPhoto::new(
            self.files.public_url(&object_name),
            upload.uploaded_by.trim(),
        );
        photo.caption = upload
            .caption
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let photo = self
            .photos
            .insert(photo)
            .await
            .map_err(|e| StorageError::query(GuestPhoto::table_name(), e))?;

        tracing::info!(photo_id = %photo.id, object = %object_name, size, "Photo uploaded");
        Ok(photo)
    }

    fn check(&self, upload: &PhotoUpload) -> SiteResult<()> {
        let mut checks = FieldChecks::new();
        checks.check("name", validators::required(&upload.uploaded_by));
        checks.finish()?;

        if validators::content_type(&upload.content_type, "image/").is_err() {
            return Err(RequestError::UnsupportedMediaType {
                content_type: upload.content_type.clone(),
            }
            .into());
        }

        if upload.bytes.len() > self.max_upload_bytes {
            return Err(RequestError::PayloadTooLarge {
                size: upload.bytes.len(),
                limit: self.max_upload_bytes,
            }
            .into());
        }

        Ok(())
    }
}

/// `<millis>-<random>.<ext>`, keeping the original extension
fn object_name(file_name: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(11)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let millis = chrono::Utc::now().timestamp_millis();
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            format!("{}-{}.{}", millis, suffix, ext.to_ascii_lowercase())
        }
        _ => format!("{}-{}", millis, suffix),
    }
}
