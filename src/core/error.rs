//! Typed error handling for the wedding site
//!
//! Services return [`SiteError`] so handlers can answer with a precise HTTP
//! status instead of a generic `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`EntityError`]: Missing rows and reservation conflicts
//! - [`ValidationError`]: Rejected form input
//! - [`StorageError`]: Row and file storage failures
//! - [`ConfigError`]: Configuration parsing and validation
//! - [`RequestError`]: Malformed HTTP requests (uploads, paths)
//!
//! # Example
//!
//! ```rust,ignore
//! match gifts.reserve(&id, "Tia Rosa").await {
//!     Ok(gift) => println!("Reserved {}", gift.name),
//!     Err(SiteError::Entity(EntityError::AlreadyReserved { purchased_by, .. })) => {
//!         println!("Already taken by {}", purchased_by);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::pix::PixError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the wedding site
#[derive(Debug)]
pub enum SiteError {
    /// Row-related errors
    Entity(EntityError),

    /// Validation errors
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Payment code errors
    Payment(PixError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::Entity(e) => write!(f, "{}", e),
            SiteError::Validation(e) => write!(f, "{}", e),
            SiteError::Storage(e) => write!(f, "{}", e),
            SiteError::Config(e) => write!(f, "{}", e),
            SiteError::Request(e) => write!(f, "{}", e),
            SiteError::Payment(e) => write!(f, "{}", e),
            SiteError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiteError::Entity(e) => Some(e),
            SiteError::Validation(e) => Some(e),
            SiteError::Storage(e) => Some(e),
            SiteError::Config(e) => Some(e),
            SiteError::Request(e) => Some(e),
            SiteError::Payment(e) => Some(e),
            SiteError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl SiteError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SiteError::Entity(e) => e.status_code(),
            SiteError::Validation(e) => e.status_code(),
            SiteError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SiteError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SiteError::Request(e) => e.status_code(),
            SiteError::Payment(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SiteError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SiteError::Entity(e) => e.error_code(),
            SiteError::Validation(_) => "VALIDATION_ERROR",
            SiteError::Storage(_) => "STORAGE_ERROR",
            SiteError::Config(_) => "CONFIG_ERROR",
            SiteError::Request(e) => e.error_code(),
            SiteError::Payment(_) => "PAYMENT_CODE_ERROR",
            SiteError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the guest may simply try again
    ///
    /// Storage hiccups are retryable; conflicts and bad input are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SiteError::Storage(_) | SiteError::Internal(_))
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            SiteError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            SiteError::Entity(EntityError::AlreadyReserved { id, purchased_by }) => {
                Some(serde_json::json!({
                    "id": id.to_string(),
                    "purchased_by": purchased_by
                }))
            }
            SiteError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            SiteError::Validation(ValidationError::FieldError { field, message }) => {
                Some(serde_json::json!({
                    "fields": [FieldValidationError::new(field.as_str(), message.as_str())]
                }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to stored rows
#[derive(Debug)]
pub enum EntityError {
    /// Row was not found
    NotFound { entity_type: String, id: Uuid },

    /// No row exists at all (e.g. the wedding event has not been set up)
    Empty { entity_type: String },

    /// Gift is already reserved by someone else
    AlreadyReserved { id: Uuid, purchased_by: String },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            EntityError::Empty { entity_type } => {
                write!(f, "No {} has been registered", entity_type)
            }
            EntityError::AlreadyReserved { id, purchased_by } => {
                write!(f, "Gift '{}' is already reserved by {}", id, purchased_by)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::Empty { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyReserved { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::Empty { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyReserved { .. } => "GIFT_ALREADY_RESERVED",
        }
    }
}

impl From<EntityError> for SiteError {
    fn from(err: EntityError) -> Self {
        SiteError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Request body is not valid JSON for the form
    InvalidJson { message: String },

    /// Path parameter is not a UUID
    InvalidUuid { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::InvalidUuid { value } => {
                write!(f, "Invalid UUID format: {}", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::InvalidJson { .. } | ValidationError::InvalidUuid { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<ValidationError> for SiteError {
    fn from(err: ValidationError) -> Self {
        SiteError::Validation(err)
    }
}

impl From<Vec<FieldValidationError>> for ValidationError {
    fn from(mut errors: Vec<FieldValidationError>) -> Self {
        if errors.len() == 1 {
            let e = errors.remove(0);
            ValidationError::FieldError {
                field: e.field,
                message: e.message,
            }
        } else {
            ValidationError::FieldErrors(errors)
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// A row read or write failed
    QueryError { table: String, message: String },

    /// A file upload failed
    UploadError { name: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::QueryError { table, message } => {
                write!(f, "Query on '{}' failed: {}", table, message)
            }
            StorageError::UploadError { name, message } => {
                write!(f, "Upload of '{}' failed: {}", name, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    /// Wrap a backend error raised while touching `table`
    pub fn query(table: &str, err: anyhow::Error) -> Self {
        StorageError::QueryError {
            table: table.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for SiteError {
    fn from(err: StorageError) -> Self {
        SiteError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for SiteError {
    fn from(err: ConfigError) -> Self {
        SiteError::Config(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Upload exceeds the configured size limit
    PayloadTooLarge { size: usize, limit: usize },

    /// Uploaded file is not of an accepted type
    UnsupportedMediaType { content_type: String },

    /// Multipart body could not be read
    InvalidMultipart { message: String },

    /// No uploaded file under this name
    FileNotFound { name: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::PayloadTooLarge { size, limit } => {
                write!(f, "File of {} bytes exceeds the {} byte limit", size, limit)
            }
            RequestError::UnsupportedMediaType { content_type } => {
                write!(f, "Unsupported file type: {}", content_type)
            }
            RequestError::InvalidMultipart { message } => {
                write!(f, "Invalid multipart body: {}", message)
            }
            RequestError::FileNotFound { name } => write!(f, "File '{}' not found", name),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RequestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RequestError::InvalidMultipart { .. } => StatusCode::BAD_REQUEST,
            RequestError::FileNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            RequestError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            RequestError::InvalidMultipart { .. } => "INVALID_MULTIPART",
            RequestError::FileNotFound { .. } => "FILE_NOT_FOUND",
        }
    }
}

impl From<RequestError> for SiteError {
    fn from(err: RequestError) -> Self {
        SiteError::Request(err)
    }
}

// =============================================================================
// Conversions from external error types
// =============================================================================

impl From<PixError> for SiteError {
    fn from(err: PixError) -> Self {
        SiteError::Payment(err)
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for SiteError {
    fn from(err: std::io::Error) -> Self {
        SiteError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for SiteError {
    fn from(err: serde_yaml::Error) -> Self {
        SiteError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for SiteError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<SiteError>() {
            Ok(site_err) => site_err,
            Err(err) => SiteError::Internal(err.to_string()),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for site operations
pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_error_display() {
        let err = EntityError::NotFound {
            entity_type: "gift".to_string(),
            id: Uuid::nil(),
        };
        assert!(err.to_string().contains("gift"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_already_reserved_is_conflict() {
        let err: SiteError = EntityError::AlreadyReserved {
            id: Uuid::nil(),
            purchased_by: "Tia Rosa".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "GIFT_ALREADY_RESERVED");
        assert!(!err.is_retryable());

        let response = err.to_response();
        assert_eq!(response.details.unwrap()["purchased_by"], "Tia Rosa");
    }

    #[test]
    fn test_single_field_error_collapses() {
        let err: ValidationError = vec![FieldValidationError::new("guest_name", "required")].into();
        assert!(matches!(err, ValidationError::FieldError { .. }));

        let err: ValidationError = vec![
            FieldValidationError::new("guest_name", "required"),
            FieldValidationError::new("email", "invalid format"),
        ]
        .into();
        let display = err.to_string();
        assert!(display.contains("guest_name"));
        assert!(display.contains("email"));
    }

    #[test]
    fn test_single_field_error_lists_field() {
        let err: SiteError = ValidationError::from(vec![FieldValidationError::new(
            "buyer_name",
            "Campo obrigatório",
        )])
        .into();

        let details = err.to_response().details.unwrap();
        let fields = details["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["field"], "buyer_name");
        assert_eq!(fields[0]["message"], "Campo obrigatório");
    }

    #[test]
    fn test_storage_error_is_retryable() {
        let err: SiteError = StorageError::UploadError {
            name: "1-abc.jpg".to_string(),
            message: "bucket full".to_string(),
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_request_error_status_codes() {
        assert_eq!(
            RequestError::PayloadTooLarge { size: 10, limit: 5 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            RequestError::UnsupportedMediaType {
                content_type: "text/plain".to_string()
            }
            .status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn test_anyhow_roundtrip_keeps_site_error() {
        let original = SiteError::Entity(EntityError::Empty {
            entity_type: "wedding event".to_string(),
        });
        let wrapped = anyhow::Error::new(original);
        let back: SiteError = wrapped.into();
        assert_eq!(back.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let site_err: SiteError = json_err.into();
        assert!(matches!(
            site_err,
            SiteError::Validation(ValidationError::InvalidJson { .. })
        ));
    }
}
