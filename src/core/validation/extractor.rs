//! Axum extractor for form payloads
//!
//! `FormJson<T>` behaves like `axum::Json<T>` but rejects malformed bodies
//! with the site's error format, so every error a guest sees has the same
//! shape.

use crate::core::error::{SiteError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body extractor with [`SiteError`] rejections
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn submit_rsvp(
///     State(host): State<Arc<SiteHost>>,
///     FormJson(form): FormJson<RsvpForm>,
/// ) -> SiteResult<Json<RsvpReceipt>> {
///     Ok(Json(host.rsvps.submit(form).await?))
/// }
/// ```
pub struct FormJson<T>(pub T);

impl<S, T> FromRequest<S> for FormJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = SiteError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(FormJson(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection, "Rejected form payload");
                Err(SiteError::Validation(ValidationError::InvalidJson {
                    message: rejection.body_text(),
                }))
            }
        }
    }
}
