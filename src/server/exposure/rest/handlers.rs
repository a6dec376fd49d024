//! Route handlers
//!
//! Handlers only translate HTTP to service calls; every rule lives in the
//! services.

use crate::core::SiteResult;
use crate::core::error::{RequestError, ValidationError};
use crate::core::validation::FormJson;
use crate::entities::{Gift, GuestPhoto};
use crate::server::host::SiteHost;
use crate::services::{EventOverview, GiftPayment, PhotoUpload, RsvpReceipt};
use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

type HostState = State<Arc<SiteHost>>;

fn parse_id(raw: &str) -> SiteResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        ValidationError::InvalidUuid {
            value: raw.to_string(),
        }
        .into()
    })
}

/// GET /gifts
pub async fn list_gifts(State(host): HostState) -> SiteResult<Json<Vec<Gift>>> {
    Ok(Json(host.gifts.list().await?))
}

/// GET /gifts/{id}
pub async fn get_gift(State(host): HostState, Path(id): Path<String>) -> SiteResult<Json<Gift>> {
    let id = parse_id(&id)?;
    Ok(Json(host.gifts.get(&id).await?))
}

/// Payment details, with the QR code when rendering is compiled in
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    #[serde(flatten)]
    pub payment: GiftPayment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_svg: Option<String>,
}

/// GET /gifts/{id}/payment
pub async fn gift_payment(
    State(host): HostState,
    Path(id): Path<String>,
) -> SiteResult<Json<PaymentResponse>> {
    let id = parse_id(&id)?;
    let payment = host.gifts.payment(&id).await?;
    let qr_svg = qr_svg(&payment.payload)?;
    Ok(Json(PaymentResponse { payment, qr_svg }))
}

#[cfg(feature = "qrcode")]
fn qr_svg(payload: &str) -> SiteResult<Option<String>> {
    Ok(Some(crate::pix::render_svg(
        payload,
        &crate::pix::QrOptions::default(),
    )?))
}

#[cfg(not(feature = "qrcode"))]
fn qr_svg(_payload: &str) -> SiteResult<Option<String>> {
    Ok(None)
}

#[derive(Debug, Deserialize)]
pub struct ReserveRequest {
    pub buyer_name: String,
}

/// POST /gifts/{id}/reserve
pub async fn reserve_gift(
    State(host): HostState,
    Path(id): Path<String>,
    FormJson(request): FormJson<ReserveRequest>,
) -> SiteResult<Json<Gift>> {
    let id = parse_id(&id)?;
    Ok(Json(host.gifts.reserve(&id, &request.buyer_name).await?))
}

#[derive(Debug, Deserialize)]
pub struct ContributionRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

/// POST /contributions
pub async fn contribution(
    State(host): HostState,
    FormJson(request): FormJson<ContributionRequest>,
) -> SiteResult<Json<Value>> {
    let payload = host
        .gifts
        .contribution(request.amount, &request.description)?;
    Ok(Json(json!({ "payload": payload })))
}

/// POST /rsvps
pub async fn submit_rsvp(
    State(host): HostState,
    FormJson(form): FormJson<crate::services::RsvpForm>,
) -> SiteResult<(StatusCode, Json<RsvpReceipt>)> {
    let receipt = host.rsvps.submit(form).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /rsvps/headcount
pub async fn rsvp_headcount(State(host): HostState) -> SiteResult<Json<Value>> {
    let headcount = host.rsvps.headcount().await?;
    Ok(Json(json!({ "headcount": headcount })))
}

/// GET /photos
pub async fn list_photos(State(host): HostState) -> SiteResult<Json<Vec<GuestPhoto>>> {
    Ok(Json(host.gallery.list().await?))
}

fn multipart_error(err: MultipartError) -> RequestError {
    RequestError::InvalidMultipart {
        message: err.body_text(),
    }
}

/// POST /photos
///
/// Multipart fields: `name`, optional `caption`, and `file`.
pub async fn upload_photo(
    State(host): HostState,
    mut multipart: Multipart,
) -> SiteResult<(StatusCode, Json<GuestPhoto>)> {
    let mut uploaded_by = String::new();
    let mut caption = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("name") => uploaded_by = field.text().await.map_err(multipart_error)?,
            Some("caption") => caption = Some(field.text().await.map_err(multipart_error)?),
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                        RequestError::PayloadTooLarge {
                            size: host.config.storage.max_upload_bytes + 1,
                            limit: host.config.storage.max_upload_bytes,
                        }
                    } else {
                        multipart_error(e)
                    }
                })?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            other => tracing::debug!(field = ?other, "Ignoring multipart field"),
        }
    }

    let (file_name, content_type, bytes) = file.ok_or_else(|| ValidationError::FieldError {
        field: "file".to_string(),
        message: "Campo obrigatório".to_string(),
    })?;

    let photo = host
        .gallery
        .upload(PhotoUpload {
            uploaded_by,
            caption,
            file_name,
            content_type,
            bytes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// GET /event
pub async fn current_event(State(host): HostState) -> SiteResult<Json<EventOverview>> {
    Ok(Json(host.venue.overview(chrono::Utc::now()).await?))
}

/// GET /files/{bucket}/{name}
pub async fn download_file(
    State(host): HostState,
    Path((bucket, name)): Path<(String, String)>,
) -> SiteResult<Response> {
    let not_found = || RequestError::FileNotFound { name: name.clone() };

    let files = host.local_files.as_ref().ok_or_else(not_found)?;
    if bucket != files.bucket() {
        return Err(not_found().into());
    }

    let meta = files.metadata(&name).ok_or_else(not_found)?;
    let bytes = files.download(&name)?.ok_or_else(not_found)?;
    Ok(([(header::CONTENT_TYPE, meta.content_type)], bytes).into_response())
}
