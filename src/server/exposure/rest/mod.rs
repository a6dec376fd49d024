//! REST API exposure for the site
//!
//! The REST exposure consumes a `SiteHost` and produces an Axum `Router`.

pub mod handlers;

use super::super::host::SiteHost;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Room for the multipart framing around the largest accepted file
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Gift, RSVP, gallery and event routes
    /// - `/files` when uploads are kept in memory
    /// - Custom routes
    pub fn build_router(host: Arc<SiteHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let upload_limit = host.config.storage.max_upload_bytes + MULTIPART_OVERHEAD;

        let mut api = Router::new()
            .route("/gifts", get(handlers::list_gifts))
            .route("/gifts/{id}", get(handlers::get_gift))
            .route("/gifts/{id}/payment", get(handlers::gift_payment))
            .route("/gifts/{id}/reserve", post(handlers::reserve_gift))
            .route("/contributions", post(handlers::contribution))
            .route("/rsvps", post(handlers::submit_rsvp))
            .route("/rsvps/headcount", get(handlers::rsvp_headcount))
            .route(
                "/photos",
                get(handlers::list_photos)
                    .post(handlers::upload_photo)
                    .layer(DefaultBodyLimit::max(upload_limit)),
            )
            .route("/event", get(handlers::current_event));

        if host.serves_files() {
            api = api.route("/files/{bucket}/{name}", get(handlers::download_file));
        }

        let mut app = Self::health_routes().merge(api.with_state(host));
        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .max_age(Duration::from_secs(60 * 60));

        Ok(app.layer(cors).layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "wedding-site"
        }))
    }
}
