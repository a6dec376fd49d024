//! ServerBuilder for fluent API to build the site's HTTP server

use super::exposure::RestExposure;
use super::host::SiteHost;
use crate::config::SiteConfig;
use crate::core::{DataService, Entity, FileStorage};
use crate::entities::{Gift, GuestPhoto, Rsvp, WeddingEvent};
use crate::services::{GalleryService, GiftService, RsvpService, VenueService};
use crate::storage::{InMemoryDataService, InMemoryFileStorage};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the site server
///
/// Every backend is optional; missing ones fall back to in-memory storage.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(SiteConfig::from_env()?)
///     .with_gifts(InMemoryDataService::with_rows(seed_gifts()))
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: Option<SiteConfig>,
    gifts: Option<Arc<dyn DataService<Gift>>>,
    rsvps: Option<Arc<dyn DataService<Rsvp>>>,
    photos: Option<Arc<dyn DataService<GuestPhoto>>>,
    events: Option<Arc<dyn DataService<WeddingEvent>>>,
    files: Option<Arc<dyn FileStorage>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: None,
            gifts: None,
            rsvps: None,
            photos: None,
            events: None,
            files: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the site configuration (defaults to [`SiteConfig::default_config`])
    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_gifts(mut self, service: impl DataService<Gift> + 'static) -> Self {
        self.gifts = Some(Arc::new(service));
        self
    }

    pub fn with_rsvps(mut self, service: impl DataService<Rsvp> + 'static) -> Self {
        self.rsvps = Some(Arc::new(service));
        self
    }

    pub fn with_photos(mut self, service: impl DataService<GuestPhoto> + 'static) -> Self {
        self.photos = Some(Arc::new(service));
        self
    }

    pub fn with_events(mut self, service: impl DataService<WeddingEvent> + 'static) -> Self {
        self.events = Some(Arc::new(service));
        self
    }

    /// Store uploads in an external file storage
    ///
    /// Without one, uploads are kept in memory and served under `/files`.
    pub fn with_file_storage(mut self, storage: impl FileStorage + 'static) -> Self {
        self.files = Some(Arc::new(storage));
        self
    }

    /// Add routes outside the site's own API
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the host with every service wired
    pub fn build_host(self) -> Result<SiteHost> {
        let config = match self.config {
            Some(config) => {
                config.validate()?;
                config
            }
            None => SiteConfig::default_config(),
        };

        let (files, local_files): (Arc<dyn FileStorage>, _) = match self.files {
            Some(files) => (files, None),
            None => {
                let local = InMemoryFileStorage::new(
                    config.storage.bucket.clone(),
                    config.storage.public_base_url.clone(),
                );
                let shared: Arc<dyn FileStorage> = Arc::new(local.clone());
                (shared, Some(local))
            }
        };

        let gifts = or_in_memory(self.gifts);
        let rsvps = or_in_memory(self.rsvps);
        let photos = or_in_memory(self.photos);
        let events = or_in_memory(self.events);

        Ok(SiteHost {
            gifts: GiftService::new(gifts, config.merchant.clone()),
            rsvps: RsvpService::new(rsvps, config.rsvp.max_plus_ones),
            gallery: GalleryService::new(photos, files, config.storage.max_upload_bytes),
            venue: VenueService::new(events),
            local_files,
            config: Arc::new(config),
        })
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn or_in_memory<T: Entity>(service: Option<Arc<dyn DataService<T>>>) -> Arc<dyn DataService<T>> {
    match service {
        Some(service) => service,
        None => Arc::new(InMemoryDataService::<T>::new()),
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_defaults_to_in_memory_backends() {
        let host = ServerBuilder::new().build_host().unwrap();
        assert!(host.serves_files());
        assert_eq!(host.bucket(), "wedding-photos");
    }

    #[test]
    fn test_external_storage_disables_file_route() {
        let host = ServerBuilder::new()
            .with_file_storage(InMemoryFileStorage::new("b", "https://cdn.example.com"))
            .build_host()
            .unwrap();
        assert!(!host.serves_files());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SiteConfig::default_config();
        config.merchant.key.clear();
        assert!(ServerBuilder::new().with_config(config).build_host().is_err());
    }

    #[tokio::test]
    async fn test_seeded_gifts_are_served() {
        let host = ServerBuilder::new()
            .with_gifts(InMemoryDataService::with_rows(vec![Gift::new(
                "Jogo de Panelas",
                Decimal::from(150),
            )]))
            .build_host()
            .unwrap();

        let gifts = host.gifts.list().await.unwrap();
        assert_eq!(gifts.len(), 1);
    }

    #[test]
    fn test_build_router() {
        assert!(ServerBuilder::new().build().is_ok());
    }
}
