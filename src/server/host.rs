//! Server host holding the site's state
//!
//! The host is shared by every handler. It owns the configuration and one
//! service per site feature, each wired to its storage backend by the
//! [`ServerBuilder`](super::ServerBuilder).

use crate::config::SiteConfig;
use crate::services::{GalleryService, GiftService, RsvpService, VenueService};
use crate::storage::InMemoryFileStorage;
use std::sync::Arc;

/// Host context shared by all routes
#[derive(Clone)]
pub struct SiteHost {
    /// Configuration the server was built with
    pub config: Arc<SiteConfig>,

    pub gifts: GiftService,
    pub rsvps: RsvpService,
    pub gallery: GalleryService,
    pub venue: VenueService,

    /// Set when uploads live in process memory, so the server also serves them
    pub local_files: Option<InMemoryFileStorage>,
}

impl SiteHost {
    /// Whether uploaded files are served by this process
    pub fn serves_files(&self) -> bool {
        self.local_files.is_some()
    }

    /// Bucket uploads are stored in
    pub fn bucket(&self) -> &str {
        &self.config.storage.bucket
    }
}
