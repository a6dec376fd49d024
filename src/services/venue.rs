//! Wedding event details for the home and venue pages

use crate::core::error::{EntityError, StorageError};
use crate::core::{DataService, Entity, OrderBy, SiteResult};
use crate::entities::{Countdown, WeddingEvent};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Event details plus values derived for display
#[derive(Debug, Clone, Serialize)]
pub struct EventOverview {
    pub event: WeddingEvent,
    pub maps_url: String,
    pub countdown: Countdown,
}

#[derive(Clone)]
pub struct VenueService {
    events: Arc<dyn DataService<WeddingEvent>>,
}

impl VenueService {
    pub fn new(events: Arc<dyn DataService<WeddingEvent>>) -> Self {
        Self { events }
    }

    /// The most recently created event
    pub async fn current(&self) -> SiteResult<WeddingEvent> {
        self.events
            .list(&OrderBy::desc("created_at"))
            .await
            .map_err(|e| StorageError::query(WeddingEvent::table_name(), e))?
            .into_iter()
            .next()
            .ok_or_else(|| {
                EntityError::Empty {
                    entity_type: WeddingEvent::entity_name().to_string(),
                }
                .into()
            })
    }

    /// Current event with its map link and countdown at `now`
    pub async fn overview(&self, now: DateTime<Utc>) -> SiteResult<EventOverview> {
        let event = self.current().await?;
        Ok(EventOverview {
            maps_url: event.maps_url(),
            countdown: event.countdown(now),
            event,
        })
    }
}
