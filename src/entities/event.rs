//! The wedding itself: date, venue and practical details

use crate::impl_entity;
use chrono::{DateTime, Utc};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// The wedding event shown on the home and venue pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeddingEvent {
    pub id: Uuid,
    pub bride_name: String,
    pub groom_name: String,
    pub wedding_date: DateTime<Utc>,
    pub venue_name: String,
    pub venue_address: String,
    pub dress_code: Option<String>,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(WeddingEvent, "wedding_events", "wedding event", touch);

/// Time left until the ceremony
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// Whether the ceremony time has been reached
    pub fn is_over(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl WeddingEvent {
    pub fn new(
        bride_name: impl Into<String>,
        groom_name: impl Into<String>,
        wedding_date: DateTime<Utc>,
        venue_name: impl Into<String>,
        venue_address: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            bride_name: bride_name.into(),
            groom_name: groom_name.into(),
            wedding_date,
            venue_name: venue_name.into(),
            venue_address: venue_address.into(),
            dress_code: None,
            additional_info: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Map search link for the venue address
    pub fn maps_url(&self) -> String {
        format!(
            "{}{}",
            MAPS_SEARCH_URL,
            utf8_percent_encode(&self.venue_address, NON_ALPHANUMERIC)
        )
    }

    /// Time left until the ceremony, all zeros once it has started
    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        let remaining = (self.wedding_date - now).num_seconds().max(0);
        Countdown {
            days: remaining / 86_400,
            hours: remaining % 86_400 / 3_600,
            minutes: remaining % 3_600 / 60,
            seconds: remaining % 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn event() -> WeddingEvent {
        WeddingEvent::new(
            "Isabella",
            "Gabriel",
            Utc.with_ymd_and_hms(2025, 12, 13, 16, 0, 0).unwrap(),
            "Fazenda Boa Vista",
            "Rua das Flores, 100 - Cataguases",
        )
    }

    #[test]
    fn test_maps_url_encodes_address() {
        let url = event().maps_url();
        assert_eq!(
            url,
            "https://www.google.com/maps/search/?api=1&query=Rua%20das%20Flores%2C%20100%20%2D%20Cataguases"
        );
    }

    #[test]
    fn test_countdown() {
        let event = event();
        let now = event.wedding_date
            - Duration::days(3)
            - Duration::hours(4)
            - Duration::minutes(5)
            - Duration::seconds(6);

        let countdown = event.countdown(now);
        assert_eq!(
            countdown,
            Countdown {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6
            }
        );
        assert!(!countdown.is_over());
    }

    #[test]
    fn test_countdown_after_ceremony() {
        let event = event();
        let countdown = event.countdown(event.wedding_date + Duration::hours(1));
        assert!(countdown.is_over());
    }
}
