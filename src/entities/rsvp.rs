//! RSVP rows

use crate::impl_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A guest's answer to the invitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rsvp {
    pub id: Uuid,
    pub guest_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub attending: bool,
    #[serde(default)]
    pub plus_ones: u32,
    pub dietary_restrictions: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl_entity!(Rsvp, "rsvps", "rsvp", touch);

impl Rsvp {
    pub fn new(guest_name: impl Into<String>, attending: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            guest_name: guest_name.into(),
            email: None,
            phone: None,
            attending,
            plus_ones: 0,
            dietary_restrictions: None,
            message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of seats this answer accounts for
    pub fn headcount(&self) -> u32 {
        if self.attending {
            1 + self.plus_ones
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headcount() {
        let mut rsvp = Rsvp::new("Ana", true);
        rsvp.plus_ones = 2;
        assert_eq!(rsvp.headcount(), 3);

        rsvp.attending = false;
        assert_eq!(rsvp.headcount(), 0);
    }
}
