//! RSVP submission

use crate::core::error::StorageError;
use crate::core::validation::{FieldChecks, validators};
use crate::core::{DataService, Entity, OrderBy, SiteResult};
use crate::entities::Rsvp;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The RSVP form as submitted by a guest
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RsvpForm {
    pub guest_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub attending: bool,
    #[serde(default)]
    pub plus_ones: u32,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// What the guest sees after submitting
#[derive(Debug, Clone, Serialize)]
pub struct RsvpReceipt {
    pub rsvp: Rsvp,
    pub title: String,
    pub message: String,
}

// Blank optional inputs are stored as missing
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RsvpForm {
    /// Check the form against the site's rules
    pub fn validate(&self, max_plus_ones: u32) -> SiteResult<()> {
        let mut checks = FieldChecks::new();
        checks
            .check("guest_name", validators::min_chars(&self.guest_name, 2))
            .check(
                "plus_ones",
                validators::in_range(self.plus_ones, 0, max_plus_ones),
            );

        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            checks.check("email", validators::email(email));
        }

        Ok(checks.finish()?)
    }

    fn into_row(self) -> Rsvp {
        let mut rsvp = Rsvp::new(self.guest_name.trim(), self.attending);
        rsvp.email = non_blank(self.email);
        rsvp.phone = non_blank(self.phone);
        rsvp.plus_ones = self.plus_ones;
        rsvp.dietary_restrictions = non_blank(self.dietary_restrictions);
        rsvp.message = non_blank(self.message);
        rsvp
    }
}

/// Operations behind the RSVP page
#[derive(Clone)]
pub struct RsvpService {
    rsvps: Arc<dyn DataService<Rsvp>>,
    max_plus_ones: u32,
}

impl RsvpService {
    pub fn new(rsvps: Arc<dyn DataService<Rsvp>>, max_plus_ones: u32) -> Self {
        Self {
            rsvps,
            max_plus_ones,
        }
    }

    /// Validate and store an answer
    pub async fn submit(&self, form: RsvpForm) -> SiteResult<RsvpReceipt> {
        if let Err(e) = form.validate(self.max_plus_ones) {
            tracing::warn!(error = %e, "Rejected RSVP");
            return Err(e);
        }

        let rsvp = self
            .rsvps
            .insert(form.into_row())
            .await
            .map_err(|e| StorageError::query(Rsvp::table_name(), e))?;

        tracing::info!(
            rsvp_id = %rsvp.id,
            attending = rsvp.attending,
            plus_ones = rsvp.plus_ones,
            "RSVP received"
        );

        let message = if rsvp.attending {
            "Obrigado por confirmar sua presença! Estamos ansiosos para celebrar com você."
        } else {
            "Obrigado por nos informar. Sentiremos sua falta!"
        };

        Ok(RsvpReceipt {
            rsvp,
            title: "RSVP Confirmado!".to_string(),
            message: message.to_string(),
        })
    }

    /// All answers, oldest first
    pub async fn list(&self) -> SiteResult<Vec<Rsvp>> {
        Ok(self
            .rsvps
            .list(&OrderBy::asc("created_at"))
            .await
            .map_err(|e| StorageError::query(Rsvp::table_name(), e))?)
    }

    /// Total seats confirmed so far
    pub async fn headcount(&self) -> SiteResult<u32> {
        Ok(self.list().await?.iter().map(Rsvp::headcount).sum())
    }
}
