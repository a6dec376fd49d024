//! # Wedding Site
//!
//! Backend for a wedding website: a gift list paid through Pix, RSVPs, a
//! guest photo gallery and the event details.
//!
//! ## Features
//!
//! - **Pix payment codes**: static BR Code payloads with CRC-16 checksum,
//!   generated on demand for every gift
//! - **Gift reservations**: a gift can be reserved by one guest only
//! - **RSVP**: validated form with companions and dietary notes
//! - **Gallery**: image uploads with type and size limits
//! - **Storage-agnostic**: services talk to [`DataService`](core::DataService)
//!   and [`FileStorage`](core::FileStorage) traits
//!
//! ## Quick Start
//!
//! ```rust
//! use wedding::prelude::*;
//!
//! let merchant = Merchant::new("09261139680", "Pauline Cerqueira Barbosa", "Cataguases");
//! let payload = encode_payment_payload(&merchant, Decimal::from(150), "Jogo de Panelas");
//! assert!(payload.ends_with("6304A067"));
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod pix;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        DataService, Direction, Entity, FileStorage, OrderBy, SiteError, SiteResult, StoredFile,
    };

    // === Macros ===
    pub use crate::impl_entity;

    // === Entities ===
    pub use crate::entities::{Countdown, Gift, GuestPhoto, Rsvp, WeddingEvent};

    // === Payment codes ===
    pub use crate::pix::{Merchant, PaymentRequest, decode_payload, encode_payment_payload};

    // === Services ===
    pub use crate::services::{
        GalleryService, GiftPayment, GiftService, PhotoUpload, RsvpForm, RsvpService,
        VenueService,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, InMemoryFileStorage};

    // === Config ===
    pub use crate::config::SiteConfig;

    // === Server ===
    pub use crate::server::{ServerBuilder, SiteHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
