//! Site features built on the storage traits

pub mod gallery;
pub mod gifts;
pub mod rsvp;
pub mod venue;

pub use gallery::{GalleryService, PhotoUpload};
pub use gifts::{GiftPayment, GiftService, contribution_payload};
pub use rsvp::{RsvpForm, RsvpReceipt, RsvpService};
pub use venue::{EventOverview, VenueService};
