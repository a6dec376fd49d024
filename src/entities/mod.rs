//! Row types stored by the site

pub mod event;
pub mod gift;
pub mod macros;
pub mod photo;
pub mod rsvp;

pub use event::{Countdown, WeddingEvent};
pub use gift::Gift;
pub use photo::GuestPhoto;
pub use rsvp::Rsvp;
