//! Core types and transforms for the bookcal ecosystem.
//!
//! This crate turns raw Bookster booking records into guest-calendar feeds
//! in two pure steps:
//! - [`normalize`]: one raw record to one canonical [`Booking`], or nothing
//! - [`feed`]: a list of bookings to one serialized iCalendar document
//!
//! No I/O happens here. Fetching records from the vendor API and writing
//! feed files belong to the callers (bookcal-cli).

pub mod booking;
pub mod constants;
pub mod error;
pub mod event;
pub mod feed;
pub mod fields;
pub mod ics;
pub mod normalize;
pub mod raw;

pub use booking::Booking;
pub use error::{BookcalError, BookcalResult};
pub use event::{DayKind, FeedEvent};
pub use feed::{FeedOptions, PropertyCodes, render_feed};
pub use normalize::{NormalizeOptions, normalize, normalize_all};
pub use raw::RawBooking;
