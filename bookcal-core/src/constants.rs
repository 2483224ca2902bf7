//! Fixed strings of the bookcal feed format.

/// PRODID emitted in every generated calendar document.
pub const PRODID: &str = "-//bookcal//EN";

/// Prefix of every generated event UID.
pub const UID_PREFIX: &str = "bookcal";

/// Guest name used when a record carries no name fields.
pub const FALLBACK_GUEST_NAME: &str = "Guest";

/// Event description used when a booking has no detail fields at all.
pub const FALLBACK_DESCRIPTION: &str = "Guest booking";
