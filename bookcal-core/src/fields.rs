//! Ordered fallback key tables for raw Bookster records.
//!
//! The vendor API is not consistent about field names across endpoints and
//! revisions, so every logical field is resolved through an ordered list of
//! candidate keys. First key with a usable value wins. Keeping the lists
//! here, as data, is what makes the upstream contract testable.

/// Booking lifecycle state.
pub const STATE: &[&str] = &["state", "status"];

/// Inclusive first day of the stay.
pub const ARRIVAL: &[&str] = &["start_inclusive", "arrival", "start"];

/// Exclusive end of the stay (departure day).
pub const DEPARTURE: &[&str] = &["end_exclusive", "departure", "end"];

pub const FORENAME: &[&str] = &["customer_forename"];
pub const SURNAME: &[&str] = &["customer_surname"];
pub const EMAIL: &[&str] = &["customer_email"];

/// Mobile first, then day/evening landlines, then the generic field.
pub const PHONE: &[&str] = &[
    "customer_mobile",
    "customer_phone_day",
    "customer_phone_evening",
    "customer_phone",
];

pub const PARTY_SIZE: &[&str] = &["party_size"];

/// Gross booking total.
pub const VALUE: &[&str] = &["value"];

/// Outstanding balance still owed by the guest.
pub const BALANCE: &[&str] = &["balance"];

pub const CURRENCY: &[&str] = &["currency"];

/// Stable upstream identifier.
pub const REFERENCE: &[&str] = &["id", "reference"];

pub const PROPERTY_NAME: &[&str] = &["entry_name"];
pub const PROPERTY_ID: &[&str] = &["entry_id"];

/// Booking source/agency label.
pub const CHANNEL: &[&str] = &["syndicate_name"];

/// Add-on line items attached to the booking.
pub const EXTRAS: &[&str] = &["lines", "extras", "add_ons"];
