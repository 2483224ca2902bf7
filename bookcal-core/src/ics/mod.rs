//! ICS feed generation and parsing.
//!
//! This module handles writing calendar feeds according to RFC 5545, and
//! reading them back for round-trip verification.

mod generate;
mod parse;

pub use generate::generate_feed;
pub use parse::parse_feed;
