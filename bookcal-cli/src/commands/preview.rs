use anyhow::Result;

use bookcal_core::{normalize_all, render_feed};

use crate::client::BooksterClient;
use crate::config::Config;
use crate::utils::tui;

/// Fetch one property and print its feed, for eyeballing field mapping
/// before pointing a calendar client at the published file.
pub async fn run(
    client: &BooksterClient,
    config: &Config,
    property_id: &str,
    split_days: bool,
) -> Result<()> {
    let spinner = tui::create_spinner(format!("Fetching bookings for {property_id}"));
    let raws = client.fetch_bookings(property_id).await;
    spinner.finish_and_clear();

    let raws = raws?;
    let bookings = normalize_all(&raws, &config.normalize_options());
    let feed = render_feed(&bookings, &config.feed_options(None, split_days))?;

    print!("{feed}");
    eprintln!(
        "{} records fetched, {} bookings in feed",
        raws.len(),
        bookings.len()
    );

    Ok(())
}
