use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use bookcal_core::{FeedOptions, RawBooking, fields, normalize_all, render_feed};

use crate::client::BooksterClient;
use crate::config::Config;
use crate::utils::tui;

pub async fn run(
    client: &BooksterClient,
    config: &Config,
    properties: &[String],
    outdir: &Path,
    split_days: bool,
) -> Result<()> {
    std::fs::create_dir_all(outdir)
        .with_context(|| format!("Failed to create {}", outdir.display()))?;

    let mut failures = 0;

    for property_id in properties {
        let spinner = tui::create_spinner(format!("Fetching bookings for {property_id}"));
        let result = client.fetch_bookings(property_id).await;
        spinner.finish_and_clear();

        let path = outdir.join(format!("{property_id}.ics"));

        match result {
            Ok(raws) => {
                let bookings = normalize_all(&raws, &config.normalize_options());
                let opts = config.feed_options(feed_title(&raws), split_days);
                let feed = render_feed(&bookings, &opts)?;

                std::fs::write(&path, &feed)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!(
                    "{} {} ({} bookings)",
                    "✓".green(),
                    path.display(),
                    bookings.len()
                );
            }
            Err(e) => {
                // A subscribed calendar URL must keep resolving to valid
                // ICS, so write an empty feed rather than nothing.
                let placeholder = render_feed(&[], &FeedOptions::default())?;
                std::fs::write(&path, &placeholder)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{} {}: {}", "✗".red(), property_id, e);
                failures += 1;
            }
        }
    }

    write_index(outdir, properties)?;

    if failures > 0 {
        anyhow::bail!(
            "{} of {} feeds failed; placeholder feeds written",
            failures,
            properties.len()
        );
    }

    Ok(())
}

/// Calendar title for a property, taken from the first record that names
/// it. Absent when the fetch came back empty.
fn feed_title(raws: &[RawBooking]) -> Option<String> {
    raws.iter()
        .find_map(|raw| raw.text(fields::PROPERTY_NAME))
        .map(|name| format!("{name} - Guests"))
}

/// Write a plain index page linking every feed, so the output directory
/// can be served as-is.
fn write_index(outdir: &Path, properties: &[String]) -> Result<()> {
    let mut html = String::from("<h1>bookcal feeds</h1>\n");
    for property_id in properties {
        html.push_str(&format!(
            "<p><a href=\"{property_id}.ics\">{property_id}.ics</a></p>\n"
        ));
    }

    let path = outdir.join("index.html");
    std::fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))
}
