//! HTTP client for the Bookster API.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, warn};

use bookcal_core::{RawBooking, fields};

use crate::config::ApiConfig;

pub struct BooksterClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl BooksterClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        // The API answers auth failures with a redirect to a login page;
        // never follow it, surface it as an error instead.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(BooksterClient { http, config })
    }

    fn bookings_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.bookings_path.trim_start_matches('/')
        )
    }

    /// Fetch the raw booking records for one property, retrying per the
    /// configured policy.
    pub async fn fetch_bookings(&self, property_id: &str) -> Result<Vec<RawBooking>> {
        let url = self.bookings_url();
        let attempts = self.config.retry_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.fetch_once(&url, property_id).await {
                Ok(records) => return Ok(records),
                Err(e) => {
                    warn!(attempt, attempts, error = %e, "Bookster request failed");
                    last_error = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(Duration::from_secs(self.config.retry_delay_secs))
                            .await;
                    }
                }
            }
        }

        Err(last_error.expect("at least one attempt was made"))
    }

    async fn fetch_once(&self, url: &str, property_id: &str) -> Result<Vec<RawBooking>> {
        debug!(url, property_id, "Fetching bookings");

        // HTTP Basic with username "x" and the API key as the password,
        // per the Bookster API docs.
        let response = self
            .http
            .get(url)
            .query(&[("property_id", property_id)])
            .basic_auth("x", Some(&self.config.api_key))
            .send()
            .await
            .context("Bookster request failed")?;

        if response.status().is_redirection() {
            bail!(
                "Auth/URL redirect from Bookster ({}). Check base URL, path and credentials.",
                response.status()
            );
        }

        let response = response
            .error_for_status()
            .context("Bookster returned an error status")?;
        let payload: Value = response
            .json()
            .await
            .context("Bookster returned invalid JSON")?;

        Ok(unwrap_records(payload, property_id))
    }
}

/// Pull the record list out of the response envelope. The API has shipped
/// `{"meta": .., "data": [..]}`, `{"results": [..]}` and a bare array at
/// different times.
fn unwrap_records(payload: Value, property_id: &str) -> Vec<RawBooking> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut envelope) => {
            match envelope.remove("data").or_else(|| envelope.remove("results")) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    };

    // The bookings endpoint has been seen ignoring the property filter;
    // when records carry an entry_id, filter client-side too.
    let filter_applies =
        !property_id.is_empty() && items.iter().any(|item| item.get("entry_id").is_some());

    items
        .into_iter()
        .filter_map(RawBooking::from_value)
        .filter(|record| {
            if !filter_applies {
                return true;
            }
            record
                .text(fields::PROPERTY_ID)
                .is_some_and(|id| id == property_id)
        })
        .collect()
}
