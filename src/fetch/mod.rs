mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::parser::parse_site_species;
use crate::types::Reading;

/// Default LondonAir API root.
pub const DEFAULT_BASE_URL: &str = "https://api.erg.ic.ac.uk/AirQuality";

/// Builds the site/species endpoint URL for `[start, end)`.
pub fn site_species_url(
    base_url: &str,
    site_code: &str,
    species_code: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> String {
    format!(
        "{}/Data/SiteSpecies/SiteCode={}/SpeciesCode={}/StartDate={}/EndDate={}/Json",
        base_url.trim_end_matches('/'),
        site_code,
        species_code,
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
    )
}

/// Fetches live readings for a site and species.
///
/// `start` defaults to today (UTC) and `end` to the day after `start`. Any
/// transport failure or malformed body is logged and yields an empty list.
#[tracing::instrument(skip(client, base_url))]
pub fn fetch_readings<C: HttpClient>(
    client: &C,
    base_url: &str,
    site_code: &str,
    species_code: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Reading> {
    let start = start.unwrap_or_else(|| Utc::now().date_naive());
    let end = end.unwrap_or(start + Duration::days(1));
    let url = site_species_url(base_url, site_code, species_code, start, end);

    let body = match client.get_text(&url) {
        Ok(body) => body,
        Err(e) => {
            warn!(url = %url, error = %e, "Live feed request failed");
            return Vec::new();
        }
    };

    match parse_site_species(&body) {
        Ok(readings) => {
            debug!(count = readings.len(), "Live feed readings parsed");
            readings
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Live feed response could not be decoded");
            Vec::new()
        }
    }
}
