//! JSON parser for LondonAir site/species responses.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::{AquaError, Result};
use crate::types::Reading;

#[derive(Debug, Deserialize)]
struct SiteSpeciesResponse {
    #[serde(rename = "RawAQData")]
    raw: RawAqData,
}

#[derive(Debug, Deserialize)]
struct RawAqData {
    #[serde(rename = "Data")]
    data: Vec<Measurement>,
}

#[derive(Debug, Deserialize)]
struct Measurement {
    #[serde(rename = "@MeasurementDateGMT")]
    measured_at: String,
    #[serde(rename = "@Value")]
    value: String,
}

/// Decodes a response body into readings.
///
/// Measurements with an empty value are not available for that hour and are
/// dropped entirely.
///
/// # Errors
///
/// Returns [`AquaError::MalformedResponse`] if the body is not the expected
/// JSON shape or a kept measurement has an undecodable timestamp or value.
pub fn parse_site_species(body: &str) -> Result<Vec<Reading>> {
    let response: SiteSpeciesResponse =
        serde_json::from_str(body).map_err(|e| AquaError::MalformedResponse(e.to_string()))?;

    response
        .raw
        .data
        .into_iter()
        .filter(|m| !m.value.trim().is_empty())
        .map(|m| {
            let timestamp = NaiveDateTime::parse_from_str(m.measured_at.trim(), "%Y-%m-%d %H:%M:%S")
                .map_err(|e| {
                    AquaError::MalformedResponse(format!(
                        "bad timestamp {:?}: {}",
                        m.measured_at, e
                    ))
                })?;
            let value = m.value.trim().parse::<f64>().map_err(|e| {
                AquaError::MalformedResponse(format!("bad value {:?}: {}", m.value, e))
            })?;
            Ok(Reading::new(timestamp, Some(value)))
        })
        .collect()
}
