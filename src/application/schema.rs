// SPDX-License-Identifier: MPL-2.0
//! Response schema for location results.
//!
//! [`ResultPayload`] is the wire shape of a [`LocationResult`]:
//!
//! ```json
//! {"type": "EXIF", "lat": 40.708333, "lng": -74.005833, "accuracy": 5.0,
//!  "source": "EXIF", "exif": {"GPSLatitude": "40, 42, 30", "...": "..."}}
//! ```
//!
//! [`check_shape`] verifies a payload against that schema after
//! serialization, so values that cannot be represented (NaN becomes `null`)
//! are reported instead of being silently coerced.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::location::{LocationResult, RawGpsTags};

/// Serialized form of a [`LocationResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPayload {
    /// `EXIF` or `ESTIMATE`.
    #[serde(rename = "type")]
    pub result_type: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exif: Option<RawGpsTags>,
}

impl From<&LocationResult> for ResultPayload {
    fn from(result: &LocationResult) -> Self {
        let source = result.source().as_str().to_string();
        match result {
            LocationResult::Exif(fix) => Self {
                result_type: source.clone(),
                lat: fix.latitude(),
                lng: fix.longitude(),
                accuracy: fix.accuracy_meters(),
                confidence: None,
                source,
                exif: Some(fix.raw_tags().clone()),
            },
            // The estimator's error is recorded in diagnostics, not returned.
            LocationResult::Estimate(estimate) => Self {
                result_type: source.clone(),
                lat: estimate.latitude,
                lng: estimate.longitude,
                accuracy: None,
                confidence: Some(estimate.confidence),
                source,
                exif: None,
            },
        }
    }
}

impl ResultPayload {
    /// JSON value of the payload.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Checks a payload against the response schema.
///
/// Returns every problem found, formatted as `"<field>: <problem>"`.
///
/// # Errors
///
/// Returns the list of problems when the payload does not conform.
pub fn check_shape(payload: &ResultPayload) -> Result<(), Vec<String>> {
    let value = payload
        .to_json()
        .map_err(|e| vec![format!("payload: {e}")])?;
    let Value::Object(fields) = value else {
        return Err(vec!["payload: expected an object".to_string()]);
    };

    let mut problems = Vec::new();

    require_string(&fields, "type", &mut problems);
    require_string(&fields, "source", &mut problems);
    require_number_in(&fields, "lat", -90.0..=90.0, true, &mut problems);
    require_number_in(&fields, "lng", -180.0..=180.0, true, &mut problems);
    require_number_in(&fields, "accuracy", 0.0..=f64::MAX, false, &mut problems);
    require_number_in(&fields, "confidence", 0.0..=1.0, false, &mut problems);

    if let Some(exif) = fields.get("exif") {
        if !exif.is_object() {
            problems.push("exif: expected a mapping".to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

fn require_string(fields: &Map<String, Value>, name: &str, problems: &mut Vec<String>) {
    match fields.get(name) {
        Some(Value::String(s)) if !s.is_empty() => {}
        Some(Value::String(_)) => problems.push(format!("{name}: may not be blank")),
        Some(_) => problems.push(format!("{name}: expected a string")),
        None => problems.push(format!("{name}: field is required")),
    }
}

fn require_number_in(
    fields: &Map<String, Value>,
    name: &str,
    range: std::ops::RangeInclusive<f64>,
    required: bool,
    problems: &mut Vec<String>,
) {
    match fields.get(name) {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if range.contains(&v) => {}
            _ => problems.push(format!(
                "{name}: must be between {} and {}",
                range.start(),
                range.end()
            )),
        },
        Some(_) => problems.push(format!("{name}: expected a number")),
        None if required => problems.push(format!("{name}: field is required")),
        None => {}
    }
}
