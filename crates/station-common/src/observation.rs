//! Decoded surface observation schema.
//!
//! This is the wire contract with the report decoder: the decoder responds
//! with a JSON record matching these groups, or `null` when the report could
//! not be decoded. Every group is optional and wrapped in [`Field`] so that
//! "key absent" and "key present but null" survive deserialization as
//! distinct states.

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// A measured quantity group, e.g. `{"value": -3.2}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Measurement {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<f64>,
}

impl Measurement {
    pub fn of(value: f64) -> Self {
        Self {
            value: Field::Value(value),
        }
    }
}

/// A coded quantity group, e.g. `{"value": 7}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CodeValue {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<i64>,
}

impl CodeValue {
    pub fn of(value: i64) -> Self {
        Self {
            value: Field::Value(value),
        }
    }
}

/// A group keyed by `code` rather than `value`, e.g. visibility `{"code": "98"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CodeGroup<T> {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub code: Field<T>,
}

/// Pressure tendency: magnitude of change plus characteristic code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PressureTendency {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub change: Field<Measurement>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub tendency: Field<CodeValue>,
}

/// Cloud genus codes and low/middle amounts (oktas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CloudTypes {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub high_cloud_type: Field<CodeValue>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub middle_cloud_type: Field<CodeValue>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub low_cloud_type: Field<CodeValue>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub low_cloud_amount: Field<CodeValue>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub middle_cloud_amount: Field<CodeValue>,
}

/// Precipitation indicator iR: which section carries the amount, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PrecipitationIndicator {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<i64>,
    #[serde(default)]
    pub in_group_1: bool,
    #[serde(default)]
    pub in_group_3: bool,
}

/// Precipitation amount and reporting period from section 1 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Precipitation {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub amount: Field<Measurement>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub time_before_obs: Field<CodeGroup<i64>>,
}

/// Wind speed with reporting unit ("m/s" or "KT").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WindSpeed {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub unit: Field<String>,
}

/// Surface wind group: direction in degrees plus speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SurfaceWind {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub direction: Field<Measurement>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub speed: Field<WindSpeed>,
}

/// Weather indicator ix: station type and whether a weather group follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WeatherIndicator {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<i64>,
    #[serde(default)]
    pub automatic: bool,
}

/// One decoded surface observation.
///
/// Owned transiently per request and discarded after diagram assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DecodedObservation {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub air_temperature: Field<Measurement>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub dewpoint_temperature: Field<Measurement>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub sea_level_pressure: Field<Measurement>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub pressure_tendency: Field<PressureTendency>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub visibility: Field<CodeGroup<String>>,
    /// Total cloud cover in oktas. Present-but-null means "sky not
    /// discernible" and plots as a slash, unlike an absent group.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cloud_cover: Field<CodeGroup<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cloud_types: Field<CloudTypes>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub lowest_cloud_base: Field<CodeGroup<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub present_weather: Field<CodeValue>,
    /// Past weather W1, W2 in reported order; either entry may be absent.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub past_weather: Field<Vec<Field<CodeValue>>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub precipitation_indicator: Field<PrecipitationIndicator>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub precipitation_s1: Field<Precipitation>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub precipitation_s3: Field<Precipitation>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub surface_wind: Field<SurfaceWind>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub weather_indicator: Field<WeatherIndicator>,
}

impl DecodedObservation {
    /// True when the reporting station is automatic (ix 4-7).
    pub fn is_automatic(&self) -> bool {
        self.weather_indicator
            .value()
            .map(|ix| ix.automatic)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let obs: DecodedObservation = serde_json::from_str("{}").unwrap();
        assert!(obs.air_temperature.is_absent());
        assert!(obs.cloud_cover.is_absent());
        assert!(!obs.is_automatic());
    }

    #[test]
    fn test_cloud_cover_null_vs_absent() {
        let obs: DecodedObservation =
            serde_json::from_str(r#"{"cloud_cover": null}"#).unwrap();
        assert!(obs.cloud_cover.is_null());

        let obs: DecodedObservation =
            serde_json::from_str(r#"{"cloud_cover": {"code": 6}}"#).unwrap();
        let group = obs.cloud_cover.value().unwrap();
        assert_eq!(group.code.get(), Some(6));
    }

    #[test]
    fn test_deserialize_full_wind_group() {
        let json = r#"{
            "surface_wind": {
                "direction": {"value": 270.0},
                "speed": {"value": 12.0, "unit": "m/s"}
            }
        }"#;
        let obs: DecodedObservation = serde_json::from_str(json).unwrap();
        let wind = obs.surface_wind.value().unwrap();
        assert_eq!(wind.direction.value().unwrap().value.get(), Some(270.0));
        let speed = wind.speed.value().unwrap();
        assert_eq!(speed.value.get(), Some(12.0));
        assert_eq!(speed.unit.value().map(String::as_str), Some("m/s"));
    }

    #[test]
    fn test_past_weather_pair_with_missing_w2() {
        let json = r#"{"past_weather": [{"value": 6}, null]}"#;
        let obs: DecodedObservation = serde_json::from_str(json).unwrap();
        let pair = obs.past_weather.value().unwrap();
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0].value().unwrap().value.get(), Some(6));
        assert!(pair[1].is_null());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let json = r#"{"station_id": "03772", "air_temperature": {"value": 11.0}}"#;
        let obs: DecodedObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.air_temperature.value().unwrap().value.get(), Some(11.0));
    }
}
