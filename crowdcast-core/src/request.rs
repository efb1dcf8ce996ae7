//! Request and response records of the scoring contract.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{CrowdLevel, Season, Weather};

/// Inbound prediction request.
///
/// Range validation is the caller's job, but the encoder tolerates any value:
/// numbers are clamped and unknown labels fall back to default categories.
///
/// # Examples
/// ```
/// use crowdcast_core::PredictionRequest;
///
/// let request: PredictionRequest =
///     serde_json::from_str(r#"{"hour": 14, "weekday": 5, "weekend": true, "holiday": false}"#)
///         .unwrap();
/// assert_eq!(request.season, "regular");
/// assert_eq!(request.weather, "clear");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Hour of day, expected in `0..=23`.
    pub hour: i32,
    /// Weekday, expected in `0..=6` with Monday as `0`.
    pub weekday: i32,
    /// Whether the day is a weekend.
    pub weekend: bool,
    /// Whether the day is a public holiday.
    pub holiday: bool,
    /// Free-form season label; missing or `null` means `"regular"`.
    #[serde(default = "default_season", deserialize_with = "season_or_default")]
    pub season: String,
    /// Free-form weather label; missing or `null` means `"clear"`.
    #[serde(default = "default_weather", deserialize_with = "weather_or_default")]
    pub weather: String,
}

impl PredictionRequest {
    /// Build a request with default season and weather labels.
    #[must_use]
    pub fn new(hour: i32, weekday: i32, weekend: bool, holiday: bool) -> Self {
        Self {
            hour,
            weekday,
            weekend,
            holiday,
            season: default_season(),
            weather: default_weather(),
        }
    }

    /// Replace the season label.
    #[must_use]
    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = season.into();
        self
    }

    /// Replace the weather label.
    #[must_use]
    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = weather.into();
        self
    }
}

fn default_season() -> String {
    Season::DEFAULT_LABEL.to_owned()
}

fn default_weather() -> String {
    Weather::DEFAULT_LABEL.to_owned()
}

fn season_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_season))
}

fn weather_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_weather))
}

/// Outbound prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Estimated crowd score in `0.0..=100.0`.
    pub crowd_score: f64,
    /// Level derived from `crowd_score`.
    pub crowd_level: CrowdLevel,
    /// Trust in the estimate, in `0.0..=1.0`.
    pub confidence: f64,
}

impl PredictionResponse {
    /// Score reported when scoring fails.
    pub const NEUTRAL_SCORE: f64 = 50.0;

    /// Build a response, deriving the level from the score.
    #[must_use]
    pub fn from_score(crowd_score: f64, confidence: f64) -> Self {
        Self {
            crowd_score,
            crowd_level: CrowdLevel::from_score(crowd_score),
            confidence,
        }
    }

    /// The structurally valid answer returned when scoring fails:
    /// score `50`, level `Medium`, confidence `0`.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            crowd_score: Self::NEUTRAL_SCORE,
            crowd_level: CrowdLevel::Medium,
            confidence: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn explicit_labels_are_kept() {
        let request: PredictionRequest = serde_json::from_str(
            r#"{"hour":9,"weekday":1,"weekend":false,"holiday":true,"season":"winter","weather":"rainy"}"#,
        )
        .expect("parse request");
        assert_eq!(request.season, "winter");
        assert_eq!(request.weather, "rainy");
        assert!(request.holiday);
    }

    #[rstest]
    #[case::null(r#"{"hour":9,"weekday":1,"weekend":false,"holiday":false,"season":null,"weather":null}"#)]
    #[case::missing(r#"{"hour":9,"weekday":1,"weekend":false,"holiday":false}"#)]
    fn absent_labels_take_defaults(#[case] json: &str) {
        let request: PredictionRequest = serde_json::from_str(json).expect("parse request");
        assert_eq!(request.season, "regular");
        assert_eq!(request.weather, "clear");
    }

    #[rstest]
    fn neutral_response_is_medium_with_zero_confidence() {
        let neutral = PredictionResponse::neutral();
        assert_eq!(neutral.crowd_level, CrowdLevel::Medium);
        assert_eq!(
            neutral.crowd_level,
            CrowdLevel::from_score(neutral.crowd_score)
        );
        assert!(neutral.confidence.abs() < f64::EPSILON);
    }

    #[rstest]
    fn response_serialises_wire_shape() {
        let response = PredictionResponse::from_score(80.0, 0.85);
        let json = serde_json::to_value(response).expect("serialise response");
        assert_eq!(json["crowd_level"], "Very High");
        assert_eq!(json["crowd_score"], 80.0);
        assert_eq!(json["confidence"], 0.85);
    }
}
