//! Map prediction requests onto model feature vectors.
//!
//! Encoding never fails. Out-of-range numbers are clamped and unknown labels
//! resolve to the default category; each such repair is reported as an
//! [`EncodingAnomaly`] so callers can log it.

use thiserror::Error;

use crate::{FeatureVector, MAX_HOUR, MAX_WEEKDAY, PredictionRequest, Season, Weather};

/// A repair applied while encoding a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingAnomaly {
    /// The hour was clamped into `0..=23`.
    #[error("hour {raw} clamped to {clamped}")]
    HourClamped {
        /// Value supplied by the caller.
        raw: i32,
        /// Value handed to the model.
        clamped: u8,
    },
    /// The weekday was clamped into `0..=6`.
    #[error("weekday {raw} clamped to {clamped}")]
    WeekdayClamped {
        /// Value supplied by the caller.
        raw: i32,
        /// Value handed to the model.
        clamped: u8,
    },
    /// The season label was not recognised.
    #[error("unknown season '{label}', using {fallback}")]
    UnknownSeason {
        /// Label supplied by the caller.
        label: String,
        /// Category handed to the model.
        fallback: Season,
    },
    /// The weather label was not recognised.
    #[error("unknown weather '{label}', using {fallback}")]
    UnknownWeather {
        /// Label supplied by the caller.
        label: String,
        /// Category handed to the model.
        fallback: Weather,
    },
}

/// Outcome of encoding a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    /// Features handed to the model.
    pub features: FeatureVector,
    /// Repairs applied on the way.
    pub anomalies: Vec<EncodingAnomaly>,
}

impl EncodedRequest {
    /// Report whether the request encoded without repairs.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Encode `request` using the canonical categorical mapping.
///
/// The weekend and holiday flags are taken from the request as given.
///
/// # Examples
/// ```
/// use crowdcast_core::{PredictionRequest, Season, Weather, encode_request};
///
/// let request = PredictionRequest::new(30, 2, false, false).with_weather("storm");
/// let encoded = encode_request(&request);
/// assert_eq!(encoded.features.hour(), 23);
/// assert_eq!(encoded.features.season(), Season::Spring);
/// assert_eq!(encoded.features.weather(), Weather::Clear);
/// assert_eq!(encoded.anomalies.len(), 2);
/// ```
#[must_use]
pub fn encode_request(request: &PredictionRequest) -> EncodedRequest {
    let mut anomalies = Vec::new();

    let hour = clamp_to(request.hour, MAX_HOUR);
    if i32::from(hour) != request.hour {
        anomalies.push(EncodingAnomaly::HourClamped {
            raw: request.hour,
            clamped: hour,
        });
    }

    let weekday = clamp_to(request.weekday, MAX_WEEKDAY);
    if i32::from(weekday) != request.weekday {
        anomalies.push(EncodingAnomaly::WeekdayClamped {
            raw: request.weekday,
            clamped: weekday,
        });
    }

    let (season, season_known) = Season::from_label(&request.season);
    if !season_known {
        anomalies.push(EncodingAnomaly::UnknownSeason {
            label: request.season.clone(),
            fallback: season,
        });
    }

    let (weather, weather_known) = Weather::from_label(&request.weather);
    if !weather_known {
        anomalies.push(EncodingAnomaly::UnknownWeather {
            label: request.weather.clone(),
            fallback: weather,
        });
    }

    let features = FeatureVector::saturating(
        hour,
        weekday,
        request.weekend,
        request.holiday,
        season,
        weather,
    );
    EncodedRequest {
        features,
        anomalies,
    }
}

fn clamp_to(raw: i32, max: u8) -> u8 {
    u8::try_from(raw.clamp(0, i32::from(max))).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn clean_request_has_no_anomalies() {
        let request = PredictionRequest::new(15, 5, true, false)
            .with_season("summer")
            .with_weather("hot");
        let encoded = encode_request(&request);
        assert!(encoded.is_clean());
        assert_eq!(encoded.features.to_row(), [15.0, 5.0, 1.0, 0.0, 1.0, 3.0]);
    }

    #[rstest]
    #[case(-5, 0)]
    #[case(24, 23)]
    #[case(i32::MAX, 23)]
    fn hour_is_clamped(#[case] raw: i32, #[case] expected: u8) {
        let encoded = encode_request(&PredictionRequest::new(raw, 0, false, false));
        assert_eq!(encoded.features.hour(), expected);
        assert_eq!(
            encoded.anomalies,
            vec![EncodingAnomaly::HourClamped {
                raw,
                clamped: expected
            }]
        );
    }

    #[rstest]
    fn weekday_is_clamped() {
        let encoded = encode_request(&PredictionRequest::new(10, -1, false, false));
        assert_eq!(encoded.features.weekday(), 0);
        assert!(matches!(
            encoded.anomalies.as_slice(),
            [EncodingAnomaly::WeekdayClamped { raw: -1, clamped: 0 }]
        ));
    }

    #[rstest]
    fn encoding_matches_training_ordinals() {
        for season in Season::ALL {
            for weather in Weather::ALL {
                let request = PredictionRequest::new(12, 3, false, false)
                    .with_season(season.as_str())
                    .with_weather(weather.as_str());
                let encoded = encode_request(&request);
                assert_eq!(encoded.features.season().ordinal(), season.ordinal());
                assert_eq!(encoded.features.weather().ordinal(), weather.ordinal());
            }
        }
    }

    #[rstest]
    fn weekend_flag_is_not_recomputed() {
        let encoded = encode_request(&PredictionRequest::new(10, 1, true, false));
        assert!(encoded.features.is_weekend());
    }
}
