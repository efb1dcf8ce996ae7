//! Fixed-order feature vectors and labelled training samples.

use serde::Serialize;
use thiserror::Error;

use crate::{MAX_CROWD_SCORE, MIN_CROWD_SCORE, Season, Weather, clamp_score};

/// Number of model inputs in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 6;

/// Numeric row handed to a [`Regressor`](crate::Regressor).
///
/// Column order: hour, weekday, weekend flag, holiday flag, season ordinal,
/// weather ordinal.
pub type FeatureRow = [f32; FEATURE_COUNT];

/// Largest valid hour of day.
pub const MAX_HOUR: u8 = 23;

/// Largest valid weekday (Sunday, with Monday as `0`).
pub const MAX_WEEKDAY: u8 = 6;

/// Errors returned when constructing feature vectors or samples.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FeatureError {
    /// The hour was outside `0..=23`.
    #[error("hour {hour} is outside 0..=23")]
    HourOutOfRange {
        /// Rejected hour.
        hour: u8,
    },
    /// The weekday was outside `0..=6`.
    #[error("weekday {weekday} is outside 0..=6")]
    WeekdayOutOfRange {
        /// Rejected weekday.
        weekday: u8,
    },
    /// A sample target was non-finite or outside `0..=100`.
    #[error("crowd score {score} is outside 0..=100")]
    ScoreOutOfRange {
        /// Rejected score.
        score: f64,
    },
}

/// Contextual features describing one moment at one location.
///
/// # Examples
/// ```
/// use crowdcast_core::{FeatureVector, Season, Weather};
///
/// # fn main() -> Result<(), crowdcast_core::FeatureError> {
/// let features = FeatureVector::new(15, 5, true, false, Season::Summer, Weather::Hot)?;
/// assert_eq!(features.to_row(), [15.0, 5.0, 1.0, 0.0, 1.0, 3.0]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureVector {
    hour: u8,
    weekday: u8,
    is_weekend: bool,
    is_holiday: bool,
    season: Season,
    weather: Weather,
}

impl FeatureVector {
    /// Validate and construct a feature vector.
    ///
    /// # Errors
    /// Returns [`FeatureError`] when `hour` or `weekday` is out of range.
    pub const fn new(
        hour: u8,
        weekday: u8,
        is_weekend: bool,
        is_holiday: bool,
        season: Season,
        weather: Weather,
    ) -> Result<Self, FeatureError> {
        if hour > MAX_HOUR {
            return Err(FeatureError::HourOutOfRange { hour });
        }
        if weekday > MAX_WEEKDAY {
            return Err(FeatureError::WeekdayOutOfRange { weekday });
        }
        Ok(Self {
            hour,
            weekday,
            is_weekend,
            is_holiday,
            season,
            weather,
        })
    }

    /// Construct a feature vector, saturating `hour` and `weekday` into range.
    #[must_use]
    pub const fn saturating(
        hour: u8,
        weekday: u8,
        is_weekend: bool,
        is_holiday: bool,
        season: Season,
        weather: Weather,
    ) -> Self {
        Self {
            hour: if hour > MAX_HOUR { MAX_HOUR } else { hour },
            weekday: if weekday > MAX_WEEKDAY {
                MAX_WEEKDAY
            } else {
                weekday
            },
            is_weekend,
            is_holiday,
            season,
            weather,
        }
    }

    /// Hour of day in `0..=23`.
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Weekday in `0..=6`, Monday first.
    #[must_use]
    pub const fn weekday(&self) -> u8 {
        self.weekday
    }

    /// Whether the moment falls on a weekend.
    #[must_use]
    pub const fn is_weekend(&self) -> bool {
        self.is_weekend
    }

    /// Whether the moment falls on a public holiday.
    #[must_use]
    pub const fn is_holiday(&self) -> bool {
        self.is_holiday
    }

    /// Season of the year.
    #[must_use]
    pub const fn season(&self) -> Season {
        self.season
    }

    /// Weather condition.
    #[must_use]
    pub const fn weather(&self) -> Weather {
        self.weather
    }

    /// Encode the vector as a numeric model row.
    #[must_use]
    pub fn to_row(&self) -> FeatureRow {
        [
            f32::from(self.hour),
            f32::from(self.weekday),
            f32::from(u8::from(self.is_weekend)),
            f32::from(u8::from(self.is_holiday)),
            f32::from(self.season.ordinal()),
            f32::from(self.weather.ordinal()),
        ]
    }
}

/// A feature vector paired with its heuristic crowd score.
///
/// Samples are immutable once built; the score is guaranteed to lie in
/// `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabeledSample {
    #[serde(flatten)]
    features: FeatureVector,
    crowd_score: f64,
}

impl LabeledSample {
    /// Pair `features` with a target score.
    ///
    /// # Errors
    /// Returns [`FeatureError::ScoreOutOfRange`] when the score is not finite
    /// or falls outside `0.0..=100.0`.
    pub fn new(features: FeatureVector, crowd_score: f64) -> Result<Self, FeatureError> {
        if !crowd_score.is_finite() || !(MIN_CROWD_SCORE..=MAX_CROWD_SCORE).contains(&crowd_score)
        {
            return Err(FeatureError::ScoreOutOfRange { score: crowd_score });
        }
        Ok(Self {
            features,
            crowd_score,
        })
    }

    /// Pair `features` with a raw score, clamping it into `0.0..=100.0`.
    ///
    /// Non-finite scores collapse to the lower bound.
    #[must_use]
    pub fn clamped(features: FeatureVector, raw_score: f64) -> Self {
        Self {
            features,
            crowd_score: clamp_score(raw_score).unwrap_or(MIN_CROWD_SCORE),
        }
    }

    /// Input features of the sample.
    #[must_use]
    pub const fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// Target crowd score in `0.0..=100.0`.
    #[must_use]
    pub const fn crowd_score(&self) -> f64 {
        self.crowd_score
    }
}
