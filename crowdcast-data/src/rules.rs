//! Heuristic rules that label synthetic samples.
#![forbid(unsafe_code)]

use crowdcast_core::{FeatureVector, MAX_HOUR, Season, Weather};

use crate::SynthesisError;

/// Hours that draw the main visitor peaks (late morning and afternoon).
pub const PEAK_HOURS: [u8; 9] = [10, 11, 12, 14, 15, 16, 17, 18, 19];

/// Evening hours with a smaller bump.
pub const EVENING_HOURS: [u8; 3] = [20, 21, 22];

/// Hours before this one count as the quiet early morning.
pub const QUIET_UNTIL: u8 = 8;

/// Tunable effects applied when labelling a synthetic sample.
///
/// Defaults reproduce the reference heuristics: base `50`, peak `+30`,
/// evening `+15`, early morning `-40`, weekend `+20`, holiday `+30`, season
/// effects `[10, 25, 5, 0]`, weather effects `[0, -15, 5, 20]` and Gaussian
/// noise with standard deviation `10`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisRules {
    /// Score before any effect is applied.
    pub base: f64,
    /// Added during [`PEAK_HOURS`].
    pub peak_bonus: f64,
    /// Added during [`EVENING_HOURS`].
    pub evening_bonus: f64,
    /// Subtracted before [`QUIET_UNTIL`].
    pub quiet_penalty: f64,
    /// Added on weekends.
    pub weekend_bonus: f64,
    /// Added on holidays.
    pub holiday_bonus: f64,
    /// Probability that a drawn day is a holiday.
    pub holiday_probability: f64,
    /// Effect per season, indexed by [`Season::ordinal`].
    pub season_effects: [f64; 4],
    /// Effect per weather condition, indexed by [`Weather::ordinal`].
    pub weather_effects: [f64; 4],
    /// Standard deviation of the zero-mean Gaussian noise.
    pub noise_std_dev: f64,
}

impl Default for SynthesisRules {
    fn default() -> Self {
        Self {
            base: 50.0,
            peak_bonus: 30.0,
            evening_bonus: 15.0,
            quiet_penalty: 40.0,
            weekend_bonus: 20.0,
            holiday_bonus: 30.0,
            holiday_probability: 0.1,
            season_effects: [10.0, 25.0, 5.0, 0.0],
            weather_effects: [0.0, -15.0, 5.0, 20.0],
            noise_std_dev: 10.0,
        }
    }
}

impl SynthesisRules {
    /// Validate the rules and return a copy.
    ///
    /// # Errors
    /// Returns [`SynthesisError::InvalidProbability`] when the holiday
    /// probability is outside `0.0..=1.0`,
    /// [`SynthesisError::InvalidNoise`] when the noise deviation is negative
    /// or not finite, and [`SynthesisError::NonFiniteEffect`] when any effect
    /// is not finite.
    pub fn validate(self) -> Result<Self, SynthesisError> {
        if !(0.0..=1.0).contains(&self.holiday_probability) {
            return Err(SynthesisError::InvalidProbability {
                value: self.holiday_probability,
            });
        }
        if !self.noise_std_dev.is_finite() || self.noise_std_dev < 0.0 {
            return Err(SynthesisError::InvalidNoise {
                value: self.noise_std_dev,
            });
        }
        let scalars = [
            ("base", self.base),
            ("peak_bonus", self.peak_bonus),
            ("evening_bonus", self.evening_bonus),
            ("quiet_penalty", self.quiet_penalty),
            ("weekend_bonus", self.weekend_bonus),
            ("holiday_bonus", self.holiday_bonus),
        ];
        let tables = self
            .season_effects
            .iter()
            .map(|value| ("season_effects", *value))
            .chain(
                self.weather_effects
                    .iter()
                    .map(|value| ("weather_effects", *value)),
            );
        if let Some((name, _)) = scalars
            .into_iter()
            .chain(tables)
            .find(|(_, value)| !value.is_finite())
        {
            return Err(SynthesisError::NonFiniteEffect { name });
        }
        Ok(self)
    }

    /// Effect of the hour of day.
    ///
    /// The early-morning arm also matches `hour > 23`, which no valid
    /// [`FeatureVector`] can carry; that half of the condition is dead.
    #[must_use]
    pub fn hour_effect(&self, hour: u8) -> f64 {
        if PEAK_HOURS.contains(&hour) {
            self.peak_bonus
        } else if EVENING_HOURS.contains(&hour) {
            self.evening_bonus
        } else if hour < QUIET_UNTIL || hour > MAX_HOUR {
            -self.quiet_penalty
        } else {
            0.0
        }
    }

    /// Effect of the season.
    #[must_use]
    pub fn season_effect(&self, season: Season) -> f64 {
        self.season_effects
            .get(usize::from(season.ordinal()))
            .copied()
            .unwrap_or_default()
    }

    /// Effect of the weather.
    #[must_use]
    pub fn weather_effect(&self, weather: Weather) -> f64 {
        self.weather_effects
            .get(usize::from(weather.ordinal()))
            .copied()
            .unwrap_or_default()
    }

    /// Noise-free score for `features`, before clamping.
    #[expect(
        clippy::float_arithmetic,
        reason = "heuristic labelling sums additive effects"
    )]
    #[must_use]
    pub fn raw_score(&self, features: &FeatureVector) -> f64 {
        let mut score = self.base + self.hour_effect(features.hour());
        if features.is_weekend() {
            score += self.weekend_bonus;
        }
        if features.is_holiday() {
            score += self.holiday_bonus;
        }
        score + self.season_effect(features.season()) + self.weather_effect(features.weather())
    }
}
