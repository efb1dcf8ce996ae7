//! Draw labelled samples from the heuristic crowd model.
#![forbid(unsafe_code)]

use crowdcast_core::{FeatureVector, LabeledSample, MAX_HOUR, MAX_WEEKDAY, Season, Weather};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::{SynthesisError, SynthesisRules};

/// First weekday (Saturday, with Monday as `0`) that counts as weekend.
pub const FIRST_WEEKEND_DAY: u8 = 5;

/// Generator of synthetic training samples.
///
/// The generator holds no mutable state: every call draws from the caller's
/// random source, so seeded runs reproduce exactly and unseeded runs
/// reproduce in distribution.
///
/// # Examples
/// ```
/// use crowdcast_data::{SynthesisRules, Synthesizer};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// # fn main() -> Result<(), crowdcast_data::SynthesisError> {
/// let synthesizer = Synthesizer::new(SynthesisRules::default())?;
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let samples = synthesizer.generate(100, &mut rng);
/// assert_eq!(samples.len(), 100);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Synthesizer {
    rules: SynthesisRules,
}

impl Synthesizer {
    /// Validate `rules` and build a generator.
    ///
    /// # Errors
    /// Propagates [`SynthesisRules::validate`] failures.
    pub fn new(rules: SynthesisRules) -> Result<Self, SynthesisError> {
        Ok(Self {
            rules: rules.validate()?,
        })
    }

    /// Rules used to label samples.
    #[must_use]
    pub const fn rules(&self) -> &SynthesisRules {
        &self.rules
    }

    /// Draw exactly `n` independent samples.
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<LabeledSample> {
        let samples: Vec<LabeledSample> = (0..n).map(|_| self.sample(rng)).collect();
        log::debug!("synthesised {} samples", samples.len());
        samples
    }

    /// Draw a single sample.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> LabeledSample {
        let features = self.draw_features(rng);
        self.label(features, rng)
    }

    /// Draw a feature vector with uniform hour, weekday, season and weather
    /// and a Bernoulli holiday flag.
    pub fn draw_features<R: Rng + ?Sized>(&self, rng: &mut R) -> FeatureVector {
        let hour = rng.gen_range(0..=MAX_HOUR);
        let weekday = rng.gen_range(0..=MAX_WEEKDAY);
        let is_holiday = rng.gen_bool(self.rules.holiday_probability);
        let season = Season::from_ordinal(rng.gen_range(0..4)).unwrap_or_default();
        let weather = Weather::from_ordinal(rng.gen_range(0..4)).unwrap_or_default();
        FeatureVector::saturating(
            hour,
            weekday,
            weekday >= FIRST_WEEKEND_DAY,
            is_holiday,
            season,
            weather,
        )
    }

    /// Label `features` with the heuristic score plus zero-mean Gaussian
    /// noise, clamped to `0..=100`.
    #[expect(
        clippy::float_arithmetic,
        reason = "labelling adds scaled Gaussian noise to the heuristic score"
    )]
    pub fn label<R: Rng + ?Sized>(&self, features: FeatureVector, rng: &mut R) -> LabeledSample {
        let z: f64 = StandardNormal.sample(rng);
        let noisy = self.rules.raw_score(&features) + z * self.rules.noise_std_dev;
        LabeledSample::clamped(features, noisy)
    }

    /// Noise-free score for `features`, clamped to `0..=100`.
    #[must_use]
    pub fn expected_score(&self, features: &FeatureVector) -> f64 {
        LabeledSample::clamped(*features, self.rules.raw_score(features)).crowd_score()
    }
}
