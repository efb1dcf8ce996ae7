//! Categorical context features shared by training and inference.
//!
//! Each category owns its ordinal, so the synthesizer and the request encoder
//! cannot disagree on how a season or weather condition reaches the model.
//!
//! # Examples
//! ```
//! use crowdcast_core::{Season, Weather};
//!
//! assert_eq!(Season::Summer.ordinal(), 1);
//! assert_eq!(Weather::from_ordinal(3), Some(Weather::Hot));
//! assert_eq!("autumn".parse::<Season>(), Ok(Season::Fall));
//! ```

use serde::{Deserialize, Serialize};

/// Time of year, encoded as `Spring=0, Summer=1, Fall=2, Winter=3`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// March to May.
    #[default]
    Spring,
    /// Peak travel season.
    Summer,
    /// September to November.
    Fall,
    /// Off season.
    Winter,
}

impl Season {
    /// Every season in ordinal order.
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Fall, Self::Winter];

    /// Label accepted for requests that do not name a season.
    pub const DEFAULT_LABEL: &'static str = "regular";

    /// Return the ordinal used as the model input.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Spring => 0,
            Self::Summer => 1,
            Self::Fall => 2,
            Self::Winter => 3,
        }
    }

    /// Map an ordinal back onto a season.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Spring),
            1 => Some(Self::Summer),
            2 => Some(Self::Fall),
            3 => Some(Self::Winter),
            _ => None,
        }
    }

    /// Return the season as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }

    /// Resolve a request label, reporting whether it was recognised.
    ///
    /// `"regular"` means "no particular season" and resolves to
    /// [`Season::Spring`], whose heuristic effect equals the mean effect
    /// across seasons. Unknown labels resolve the same way but return
    /// `false` so the caller can record the anomaly.
    #[must_use]
    pub fn from_label(label: &str) -> (Self, bool) {
        let normalised = label.trim().to_lowercase();
        if normalised.is_empty() || normalised == Self::DEFAULT_LABEL {
            return (Self::default(), true);
        }
        normalised
            .parse::<Self>()
            .map_or((Self::default(), false), |season| (season, true))
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" | "autumn" => Ok(Self::Fall),
            "winter" => Ok(Self::Winter),
            _ => Err(format!("unknown season '{s}'")),
        }
    }
}

/// Weather at the location, encoded as `Clear=0, Rainy=1, Cloudy=2, Hot=3`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    /// Fair weather; the request default.
    #[default]
    Clear,
    /// Rain keeps visitors away.
    Rainy,
    /// Overcast skies.
    Cloudy,
    /// Hot, sunny days.
    Hot,
}

impl Weather {
    /// Every weather condition in ordinal order.
    pub const ALL: [Self; 4] = [Self::Clear, Self::Rainy, Self::Cloudy, Self::Hot];

    /// Label used when a request omits the weather.
    pub const DEFAULT_LABEL: &'static str = "clear";

    /// Return the ordinal used as the model input.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Clear => 0,
            Self::Rainy => 1,
            Self::Cloudy => 2,
            Self::Hot => 3,
        }
    }

    /// Map an ordinal back onto a weather condition.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Clear),
            1 => Some(Self::Rainy),
            2 => Some(Self::Cloudy),
            3 => Some(Self::Hot),
            _ => None,
        }
    }

    /// Return the weather as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Rainy => "rainy",
            Self::Cloudy => "cloudy",
            Self::Hot => "hot",
        }
    }

    /// Resolve a request label, reporting whether it was recognised.
    ///
    /// Unknown labels resolve to [`Weather::Clear`] and return `false`.
    #[must_use]
    pub fn from_label(label: &str) -> (Self, bool) {
        let normalised = label.trim();
        if normalised.is_empty() {
            return (Self::default(), true);
        }
        normalised
            .parse::<Self>()
            .map_or((Self::default(), false), |weather| (weather, true))
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Weather {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clear" | "sunny" => Ok(Self::Clear),
            "rainy" | "rain" => Ok(Self::Rainy),
            "cloudy" | "overcast" => Ok(Self::Cloudy),
            "hot" => Ok(Self::Hot),
            _ => Err(format!("unknown weather '{s}'")),
        }
    }
}
