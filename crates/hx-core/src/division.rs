//! Race divisions and the equipment weights each one races with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A Hyrox race division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Division {
    WomensOpen,
    MensOpen,
    WomensPro,
    MensPro,
    WomensDoubles,
    MensDoubles,
    MixedDoubles,
    WomensProDoubles,
    MensProDoubles,
    WomensRelay,
    MensRelay,
    MixedRelay,
    WomensAdaptive,
    MensAdaptive,
}

/// Station loads in kilograms. Sled weights include the sled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RaceWeights {
    pub sled_push: u32,
    pub sled_pull: u32,
    /// Per hand.
    pub farmers_carry: u32,
    pub sandbag_lunges: u32,
    pub wall_balls: u32,
}

impl RaceWeights {
    const fn new(farmers_carry: u32, sandbag_lunges: u32, wall_balls: u32) -> Self {
        Self {
            sled_push: 102,
            sled_pull: 78,
            farmers_carry,
            sandbag_lunges,
            wall_balls,
        }
    }
}

const LIGHT: RaceWeights = RaceWeights::new(16, 10, 4);
const MIXED: RaceWeights = RaceWeights::new(20, 15, 5);
const STANDARD: RaceWeights = RaceWeights::new(24, 20, 6);
const HEAVY: RaceWeights = RaceWeights::new(32, 30, 9);

impl Division {
    pub const ALL: [Self; 14] = [
        Self::WomensOpen,
        Self::MensOpen,
        Self::WomensPro,
        Self::MensPro,
        Self::WomensDoubles,
        Self::MensDoubles,
        Self::MixedDoubles,
        Self::WomensProDoubles,
        Self::MensProDoubles,
        Self::WomensRelay,
        Self::MensRelay,
        Self::MixedRelay,
        Self::WomensAdaptive,
        Self::MensAdaptive,
    ];

    /// Kebab-case identifier, e.g. `mens-pro-doubles`.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::WomensOpen => "womens-open",
            Self::MensOpen => "mens-open",
            Self::WomensPro => "womens-pro",
            Self::MensPro => "mens-pro",
            Self::WomensDoubles => "womens-doubles",
            Self::MensDoubles => "mens-doubles",
            Self::MixedDoubles => "mixed-doubles",
            Self::WomensProDoubles => "womens-pro-doubles",
            Self::MensProDoubles => "mens-pro-doubles",
            Self::WomensRelay => "womens-relay",
            Self::MensRelay => "mens-relay",
            Self::MixedRelay => "mixed-relay",
            Self::WomensAdaptive => "womens-adaptive",
            Self::MensAdaptive => "mens-adaptive",
        }
    }

    /// Display name, e.g. "Men's Pro Doubles".
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::WomensOpen => "Women's Open",
            Self::MensOpen => "Men's Open",
            Self::WomensPro => "Women's Pro",
            Self::MensPro => "Men's Pro",
            Self::WomensDoubles => "Women's Doubles",
            Self::MensDoubles => "Men's Doubles",
            Self::MixedDoubles => "Mixed Doubles",
            Self::WomensProDoubles => "Women's Pro Doubles",
            Self::MensProDoubles => "Men's Pro Doubles",
            Self::WomensRelay => "Women's Relay",
            Self::MensRelay => "Men's Relay",
            Self::MixedRelay => "Mixed Relay",
            Self::WomensAdaptive => "Women's Adaptive",
            Self::MensAdaptive => "Men's Adaptive",
        }
    }

    pub const fn weights(self) -> RaceWeights {
        match self {
            Self::WomensOpen | Self::WomensDoubles | Self::WomensRelay | Self::WomensAdaptive => {
                LIGHT
            }
            Self::MixedDoubles | Self::MixedRelay => MIXED,
            Self::MensOpen
            | Self::WomensPro
            | Self::MensDoubles
            | Self::WomensProDoubles
            | Self::MensRelay
            | Self::MensAdaptive => STANDARD,
            Self::MensPro | Self::MensProDoubles => HEAVY,
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Division {
    type Err = UnknownDivision;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|division| division.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDivision(s.to_string()))
    }
}

/// Error type for unknown division slugs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown division: {0}")]
pub struct UnknownDivision(String);
