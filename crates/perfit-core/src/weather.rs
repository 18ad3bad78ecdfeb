//! Coarse weather buckets that condition outfit composition.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherBucket {
  #[default]
  Hot,
  Cool,
  Rainy,
  /// Dry, dusty season; also used for haze and smoke.
  Harmattan,
}

impl WeatherBucket {
  pub const ALL: [WeatherBucket; 4] = [Self::Hot, Self::Cool, Self::Rainy, Self::Harmattan];

  pub fn label(self) -> &'static str {
    match self {
      Self::Hot => "Hot",
      Self::Cool => "Cool",
      Self::Rainy => "Rainy",
      Self::Harmattan => "Harmattan",
    }
  }

  /// Bucket a provider's free-text condition (e.g. `"light rain"`).
  /// Anything unrecognised counts as [`WeatherBucket::Hot`].
  pub fn from_description(description: &str) -> Self {
    let d = description.to_lowercase();
    if d.contains("rain") {
      Self::Rainy
    } else if d.contains("cold") {
      Self::Cool
    } else if ["dust", "harmattan", "haze", "smoke"].iter().any(|k| d.contains(k)) {
      Self::Harmattan
    } else {
      Self::Hot
    }
  }

  /// Whether a light outer layer is called for at a formal occasion.
  pub fn wants_layer(self) -> bool { matches!(self, Self::Cool | Self::Rainy) }
}

impl fmt::Display for WeatherBucket {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for WeatherBucket {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    Self::ALL
      .into_iter()
      .find(|w| w.label().eq_ignore_ascii_case(trimmed))
      .ok_or_else(|| Error::UnknownLabel(s.to_owned()))
  }
}
