//! Suggestion requests: resolve where the occasion comes from, then assemble.

use chrono::NaiveDate;
use rand::Rng;

use crate::{
  Result,
  assembly::{OutfitAssembly, SamplingConfig, assemble},
  calendar::{CalendarEvent, event_on},
  garment::GarmentItem,
  occasion::{Occasion, OccasionProfile, classify_event},
  outfit::NewOutfit,
  weather::WeatherBucket,
};

/// Where the occasion for a suggestion comes from.
#[derive(Debug, Clone)]
pub enum OccasionSource {
  /// A chosen occasion. Empty `tags` means the occasion's own profile tags.
  Preset { occasion: Occasion, tags: Vec<String> },
  /// Free-form event text, run through the classifier.
  EventText(String),
  /// Any preset, uniformly at random.
  Random,
  /// The first event on `date`; a free day is casual.
  Calendar { events: Vec<CalendarEvent>, date: NaiveDate },
}

impl OccasionSource {
  pub fn preset(occasion: Occasion) -> Self { Self::Preset { occasion, tags: Vec::new() } }

  pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> OccasionProfile {
    match self {
      Self::Preset { occasion, tags } if tags.is_empty() => {
        OccasionProfile::for_occasion(*occasion)
      }
      Self::Preset { occasion, tags } => {
        OccasionProfile { occasion: *occasion, tags: tags.clone() }
      }
      Self::EventText(text) => classify_event(Some(text)),
      Self::Random => {
        let occasion = Occasion::PRESETS[rng.gen_range(0..Occasion::PRESETS.len())];
        OccasionProfile::for_occasion(occasion)
      }
      Self::Calendar { events, date } => match event_on(events, *date) {
        Some(event) => classify_event(Some(&event.summary)),
        None => OccasionProfile::casual(),
      },
    }
  }
}

/// A generated outfit together with the context it was generated for.
#[derive(Debug, Clone)]
pub struct Suggestion {
  pub profile:  OccasionProfile,
  pub weather:  WeatherBucket,
  pub assembly: OutfitAssembly,
}

impl Suggestion {
  /// Tags recorded on a saved outfit: the occasion label, then the profile
  /// tags.
  pub fn saved_tags(&self) -> Vec<String> {
    std::iter::once(self.profile.occasion.label().to_owned())
      .chain(self.profile.tags.iter().cloned())
      .collect()
  }

  pub fn into_new_outfit(self, scheduled_date: NaiveDate) -> Result<NewOutfit> {
    let tags = self.saved_tags();
    NewOutfit::from_assembly(self.assembly, self.profile.occasion, tags, scheduled_date)
  }
}

/// Resolves occasion sources and runs the assembly engine.
#[derive(Debug, Clone, Default)]
pub struct Suggester {
  config: SamplingConfig,
}

impl Suggester {
  pub fn new(config: SamplingConfig) -> Self { Self { config } }

  pub fn suggest<R: Rng + ?Sized>(
    &self,
    closet: &[GarmentItem],
    source: &OccasionSource,
    weather: WeatherBucket,
    rng: &mut R,
  ) -> Suggestion {
    let profile = source.resolve(rng);
    tracing::debug!(occasion = %profile.occasion, tags = ?profile.tags, "resolved occasion");
    let assembly = assemble(closet, &profile, weather, &self.config, rng);
    Suggestion { profile, weather, assembly }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use rand::{SeedableRng, rngs::StdRng};
  use uuid::Uuid;

  use super::*;
  use crate::{Error, calendar::EventStart, category::Category, garment::NewGarment};

  fn item(category: &str) -> GarmentItem {
    NewGarment::new(format!("img://{category}"), category).into_item(Uuid::new_v4(), Utc::now())
  }

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  #[test]
  fn preset_without_tags_uses_occasion_profile() {
    let mut rng = StdRng::seed_from_u64(0);
    let profile = OccasionSource::preset(Occasion::Interview).resolve(&mut rng);
    assert_eq!(profile, OccasionProfile::for_occasion(Occasion::Interview));
  }

  #[test]
  fn preset_with_tags_keeps_them() {
    let source = OccasionSource::Preset { occasion: Occasion::Date, tags: vec!["red".into()] };
    let profile = source.resolve(&mut StdRng::seed_from_u64(0));
    assert_eq!(profile.tags, ["red"]);
  }

  #[test]
  fn event_text_is_classified() {
    let source = OccasionSource::EventText("NYSC CDS meeting".into());
    let profile = source.resolve(&mut StdRng::seed_from_u64(0));
    assert_eq!(profile.occasion, Occasion::Office);
    assert_eq!(profile.tags, ["office"]);
  }

  #[test]
  fn random_covers_several_presets() {
    let mut rng = StdRng::seed_from_u64(42);
    let picked: std::collections::HashSet<Occasion> =
      (0..200).map(|_| OccasionSource::Random.resolve(&mut rng).occasion).collect();
    assert!(picked.len() > 5);
  }

  #[test]
  fn calendar_uses_event_on_date_or_casual() {
    let events = vec![CalendarEvent {
      summary: "Sunday service".into(),
      start:   EventStart::AllDay(date("2024-06-16")),
    }];
    let mut rng = StdRng::seed_from_u64(0);

    let on_day = OccasionSource::Calendar { events: events.clone(), date: date("2024-06-16") };
    assert_eq!(on_day.resolve(&mut rng).occasion, Occasion::ChurchMosque);

    let free = OccasionSource::Calendar { events, date: date("2024-06-17") };
    assert_eq!(free.resolve(&mut rng), OccasionProfile::casual());
  }

  #[test]
  fn saved_tags_lead_with_occasion_label() {
    let suggestion = Suggestion {
      profile:  OccasionProfile::for_occasion(Occasion::ChurchMosque),
      weather:  WeatherBucket::Hot,
      assembly: OutfitAssembly::default(),
    };
    assert_eq!(suggestion.saved_tags(), ["Church/Mosque", "religious", "modest"]);
  }

  #[test]
  fn suggestion_converts_to_new_outfit() {
    let closet = vec![item("Dress"), item("Shoes")];
    let suggestion = Suggester::default().suggest(
      &closet,
      &OccasionSource::preset(Occasion::Wedding),
      WeatherBucket::Hot,
      &mut StdRng::seed_from_u64(7),
    );
    let outfit = suggestion.into_new_outfit(date("2024-06-15")).unwrap();
    assert_eq!(outfit.occasion, Occasion::Wedding);
    assert_eq!(
      outfit.layers.iter().map(|l| l.category).collect::<Vec<_>>(),
      [Category::Dress, Category::Shoes]
    );
    assert_eq!(outfit.tags[0], "Wedding");
  }

  #[test]
  fn empty_closet_suggestion_cannot_be_saved() {
    let suggestion = Suggester::default().suggest(
      &[],
      &OccasionSource::Random,
      WeatherBucket::Rainy,
      &mut StdRng::seed_from_u64(1),
    );
    assert!(suggestion.assembly.is_empty());
    assert!(matches!(suggestion.into_new_outfit(date("2024-06-12")), Err(Error::EmptyOutfit)));
  }
}
