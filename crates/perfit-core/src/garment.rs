//! Garment records — the items in a user's closet.
//!
//! A garment's identity, image reference and canonical category are fixed at
//! creation. Tags and formality can be edited later through [`GarmentEdit`].

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error,
  category::{Category, normalize_category},
  occasion::Occasion,
};

// ─── Formality ───────────────────────────────────────────────────────────────

/// How dressy an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventFormality {
  Formal,
  #[serde(rename = "Semi-Formal")]
  SemiFormal,
  Casual,
}

impl EventFormality {
  pub fn label(self) -> &'static str {
    match self {
      Self::Formal => "Formal",
      Self::SemiFormal => "Semi-Formal",
      Self::Casual => "Casual",
    }
  }
}

impl fmt::Display for EventFormality {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for EventFormality {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "formal" => Ok(Self::Formal),
      "semi-formal" | "semiformal" | "semi formal" => Ok(Self::SemiFormal),
      "casual" => Ok(Self::Casual),
      _ => Err(Error::UnknownLabel(s.to_owned())),
    }
  }
}

// ─── GarmentItem ─────────────────────────────────────────────────────────────

/// A single closet item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentItem {
  pub id:              Uuid,
  /// URL or storage handle for the photo; opaque to the engine.
  pub image_ref:       String,
  /// The category exactly as supplied at upload time.
  pub raw_category:    String,
  pub category:        Category,
  pub subcategory:     Option<String>,
  pub occasion_tags:   Vec<String>,
  pub weather_tags:    Vec<String>,
  pub event_formality: Option<EventFormality>,
  pub created_at:      DateTime<Utc>,
}

impl GarmentItem {
  /// Every free-text field that tag scoring looks at, lowercased.
  pub fn tag_haystack(&self) -> Vec<String> {
    self
      .occasion_tags
      .iter()
      .chain(self.weather_tags.iter())
      .map(|t| t.to_lowercase())
      .chain(self.subcategory.iter().map(|s| s.to_lowercase()))
      .chain(self.event_formality.map(|f| f.label().to_lowercase()))
      .collect()
  }
}

// ─── NewGarment ──────────────────────────────────────────────────────────────

/// Subcategory keywords that mark an item as native attire.
const NATIVE_KEYWORDS: &[&str] =
  &["kaftan", "agbada", "buba & wrapper", "aso oke", "lace", "senator"];

/// Input to [`crate::store::ClosetStore::add_garment`]. `id` and `created_at`
/// are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewGarment {
  pub image_ref:       String,
  pub raw_category:    String,
  pub subcategory:     Option<String>,
  pub occasion_tags:   Vec<String>,
  pub weather_tags:    Vec<String>,
  pub event_formality: Option<EventFormality>,
}

impl NewGarment {
  pub fn new(image_ref: impl Into<String>, raw_category: impl Into<String>) -> Self {
    Self {
      image_ref:       image_ref.into(),
      raw_category:    raw_category.into(),
      subcategory:     None,
      occasion_tags:   Vec::new(),
      weather_tags:    Vec::new(),
      event_formality: None,
    }
  }

  pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
    self.subcategory = Some(subcategory.into());
    self
  }

  pub fn with_occasion_tags(mut self, tags: Vec<String>) -> Self {
    self.occasion_tags = tags;
    self
  }

  pub fn with_weather_tags(mut self, tags: Vec<String>) -> Self {
    self.weather_tags = tags;
    self
  }

  pub fn with_formality(mut self, formality: EventFormality) -> Self {
    self.event_formality = Some(formality);
    self
  }

  /// Whether the subcategory names a native outfit (Agbada, Aso Oke, ...).
  pub fn is_native_attire(&self) -> bool {
    let Some(sub) = &self.subcategory else { return false };
    let sub = sub.to_lowercase();
    NATIVE_KEYWORDS.iter().any(|k| sub.contains(k))
  }

  /// Build the stored record. Native attire with no occasion tags picks up
  /// the ceremonial occasions by default.
  pub fn into_item(self, id: Uuid, created_at: DateTime<Utc>) -> GarmentItem {
    let category = normalize_category(Some(&self.raw_category), self.subcategory.as_deref());

    let occasion_tags = if self.occasion_tags.is_empty() && self.is_native_attire() {
      [Occasion::Wedding, Occasion::TraditionalEvent, Occasion::ChurchMosque]
        .iter()
        .map(|o| o.label().to_owned())
        .collect()
    } else {
      dedup(self.occasion_tags)
    };

    GarmentItem {
      id,
      image_ref: self.image_ref,
      raw_category: self.raw_category,
      category,
      subcategory: self.subcategory,
      occasion_tags,
      weather_tags: dedup(self.weather_tags),
      event_formality: self.event_formality,
      created_at,
    }
  }
}

// ─── GarmentEdit ─────────────────────────────────────────────────────────────

/// The mutable subset of a garment. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct GarmentEdit {
  pub subcategory:     Option<Option<String>>,
  pub occasion_tags:   Option<Vec<String>>,
  pub weather_tags:    Option<Vec<String>>,
  pub event_formality: Option<Option<EventFormality>>,
}

impl GarmentEdit {
  pub fn is_empty(&self) -> bool {
    self.subcategory.is_none()
      && self.occasion_tags.is_none()
      && self.weather_tags.is_none()
      && self.event_formality.is_none()
  }

  /// Apply the edit in place. The category is never re-derived.
  pub fn apply(self, item: &mut GarmentItem) {
    if let Some(sub) = self.subcategory {
      item.subcategory = sub;
    }
    if let Some(tags) = self.occasion_tags {
      item.occasion_tags = dedup(tags);
    }
    if let Some(tags) = self.weather_tags {
      item.weather_tags = dedup(tags);
    }
    if let Some(formality) = self.event_formality {
      item.event_formality = formality;
    }
  }
}

/// Order-preserving, case-insensitive dedup that also drops blank tags.
fn dedup(tags: Vec<String>) -> Vec<String> {
  let mut out: Vec<String> = Vec::with_capacity(tags.len());
  for tag in tags {
    let tag = tag.trim().to_owned();
    if tag.is_empty() || out.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
      continue;
    }
    out.push(tag);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn build(input: NewGarment) -> GarmentItem { input.into_item(Uuid::new_v4(), Utc::now()) }

  #[test]
  fn category_is_normalized_at_creation() {
    let item = build(NewGarment::new("img://1", "Tops").with_subcategory("Polo"));
    assert_eq!(item.category, Category::Shirt);
    assert_eq!(item.raw_category, "Tops");
  }

  #[test]
  fn native_attire_defaults_to_ceremonial_occasions() {
    let item = build(NewGarment::new("img://2", "Native").with_subcategory("Aso Oke"));
    assert_eq!(item.category, Category::Native);
    assert_eq!(item.occasion_tags, ["Wedding", "Traditional Event", "Church/Mosque"]);
  }

  #[test]
  fn explicit_occasion_tags_win_over_native_default() {
    let item = build(
      NewGarment::new("img://3", "Native")
        .with_subcategory("Senator")
        .with_occasion_tags(vec!["Office".into()]),
    );
    assert_eq!(item.occasion_tags, ["Office"]);
  }

  #[test]
  fn tags_are_deduplicated_and_trimmed() {
    let item = build(
      NewGarment::new("img://4", "Shirt")
        .with_weather_tags(vec!["Hot".into(), " hot ".into(), "".into(), "Rainy".into()]),
    );
    assert_eq!(item.weather_tags, ["Hot", "Rainy"]);
  }

  #[test]
  fn haystack_lowercases_every_field() {
    let item = build(
      NewGarment::new("img://5", "Dress")
        .with_subcategory("Maxi Dress")
        .with_occasion_tags(vec!["Wedding".into()])
        .with_weather_tags(vec!["Cool".into()])
        .with_formality(EventFormality::SemiFormal),
    );
    assert_eq!(item.tag_haystack(), ["wedding", "cool", "maxi dress", "semi-formal"]);
  }

  #[test]
  fn edit_changes_tags_but_not_category() {
    let mut item = build(NewGarment::new("img://6", "Jeans"));
    GarmentEdit {
      occasion_tags: Some(vec!["Class".into()]),
      event_formality: Some(Some(EventFormality::Casual)),
      ..Default::default()
    }
    .apply(&mut item);

    assert_eq!(item.category, Category::Trousers);
    assert_eq!(item.occasion_tags, ["Class"]);
    assert_eq!(item.event_formality, Some(EventFormality::Casual));
  }

  #[test]
  fn formality_parses_loosely() {
    assert_eq!("semi-formal".parse::<EventFormality>().unwrap(), EventFormality::SemiFormal);
    assert_eq!("FORMAL".parse::<EventFormality>().unwrap(), EventFormality::Formal);
    assert!("black tie".parse::<EventFormality>().is_err());
  }
}
