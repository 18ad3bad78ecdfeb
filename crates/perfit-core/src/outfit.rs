//! Saved outfits: snapshots of an assembly scheduled for a calendar day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, assembly::OutfitAssembly, garment::GarmentItem, occasion::Occasion};

/// A persisted outfit. `layers` is a copy of the garments at save time, so
/// later closet edits or deletions do not change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedOutfit {
  pub id:             Uuid,
  pub layers:         Vec<GarmentItem>,
  pub occasion:       Occasion,
  pub tags:           Vec<String>,
  pub scheduled_date: NaiveDate,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::OutfitStore::save_outfit`].
#[derive(Debug, Clone)]
pub struct NewOutfit {
  pub layers:         Vec<GarmentItem>,
  pub occasion:       Occasion,
  pub tags:           Vec<String>,
  pub scheduled_date: NaiveDate,
}

impl NewOutfit {
  /// Returns [`Error::EmptyOutfit`] when the assembly holds no items.
  pub fn from_assembly(
    assembly: OutfitAssembly,
    occasion: Occasion,
    tags: Vec<String>,
    scheduled_date: NaiveDate,
  ) -> Result<Self> {
    if assembly.is_empty() {
      return Err(Error::EmptyOutfit);
    }
    Ok(Self { layers: assembly.into_layers(), occasion, tags, scheduled_date })
  }
}

/// Parameters for [`crate::store::OutfitStore::list_outfits`]. Date bounds
/// are inclusive.
#[derive(Debug, Clone, Default)]
pub struct OutfitQuery {
  pub occasion: Option<Occasion>,
  pub from:     Option<NaiveDate>,
  pub to:       Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    assembly::Body,
    garment::NewGarment,
  };

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  #[test]
  fn empty_assembly_is_rejected() {
    let err = NewOutfit::from_assembly(
      OutfitAssembly::default(),
      Occasion::Casual,
      vec![],
      date("2024-06-12"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::EmptyOutfit));
  }

  #[test]
  fn layers_are_flattened_in_order() {
    let dress = NewGarment::new("img://d", "Dress").into_item(Uuid::new_v4(), Utc::now());
    let shoes = NewGarment::new("img://s", "Shoes").into_item(Uuid::new_v4(), Utc::now());
    let assembly = OutfitAssembly {
      outerwear: None,
      body:      Body::Dress(dress.clone()),
      footwear:  Some(shoes.clone()),
    };

    let outfit = NewOutfit::from_assembly(
      assembly,
      Occasion::ChurchMosque,
      vec!["Church/Mosque".into()],
      date("2024-06-16"),
    )
    .unwrap();
    assert_eq!(outfit.layers, [dress, shoes]);
  }
}
