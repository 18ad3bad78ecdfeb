//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, scheduled dates are `YYYY-MM-DD`. Tag
//! lists and layer snapshots are compact JSON. Enums are stored by their
//! display label. UUIDs are hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use perfit_core::{
  category::Category,
  garment::{EventFormality, GarmentItem},
  occasion::Occasion,
  outfit::SavedOutfit,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Time ────────────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Labels ──────────────────────────────────────────────────────────────────

pub fn decode_category(s: &str) -> Result<Category> { Ok(s.parse()?) }

pub fn decode_occasion(s: &str) -> Result<Occasion> { Ok(s.parse()?) }

pub fn decode_formality(s: &str) -> Result<EventFormality> { Ok(s.parse()?) }

// ─── JSON columns ────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> { Ok(serde_json::to_string(tags)?) }

pub fn decode_tags(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

pub fn encode_layers(layers: &[GarmentItem]) -> Result<String> {
  Ok(serde_json::to_string(layers)?)
}

pub fn decode_layers(s: &str) -> Result<Vec<GarmentItem>> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

pub const GARMENT_COLUMNS: &str = "garment_id, image_ref, raw_category, category, subcategory,
   occasion_tags, weather_tags, event_formality, created_at";

/// Raw strings read directly from a `garments` row.
pub struct RawGarment {
  pub garment_id:      String,
  pub image_ref:       String,
  pub raw_category:    String,
  pub category:        String,
  pub subcategory:     Option<String>,
  pub occasion_tags:   String,
  pub weather_tags:    String,
  pub event_formality: Option<String>,
  pub created_at:      String,
}

impl RawGarment {
  /// Column order must match [`GARMENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      garment_id:      row.get(0)?,
      image_ref:       row.get(1)?,
      raw_category:    row.get(2)?,
      category:        row.get(3)?,
      subcategory:     row.get(4)?,
      occasion_tags:   row.get(5)?,
      weather_tags:    row.get(6)?,
      event_formality: row.get(7)?,
      created_at:      row.get(8)?,
    })
  }

  pub fn from_item(item: &GarmentItem) -> Result<Self> {
    Ok(Self {
      garment_id:      encode_uuid(item.id),
      image_ref:       item.image_ref.clone(),
      raw_category:    item.raw_category.clone(),
      category:        item.category.label().to_owned(),
      subcategory:     item.subcategory.clone(),
      occasion_tags:   encode_tags(&item.occasion_tags)?,
      weather_tags:    encode_tags(&item.weather_tags)?,
      event_formality: item.event_formality.map(|f| f.label().to_owned()),
      created_at:      encode_dt(item.created_at),
    })
  }

  pub fn into_item(self) -> Result<GarmentItem> {
    Ok(GarmentItem {
      id:              decode_uuid(&self.garment_id)?,
      image_ref:       self.image_ref,
      raw_category:    self.raw_category,
      category:        decode_category(&self.category)?,
      subcategory:     self.subcategory,
      occasion_tags:   decode_tags(&self.occasion_tags)?,
      weather_tags:    decode_tags(&self.weather_tags)?,
      event_formality: self.event_formality.as_deref().map(decode_formality).transpose()?,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

pub const OUTFIT_COLUMNS: &str =
  "outfit_id, layers_json, occasion, tags, scheduled_date, created_at";

/// Raw strings read directly from an `outfits` row.
pub struct RawOutfit {
  pub outfit_id:      String,
  pub layers_json:    String,
  pub occasion:       String,
  pub tags:           String,
  pub scheduled_date: String,
  pub created_at:     String,
}

impl RawOutfit {
  /// Column order must match [`OUTFIT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      outfit_id:      row.get(0)?,
      layers_json:    row.get(1)?,
      occasion:       row.get(2)?,
      tags:           row.get(3)?,
      scheduled_date: row.get(4)?,
      created_at:     row.get(5)?,
    })
  }

  pub fn from_outfit(outfit: &SavedOutfit) -> Result<Self> {
    Ok(Self {
      outfit_id:      encode_uuid(outfit.id),
      layers_json:    encode_layers(&outfit.layers)?,
      occasion:       outfit.occasion.label().to_owned(),
      tags:           encode_tags(&outfit.tags)?,
      scheduled_date: encode_date(outfit.scheduled_date),
      created_at:     encode_dt(outfit.created_at),
    })
  }

  pub fn into_outfit(self) -> Result<SavedOutfit> {
    Ok(SavedOutfit {
      id:             decode_uuid(&self.outfit_id)?,
      layers:         decode_layers(&self.layers_json)?,
      occasion:       decode_occasion(&self.occasion)?,
      tags:           decode_tags(&self.tags)?,
      scheduled_date: decode_date(&self.scheduled_date)?,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}
