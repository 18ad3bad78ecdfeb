//! [`SqliteStore`] — the SQLite implementation of [`ClosetStore`] and
//! [`OutfitStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use perfit_core::{
  category::Category,
  garment::{GarmentEdit, GarmentItem, NewGarment},
  occasion::Occasion,
  outfit::{NewOutfit, OutfitQuery, SavedOutfit},
  store::{ClosetStore, OutfitStore},
};

use crate::{
  Result,
  encode::{
    GARMENT_COLUMNS, OUTFIT_COLUMNS, RawGarment, RawOutfit, decode_category, decode_occasion,
    encode_date, encode_tags, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Perfit closet and outfit store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch at most one outfit whose `column` equals `key`.
  async fn outfit_where(&self, column: &'static str, key: String) -> Result<Option<SavedOutfit>> {
    let raw: Option<RawOutfit> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {OUTFIT_COLUMNS} FROM outfits WHERE {column} = ?1"),
              rusqlite::params![key],
              RawOutfit::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawOutfit::into_outfit).transpose()
  }
}

// ─── ClosetStore impl ────────────────────────────────────────────────────────

impl ClosetStore for SqliteStore {
  type Error = crate::Error;

  async fn add_garment(&self, input: NewGarment) -> Result<GarmentItem> {
    let item = input.into_item(Uuid::new_v4(), Utc::now());
    let raw = RawGarment::from_item(&item)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO garments (
             garment_id, image_ref, raw_category, category, subcategory,
             occasion_tags, weather_tags, event_formality, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            raw.garment_id,
            raw.image_ref,
            raw.raw_category,
            raw.category,
            raw.subcategory,
            raw.occasion_tags,
            raw.weather_tags,
            raw.event_formality,
            raw.created_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(
      id = %item.id,
      category = %item.category,
      raw = %item.raw_category,
      "added garment"
    );
    Ok(item)
  }

  async fn get_garment(&self, id: Uuid) -> Result<Option<GarmentItem>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawGarment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {GARMENT_COLUMNS} FROM garments WHERE garment_id = ?1"),
              rusqlite::params![id_str],
              RawGarment::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawGarment::into_item).transpose()
  }

  async fn list_garments(&self, category: Option<Category>) -> Result<Vec<GarmentItem>> {
    let category_str = category.map(|c| c.label().to_owned());

    let raws: Vec<RawGarment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {GARMENT_COLUMNS} FROM garments
           WHERE (?1 IS NULL OR category = ?1)
           ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![category_str], RawGarment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGarment::into_item).collect()
  }

  async fn edit_garment(&self, id: Uuid, edit: GarmentEdit) -> Result<GarmentItem> {
    let mut item =
      self.get_garment(id).await?.ok_or(perfit_core::Error::GarmentNotFound(id))?;
    if edit.is_empty() {
      return Ok(item);
    }
    edit.apply(&mut item);

    let id_str = encode_uuid(id);
    let subcategory = item.subcategory.clone();
    let occasion_tags = encode_tags(&item.occasion_tags)?;
    let weather_tags = encode_tags(&item.weather_tags)?;
    let formality = item.event_formality.map(|f| f.label().to_owned());

    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE garments
           SET subcategory = ?2, occasion_tags = ?3, weather_tags = ?4, event_formality = ?5
           WHERE garment_id = ?1",
          rusqlite::params![id_str, subcategory, occasion_tags, weather_tags, formality],
        )?)
      })
      .await?;

    // Deleted between the read and the write.
    if updated == 0 {
      return Err(perfit_core::Error::GarmentNotFound(id).into());
    }
    tracing::debug!(%id, "edited garment");
    Ok(item)
  }

  async fn delete_garment(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM garments WHERE garment_id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    if deleted == 0 {
      return Err(perfit_core::Error::GarmentNotFound(id).into());
    }
    tracing::debug!(%id, "deleted garment");
    Ok(())
  }

  async fn categories_in_use(&self) -> Result<Vec<Category>> {
    let labels: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT DISTINCT category FROM garments")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    let present = labels.iter().map(|l| decode_category(l)).collect::<Result<Vec<_>>>()?;
    Ok(Category::ALL.into_iter().filter(|c| present.contains(c)).collect())
  }
}

// ─── OutfitStore impl ────────────────────────────────────────────────────────

impl OutfitStore for SqliteStore {
  type Error = crate::Error;

  async fn save_outfit(&self, input: NewOutfit) -> Result<SavedOutfit> {
    if input.layers.is_empty() {
      return Err(perfit_core::Error::EmptyOutfit.into());
    }

    let outfit = SavedOutfit {
      id:             Uuid::new_v4(),
      layers:         input.layers,
      occasion:       input.occasion,
      tags:           input.tags,
      scheduled_date: input.scheduled_date,
      created_at:     Utc::now(),
    };
    let raw = RawOutfit::from_outfit(&outfit)?;

    let replaced = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let replaced = tx.execute(
          "DELETE FROM outfits WHERE scheduled_date = ?1",
          rusqlite::params![raw.scheduled_date],
        )?;
        tx.execute(
          "INSERT INTO outfits (outfit_id, layers_json, occasion, tags, scheduled_date, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            raw.outfit_id,
            raw.layers_json,
            raw.occasion,
            raw.tags,
            raw.scheduled_date,
            raw.created_at,
          ],
        )?;
        tx.commit()?;
        Ok(replaced)
      })
      .await?;

    tracing::info!(
      id = %outfit.id,
      date = %outfit.scheduled_date,
      occasion = %outfit.occasion,
      replaced,
      "saved outfit"
    );
    Ok(outfit)
  }

  async fn get_outfit(&self, id: Uuid) -> Result<Option<SavedOutfit>> {
    self.outfit_where("outfit_id", encode_uuid(id)).await
  }

  async fn outfit_for_date(&self, date: NaiveDate) -> Result<Option<SavedOutfit>> {
    self.outfit_where("scheduled_date", encode_date(date)).await
  }

  async fn list_outfits(&self, query: &OutfitQuery) -> Result<Vec<SavedOutfit>> {
    let occasion_str = query.occasion.map(|o| o.label().to_owned());
    let from_str = query.from.map(encode_date);
    let to_str = query.to.map(encode_date);

    let raws: Vec<RawOutfit> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {OUTFIT_COLUMNS} FROM outfits
           WHERE (?1 IS NULL OR occasion = ?1)
             AND (?2 IS NULL OR scheduled_date >= ?2)
             AND (?3 IS NULL OR scheduled_date <= ?3)
           ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![occasion_str, from_str, to_str], RawOutfit::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOutfit::into_outfit).collect()
  }

  async fn occasions_in_use(&self) -> Result<Vec<Occasion>> {
    let labels: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT DISTINCT occasion FROM outfits")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    let present = labels.iter().map(|l| decode_occasion(l)).collect::<Result<Vec<_>>>()?;
    Ok(Occasion::PRESETS.into_iter().filter(|o| present.contains(o)).collect())
  }

  async fn reschedule_outfit(&self, id: Uuid, date: NaiveDate) -> Result<SavedOutfit> {
    let id_str = encode_uuid(id);
    let date_str = encode_date(date);

    let moved = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let exists = tx
          .query_row("SELECT 1 FROM outfits WHERE outfit_id = ?1", rusqlite::params![id_str], |_| {
            Ok(())
          })
          .optional()?
          .is_some();
        if !exists {
          return Ok(None);
        }
        let replaced = tx.execute(
          "DELETE FROM outfits WHERE scheduled_date = ?1 AND outfit_id != ?2",
          rusqlite::params![date_str, id_str],
        )?;
        tx.execute(
          "UPDATE outfits SET scheduled_date = ?1 WHERE outfit_id = ?2",
          rusqlite::params![date_str, id_str],
        )?;
        tx.commit()?;
        Ok(Some(replaced))
      })
      .await?;

    let Some(replaced) = moved else {
      return Err(perfit_core::Error::OutfitNotFound(id).into());
    };
    tracing::info!(%id, %date, replaced, "rescheduled outfit");

    self.get_outfit(id).await?.ok_or_else(|| perfit_core::Error::OutfitNotFound(id).into())
  }

  async fn delete_outfit(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM outfits WHERE outfit_id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    if deleted == 0 {
      return Err(perfit_core::Error::OutfitNotFound(id).into());
    }
    tracing::info!(%id, "deleted outfit");
    Ok(())
  }
}
