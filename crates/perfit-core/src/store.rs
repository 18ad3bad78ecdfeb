//! The `ClosetStore` and `OutfitStore` traits.
//!
//! Implemented by storage backends (e.g. `perfit-store-sqlite`). The CLI
//! depends on these abstractions, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  category::Category,
  garment::{GarmentEdit, GarmentItem, NewGarment},
  occasion::Occasion,
  outfit::{NewOutfit, OutfitQuery, SavedOutfit},
};

// ─── Closet ──────────────────────────────────────────────────────────────────

/// Persistence for a user's garments.
///
/// All methods return `Send` futures so the traits can be used in
/// multi-threaded async runtimes.
pub trait ClosetStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Normalize and persist a new garment. `id` and `created_at` are set by
  /// the store.
  fn add_garment(
    &self,
    input: NewGarment,
  ) -> impl Future<Output = Result<GarmentItem, Self::Error>> + Send + '_;

  /// Returns `None` if not found.
  fn get_garment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<GarmentItem>, Self::Error>> + Send + '_;

  /// All garments, oldest first, optionally restricted to one category.
  fn list_garments(
    &self,
    category: Option<Category>,
  ) -> impl Future<Output = Result<Vec<GarmentItem>, Self::Error>> + Send + '_;

  /// Apply an edit to the mutable fields of a garment and return the result.
  fn edit_garment(
    &self,
    id: Uuid,
    edit: GarmentEdit,
  ) -> impl Future<Output = Result<GarmentItem, Self::Error>> + Send + '_;

  fn delete_garment(&self, id: Uuid) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Distinct categories present in the closet, in canonical order.
  fn categories_in_use(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;
}

// ─── Outfits ─────────────────────────────────────────────────────────────────

/// Persistence for saved outfits. At most one outfit exists per scheduled
/// date.
pub trait OutfitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist an outfit, atomically replacing any outfit already scheduled
  /// for the same date.
  fn save_outfit(
    &self,
    input: NewOutfit,
  ) -> impl Future<Output = Result<SavedOutfit, Self::Error>> + Send + '_;

  fn get_outfit(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<SavedOutfit>, Self::Error>> + Send + '_;

  fn outfit_for_date(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<SavedOutfit>, Self::Error>> + Send + '_;

  /// Outfits matching `query`, newest first.
  fn list_outfits<'a>(
    &'a self,
    query: &'a OutfitQuery,
  ) -> impl Future<Output = Result<Vec<SavedOutfit>, Self::Error>> + Send + 'a;

  /// Distinct occasions among saved outfits.
  fn occasions_in_use(
    &self,
  ) -> impl Future<Output = Result<Vec<Occasion>, Self::Error>> + Send + '_;

  /// Move an outfit to `date`. Another outfit already on `date` is removed.
  fn reschedule_outfit(
    &self,
    id: Uuid,
    date: NaiveDate,
  ) -> impl Future<Output = Result<SavedOutfit, Self::Error>> + Send + '_;

  fn delete_outfit(&self, id: Uuid) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
