//! Error type for `perfit-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Domain errors, including missing garments and outfits.
  #[error("{0}")]
  Core(#[from] perfit_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl Error {
  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      Self::Core(perfit_core::Error::GarmentNotFound(_) | perfit_core::Error::OutfitNotFound(_))
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
