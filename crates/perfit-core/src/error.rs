//! Error types for `perfit-core`.
//!
//! The engine itself never fails: unclassified text and empty slots resolve
//! to fallbacks. These variants cover the persistence boundary.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("garment not found: {0}")]
  GarmentNotFound(Uuid),

  #[error("outfit not found: {0}")]
  OutfitNotFound(Uuid),

  #[error("cannot save an outfit with no layers")]
  EmptyOutfit,

  #[error("unknown label: {0:?}")]
  UnknownLabel(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
