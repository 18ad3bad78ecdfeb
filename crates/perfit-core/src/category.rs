//! Canonical garment categories and the keyword normalizer that maps noisy
//! upload-time labels onto them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Category ────────────────────────────────────────────────────────────────

/// The closed set of canonical garment buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
  Shirt,
  Trousers,
  Skirt,
  Dress,
  Jacket,
  Sweater,
  Shoes,
  Sandals,
  Heels,
  Loafers,
  Native,
  Other,
}

impl Category {
  pub const ALL: [Category; 12] = [
    Self::Shirt,
    Self::Trousers,
    Self::Skirt,
    Self::Dress,
    Self::Jacket,
    Self::Sweater,
    Self::Shoes,
    Self::Sandals,
    Self::Heels,
    Self::Loafers,
    Self::Native,
    Self::Other,
  ];

  /// Display label; also the string stored in the `category` column.
  pub fn label(self) -> &'static str {
    match self {
      Self::Shirt => "Shirt",
      Self::Trousers => "Trousers",
      Self::Skirt => "Skirt",
      Self::Dress => "Dress",
      Self::Jacket => "Jacket",
      Self::Sweater => "Sweater",
      Self::Shoes => "Shoes",
      Self::Sandals => "Sandals",
      Self::Heels => "Heels",
      Self::Loafers => "Loafers",
      Self::Native => "Native",
      Self::Other => "Other",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// Case-insensitive parse of a canonical label.
impl FromStr for Category {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    Self::ALL
      .into_iter()
      .find(|c| c.label().eq_ignore_ascii_case(trimmed))
      .ok_or_else(|| Error::UnknownLabel(s.to_owned()))
  }
}

// ─── Normalizer ──────────────────────────────────────────────────────────────

/// Keyword rules in priority order. Outerwear is checked before tops, and the
/// specific footwear buckets before the generic `Shoes`.
const RULES: &[(Category, &[&str])] = &[
  (Category::Jacket, &["jacket", "coat", "blazer"]),
  (Category::Sweater, &["sweater", "hoodie", "cardigan", "jumper", "pull", "knit"]),
  (
    Category::Shirt,
    &["top", "tops", "shirt", "tshirt", "t-shirt", "tee", "blouse", "polo", "camisole", "tank"],
  ),
  (Category::Trousers, &["trouser", "trousers", "pants", "jean", "jeans"]),
  (Category::Skirt, &["skirt"]),
  (Category::Dress, &["dress", "gown"]),
  (Category::Heels, &["heel"]),
  (Category::Loafers, &["loafer"]),
  (Category::Sandals, &["sandal", "flipflop"]),
  (Category::Shoes, &["shoe", "sneaker", "trainer", "footwear"]),
];

/// Map a free-text `(category, subcategory)` pair onto exactly one canonical
/// [`Category`].
///
/// Both strings are case-folded and searched for each rule's keywords; the
/// first rule with a hit wins. When nothing matches, the raw category is used
/// if it already names a canonical bucket (e.g. `"Native"`), otherwise the
/// result is [`Category::Other`].
pub fn normalize_category(category: Option<&str>, subcategory: Option<&str>) -> Category {
  let c = category.unwrap_or_default().to_lowercase();
  let s = subcategory.unwrap_or_default().to_lowercase();

  RULES
    .iter()
    .find(|(_, keywords)| keywords.iter().any(|k| c.contains(k) || s.contains(k)))
    .map(|(bucket, _)| *bucket)
    .unwrap_or_else(|| raw_fallback(category.unwrap_or_default()))
}

fn raw_fallback(raw: &str) -> Category {
  let raw = raw.trim();
  if raw.eq_ignore_ascii_case("bottoms") {
    return Category::Trousers;
  }
  raw.parse().unwrap_or(Category::Other)
}
