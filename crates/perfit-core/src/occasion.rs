//! Occasions and the keyword classifier that infers one from event text.
//!
//! Rules are an ordered list evaluated first-match-wins, most formal first.
//! Each rule carries a fixed tag set that later biases slot selection.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── Occasion ────────────────────────────────────────────────────────────────

/// The closed set of canonical occasions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
  Interview,
  Conference,
  Presentation,
  Office,
  Class,
  #[serde(rename = "Exam/Test")]
  ExamTest,
  #[serde(rename = "Church/Mosque")]
  ChurchMosque,
  #[serde(rename = "Traditional Event")]
  TraditionalEvent,
  Wedding,
  Date,
  #[serde(rename = "Birthday Party")]
  BirthdayParty,
  Hangout,
  Casual,
}

/// How an occasion shapes the outfit; see [`crate::assembly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccasionFamily {
  Formal,
  Academic,
  Ceremonial,
  Social,
  Casual,
}

impl Occasion {
  /// Presets in the order they are offered to the user.
  pub const PRESETS: [Occasion; 13] = [
    Self::Interview,
    Self::Conference,
    Self::Presentation,
    Self::Office,
    Self::Class,
    Self::ExamTest,
    Self::ChurchMosque,
    Self::TraditionalEvent,
    Self::Wedding,
    Self::Date,
    Self::BirthdayParty,
    Self::Hangout,
    Self::Casual,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::Interview => "Interview",
      Self::Conference => "Conference",
      Self::Presentation => "Presentation",
      Self::Office => "Office",
      Self::Class => "Class",
      Self::ExamTest => "Exam/Test",
      Self::ChurchMosque => "Church/Mosque",
      Self::TraditionalEvent => "Traditional Event",
      Self::Wedding => "Wedding",
      Self::Date => "Date",
      Self::BirthdayParty => "Birthday Party",
      Self::Hangout => "Hangout",
      Self::Casual => "Casual",
    }
  }

  pub fn family(self) -> OccasionFamily {
    match self {
      Self::Interview | Self::Presentation | Self::Conference | Self::Office => {
        OccasionFamily::Formal
      }
      Self::Class | Self::ExamTest => OccasionFamily::Academic,
      Self::ChurchMosque | Self::TraditionalEvent | Self::Wedding => OccasionFamily::Ceremonial,
      Self::Date | Self::BirthdayParty | Self::Hangout => OccasionFamily::Social,
      Self::Casual => OccasionFamily::Casual,
    }
  }
}

impl fmt::Display for Occasion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// Case-insensitive parse of a canonical label. `"Party"` is accepted as an
/// alias for Birthday Party since item tags use the shorter form.
impl FromStr for Occasion {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("party") {
      return Ok(Self::BirthdayParty);
    }
    Self::PRESETS
      .into_iter()
      .find(|o| o.label().eq_ignore_ascii_case(trimmed))
      .ok_or_else(|| Error::UnknownLabel(s.to_owned()))
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// An occasion plus the descriptive tags used to bias item selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccasionProfile {
  pub occasion: Occasion,
  pub tags:     Vec<String>,
}

impl OccasionProfile {
  fn from_rule(occasion: Occasion, tags: &[&str]) -> Self {
    Self { occasion, tags: tags.iter().map(|t| (*t).to_owned()).collect() }
  }

  /// The fallback profile for unclassified input.
  pub fn casual() -> Self { Self::from_rule(Occasion::Casual, DEFAULT_TAGS) }

  /// Re-derive tags for a chosen occasion: those of the first rule that
  /// yields it.
  pub fn for_occasion(occasion: Occasion) -> Self {
    RULES
      .iter()
      .find(|rule| rule.occasion == occasion)
      .map(|rule| Self::from_rule(occasion, rule.tags))
      .unwrap_or_else(|| Self::from_rule(occasion, DEFAULT_TAGS))
  }

  pub fn has_tag(&self, tag: &str) -> bool {
    self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

struct Rule {
  keywords: &'static [&'static str],
  occasion: Occasion,
  tags:     &'static [&'static str],
}

const DEFAULT_TAGS: &[&str] = &["casual"];

const RULES: &[Rule] = &[
  // Strict formal first.
  Rule {
    keywords: &["interview", "panel", "assessment"],
    occasion: Occasion::Interview,
    tags:     &["formal", "office", "presentation-friendly"],
  },
  Rule {
    keywords: &["presentation", "defence", "defense", "pitch"],
    occasion: Occasion::Presentation,
    tags:     &["formal", "presentation-friendly", "office"],
  },
  Rule {
    keywords: &["conference", "summit", "seminar", "client meeting", "board"],
    occasion: Occasion::Conference,
    tags:     &["formal", "office"],
  },
  Rule {
    keywords: &[
      "office",
      "work",
      "induction",
      "orientation",
      "onboarding",
      "networking",
      "mixer",
      "town hall",
      "standup",
    ],
    occasion: Occasion::Office,
    tags:     &["smart-casual", "office"],
  },
  // Academic.
  Rule {
    keywords: &["class", "lecture", "tutorial", "lab", "school", "campus"],
    occasion: Occasion::Class,
    tags:     &["class", "comfort", "student"],
  },
  Rule {
    keywords: &["exam", "test"],
    occasion: Occasion::ExamTest,
    tags:     &["class", "exam", "comfort"],
  },
  // Religious.
  Rule {
    keywords: &["church", "service", "mass", "mosque", "jummah", "prayer", "fellowship"],
    occasion: Occasion::ChurchMosque,
    tags:     &["religious", "modest"],
  },
  // Traditional.
  Rule {
    keywords: &["owambe", "aso ebi", "asoebi", "introduction", "engagement", "naming"],
    occasion: Occasion::TraditionalEvent,
    tags:     &["traditional", "event"],
  },
  Rule {
    keywords: &["wedding", "reception"],
    occasion: Occasion::Wedding,
    tags:     &["traditional", "event"],
  },
  // Social.
  Rule {
    keywords: &["birthday", "party"],
    occasion: Occasion::BirthdayParty,
    tags:     &["social", "smart-casual"],
  },
  Rule { keywords: &["date"], occasion: Occasion::Date, tags: &["social", "smart-casual"] },
  Rule {
    keywords: &[
      "hangout",
      "get together",
      "get-together",
      "reunion",
      "family meeting",
      "house party",
    ],
    occasion: Occasion::Hangout,
    tags:     &["social", "smart-casual"],
  },
  // Generic meetings land on Office, after every more specific rule.
  Rule { keywords: &["meeting"], occasion: Occasion::Office, tags: &["office"] },
];

/// Infer an occasion and its tags from free-form event text.
///
/// Total: empty or unmatched input yields `(Casual, ["casual"])`.
pub fn classify_event(text: Option<&str>) -> OccasionProfile {
  let t = text.unwrap_or_default().to_lowercase();
  if t.trim().is_empty() {
    return OccasionProfile::casual();
  }

  RULES
    .iter()
    .find(|rule| rule.keywords.iter().any(|k| t.contains(k)))
    .map(|rule| OccasionProfile::from_rule(rule.occasion, rule.tags))
    .unwrap_or_else(OccasionProfile::casual)
}

/// Resolve a user-picked label: a canonical occasion name gets its own
/// profile, anything else is treated as event text.
pub fn classify_label(label: &str) -> OccasionProfile {
  match label.parse::<Occasion>() {
    Ok(occasion) => OccasionProfile::for_occasion(occasion),
    Err(_) => classify_event(Some(label)),
  }
}
