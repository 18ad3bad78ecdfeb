//! Command-line surface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use perfit_core::{
  category::Category, garment::EventFormality, occasion::Occasion, weather::WeatherBucket,
};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "perfit", author, version, about = "Outfit suggestions from your own closet")]
pub struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "perfit.toml")]
  pub config: PathBuf,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Manage closet items.
  #[command(subcommand)]
  Closet(ClosetCommand),

  /// Generate an outfit suggestion.
  Suggest(SuggestArgs),

  /// Browse and manage saved outfits.
  #[command(subcommand)]
  Outfits(OutfitsCommand),

  /// Show how labels and event text are interpreted.
  #[command(subcommand)]
  Classify(ClassifyCommand),
}

// ─── closet ──────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum ClosetCommand {
  /// Add an item.
  Add {
    /// Image URL or storage handle.
    #[arg(long)]
    image:       String,
    /// Category as you would describe it ("Tops", "Jeans", ...).
    #[arg(long)]
    category:    String,
    #[arg(long)]
    subcategory: Option<String>,
    /// Occasion tag; repeatable.
    #[arg(long = "occasion", value_name = "OCCASION")]
    occasions:   Vec<String>,
    /// Weather tag; repeatable.
    #[arg(long = "weather", value_name = "WEATHER")]
    weather:     Vec<String>,
    #[arg(long)]
    formality:   Option<EventFormality>,
  },

  /// List items, optionally for one canonical category.
  List {
    #[arg(long)]
    category: Option<Category>,
  },

  /// Canonical categories present in the closet.
  Categories,

  /// Show one item.
  Show { id: Uuid },

  /// Edit an item's tags, subcategory or formality.
  Edit(EditArgs),

  /// Delete an item.
  Delete { id: Uuid },
}

#[derive(Args, Debug)]
pub struct EditArgs {
  pub id: Uuid,

  #[arg(long, conflicts_with = "clear_subcategory")]
  pub subcategory: Option<String>,

  #[arg(long)]
  pub clear_subcategory: bool,

  /// Replace the occasion tags; repeatable.
  #[arg(long = "occasion", value_name = "OCCASION")]
  pub occasions: Vec<String>,

  #[arg(long, conflicts_with = "occasions")]
  pub clear_occasions: bool,

  /// Replace the weather tags; repeatable.
  #[arg(long = "weather", value_name = "WEATHER")]
  pub weather: Vec<String>,

  #[arg(long, conflicts_with = "weather")]
  pub clear_weather: bool,

  #[arg(long, conflicts_with = "clear_formality")]
  pub formality: Option<EventFormality>,

  #[arg(long)]
  pub clear_formality: bool,
}

// ─── suggest ─────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct SuggestArgs {
  #[command(flatten)]
  pub source: SourceArgs,

  /// Bias tag for `--occasion`, replacing its own tags; repeatable.
  #[arg(long = "tag", value_name = "TAG", requires = "occasion")]
  pub tags: Vec<String>,

  #[command(flatten)]
  pub weather: WeatherArgs,

  /// Day the outfit is for (default: today).
  #[arg(long)]
  pub date: Option<NaiveDate>,

  /// Save the suggestion for that day, replacing any outfit already there.
  #[arg(long)]
  pub save: bool,

  /// Seed the random draw for a repeatable suggestion.
  #[arg(long)]
  pub seed: Option<u64>,
}

/// Where the occasion comes from. With none given the outfit is casual.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct SourceArgs {
  /// A preset occasion ("Office", "Church/Mosque", ...).
  #[arg(long)]
  pub occasion: Option<Occasion>,

  /// Free-form event text to classify.
  #[arg(long)]
  pub event: Option<String>,

  /// Pick a preset occasion at random.
  #[arg(long)]
  pub random: bool,

  /// JSON file of calendar events; the event on `--date` is used.
  #[arg(long, value_name = "FILE")]
  pub calendar: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct WeatherArgs {
  /// Weather bucket: Hot, Cool, Rainy or Harmattan.
  #[arg(long)]
  pub weather: Option<WeatherBucket>,

  /// A forecast description such as "light rain".
  #[arg(long, value_name = "TEXT")]
  pub weather_desc: Option<String>,
}

// ─── outfits ─────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum OutfitsCommand {
  /// List saved outfits, newest first.
  List {
    #[arg(long)]
    occasion: Option<Occasion>,
    /// First day to include.
    #[arg(long)]
    from:     Option<NaiveDate>,
    /// Last day to include.
    #[arg(long)]
    to:       Option<NaiveDate>,
  },

  /// Occasions that have saved outfits.
  Occasions,

  /// Show one outfit.
  Show { id: Uuid },

  /// Move an outfit to another day.
  Reschedule { id: Uuid, date: NaiveDate },

  /// Delete an outfit.
  Delete { id: Uuid },
}

// ─── classify ────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum ClassifyCommand {
  /// Normalize a category (and optional subcategory).
  Category {
    category:    String,
    subcategory: Option<String>,
  },

  /// Infer an occasion from event text.
  Event { text: String },

  /// Resolve a picked label: a preset name, or else event text.
  Label { label: String },
}
