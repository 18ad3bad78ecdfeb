//! Command handlers. Each writes its output to `out` so it can be tested
//! against an in-memory store.

use std::io::Write;

use anyhow::{Context as _, bail};
use chrono::{Local, NaiveDate};
use perfit_core::{
  calendar::parse_events,
  category::normalize_category,
  garment::{GarmentEdit, NewGarment},
  occasion::{Occasion, classify_event, classify_label},
  outfit::OutfitQuery,
  store::{ClosetStore, OutfitStore},
  suggest::{OccasionSource, Suggester},
  weather::WeatherBucket,
};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
  cli::{ClassifyCommand, ClosetCommand, EditArgs, OutfitsCommand, SourceArgs, SuggestArgs},
  config::AppConfig,
  render,
};

// ─── closet ──────────────────────────────────────────────────────────────────

pub async fn closet<S, W>(store: &S, command: ClosetCommand, out: &mut W) -> anyhow::Result<()>
where
  S: ClosetStore,
  W: Write,
{
  match command {
    ClosetCommand::Add { image, category, subcategory, occasions, weather, formality } => {
      let mut input = NewGarment::new(image, category)
        .with_occasion_tags(occasions)
        .with_weather_tags(weather);
      input.subcategory = subcategory;
      input.event_formality = formality;

      let item = store.add_garment(input).await.context("failed to add item")?;
      writeln!(out, "added {}", render::garment_line(&item))?;
    }
    ClosetCommand::List { category } => {
      let items = store.list_garments(category).await.context("failed to list closet")?;
      if items.is_empty() {
        writeln!(out, "closet is empty")?;
      }
      for item in &items {
        writeln!(out, "{}", render::garment_line(item))?;
      }
    }
    ClosetCommand::Categories => {
      for category in store.categories_in_use().await? {
        writeln!(out, "{category}")?;
      }
    }
    ClosetCommand::Show { id } => {
      let Some(item) = store.get_garment(id).await? else {
        bail!("no closet item with id {id}");
      };
      render::garment_detail(out, &item)?;
    }
    ClosetCommand::Edit(args) => {
      let id = args.id;
      let item = store
        .edit_garment(id, garment_edit(args))
        .await
        .with_context(|| format!("failed to edit item {id}"))?;
      writeln!(out, "updated {}", render::garment_line(&item))?;
    }
    ClosetCommand::Delete { id } => {
      store.delete_garment(id).await.with_context(|| format!("failed to delete item {id}"))?;
      writeln!(out, "deleted {id}")?;
    }
  }
  Ok(())
}

fn garment_edit(args: EditArgs) -> GarmentEdit {
  let replace = |values: Vec<String>, clear: bool| {
    if clear {
      Some(Vec::new())
    } else {
      (!values.is_empty()).then_some(values)
    }
  };

  GarmentEdit {
    subcategory:     if args.clear_subcategory { Some(None) } else { args.subcategory.map(Some) },
    occasion_tags:   replace(args.occasions, args.clear_occasions),
    weather_tags:    replace(args.weather, args.clear_weather),
    event_formality: if args.clear_formality { Some(None) } else { args.formality.map(Some) },
  }
}

// ─── suggest ─────────────────────────────────────────────────────────────────

pub async fn suggest<S, W>(
  store: &S,
  config: &AppConfig,
  args: SuggestArgs,
  out: &mut W,
) -> anyhow::Result<()>
where
  S: ClosetStore + OutfitStore,
  W: Write,
{
  let date = args.date.unwrap_or_else(|| Local::now().date_naive());
  let source = occasion_source(args.source, args.tags, date)?;
  let weather = match (args.weather.weather, args.weather.weather_desc) {
    (Some(bucket), _) => bucket,
    (None, Some(desc)) => WeatherBucket::from_description(&desc),
    (None, None) => config.default_weather,
  };

  let closet = store.list_garments(None).await.context("failed to read closet")?;
  let mut rng = match args.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };

  let suggestion = Suggester::new(config.sampling).suggest(&closet, &source, weather, &mut rng);
  render::suggestion(out, &suggestion)?;

  if args.save {
    let outfit = suggestion
      .into_new_outfit(date)
      .context("nothing to save; add items to the closet first")?;
    let saved = store.save_outfit(outfit).await.context("failed to save outfit")?;
    writeln!(out, "saved {} for {}", saved.id, saved.scheduled_date)?;
  }
  Ok(())
}

fn occasion_source(
  args: SourceArgs,
  tags: Vec<String>,
  date: NaiveDate,
) -> anyhow::Result<OccasionSource> {
  if let Some(occasion) = args.occasion {
    return Ok(OccasionSource::Preset { occasion, tags });
  }
  if let Some(text) = args.event {
    return Ok(OccasionSource::EventText(text));
  }
  if args.random {
    return Ok(OccasionSource::Random);
  }
  if let Some(path) = args.calendar {
    let raw = std::fs::read_to_string(&path)
      .with_context(|| format!("reading calendar file {}", path.display()))?;
    let events = parse_events(&raw).context("parsing calendar file")?;
    return Ok(OccasionSource::Calendar { events, date });
  }
  Ok(OccasionSource::preset(Occasion::Casual))
}

// ─── outfits ─────────────────────────────────────────────────────────────────

pub async fn outfits<S, W>(store: &S, command: OutfitsCommand, out: &mut W) -> anyhow::Result<()>
where
  S: OutfitStore,
  W: Write,
{
  match command {
    OutfitsCommand::List { occasion, from, to } => {
      let query = OutfitQuery { occasion, from, to };
      let outfits = store.list_outfits(&query).await.context("failed to list outfits")?;
      if outfits.is_empty() {
        writeln!(out, "no saved outfits")?;
      }
      for outfit in &outfits {
        writeln!(out, "{}", render::outfit_line(outfit))?;
      }
    }
    OutfitsCommand::Occasions => {
      for occasion in store.occasions_in_use().await? {
        writeln!(out, "{occasion}")?;
      }
    }
    OutfitsCommand::Show { id } => {
      let Some(outfit) = store.get_outfit(id).await? else {
        bail!("no saved outfit with id {id}");
      };
      render::outfit_detail(out, &outfit)?;
    }
    OutfitsCommand::Reschedule { id, date } => {
      let outfit = store
        .reschedule_outfit(id, date)
        .await
        .with_context(|| format!("failed to reschedule outfit {id}"))?;
      writeln!(out, "moved {} to {}", outfit.id, outfit.scheduled_date)?;
    }
    OutfitsCommand::Delete { id } => {
      store.delete_outfit(id).await.with_context(|| format!("failed to delete outfit {id}"))?;
      writeln!(out, "deleted {id}")?;
    }
  }
  Ok(())
}

// ─── classify ────────────────────────────────────────────────────────────────

pub fn classify<W: Write>(command: ClassifyCommand, out: &mut W) -> anyhow::Result<()> {
  match command {
    ClassifyCommand::Category { category, subcategory } => {
      let bucket = normalize_category(Some(&category), subcategory.as_deref());
      writeln!(out, "{bucket}")?;
    }
    ClassifyCommand::Event { text } => {
      writeln!(out, "{}", render::profile_line(&classify_event(Some(&text))))?;
    }
    ClassifyCommand::Label { label } => {
      writeln!(out, "{}", render::profile_line(&classify_label(&label)))?;
    }
  }
  Ok(())
}
