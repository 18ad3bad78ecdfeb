//! Plain-text rendering for terminal output.

use std::io::{self, Write};

use perfit_core::{
  garment::GarmentItem, occasion::OccasionProfile, outfit::SavedOutfit, suggest::Suggestion,
};

/// One-line summary: `<id>  <Category> (<subcategory>)  [tags]`.
pub fn garment_line(item: &GarmentItem) -> String {
  let mut line = format!("{}  {}", item.id, item.category);
  if let Some(sub) = &item.subcategory {
    line.push_str(&format!(" ({sub})"));
  }
  if !item.occasion_tags.is_empty() {
    line.push_str(&format!("  [{}]", item.occasion_tags.join(", ")));
  }
  line
}

pub fn garment_detail(out: &mut impl Write, item: &GarmentItem) -> io::Result<()> {
  writeln!(out, "id:           {}", item.id)?;
  writeln!(out, "image:        {}", item.image_ref)?;
  writeln!(out, "category:     {} (entered as {:?})", item.category, item.raw_category)?;
  writeln!(out, "subcategory:  {}", item.subcategory.as_deref().unwrap_or("-"))?;
  writeln!(out, "occasions:    {}", list_or_dash(&item.occasion_tags))?;
  writeln!(out, "weather:      {}", list_or_dash(&item.weather_tags))?;
  writeln!(
    out,
    "formality:    {}",
    item.event_formality.map(|f| f.label()).unwrap_or("-")
  )?;
  writeln!(out, "added:        {}", item.created_at.format("%Y-%m-%d %H:%M"))
}

pub fn profile_line(profile: &OccasionProfile) -> String {
  format!("{}  [{}]", profile.occasion, profile.tags.join(", "))
}

pub fn suggestion(out: &mut impl Write, s: &Suggestion) -> io::Result<()> {
  writeln!(out, "occasion: {}", profile_line(&s.profile))?;
  writeln!(out, "weather:  {}", s.weather)?;
  if s.assembly.is_empty() {
    return writeln!(out, "no matching items in the closet");
  }
  for layer in s.assembly.layers() {
    writeln!(out, "  {}", garment_line(layer))?;
  }
  Ok(())
}

pub fn outfit_line(outfit: &SavedOutfit) -> String {
  let pieces: Vec<&str> = outfit.layers.iter().map(|l| l.category.label()).collect();
  format!(
    "{}  {}  {}  {}",
    outfit.id,
    outfit.scheduled_date,
    outfit.occasion,
    pieces.join(" + ")
  )
}

pub fn outfit_detail(out: &mut impl Write, outfit: &SavedOutfit) -> io::Result<()> {
  writeln!(out, "id:        {}", outfit.id)?;
  writeln!(out, "date:      {}", outfit.scheduled_date)?;
  writeln!(out, "occasion:  {}", outfit.occasion)?;
  writeln!(out, "tags:      {}", list_or_dash(&outfit.tags))?;
  writeln!(out, "saved:     {}", outfit.created_at.format("%Y-%m-%d %H:%M"))?;
  for layer in &outfit.layers {
    writeln!(out, "  {}", garment_line(layer))?;
  }
  Ok(())
}

fn list_or_dash(items: &[String]) -> String {
  if items.is_empty() { "-".to_owned() } else { items.join(", ") }
}
