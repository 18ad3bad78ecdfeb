//! Slot assembly — turns a closet snapshot, an occasion profile and a weather
//! bucket into one outfit.
//!
//! Each slot is filled by a biased random draw: candidates are scored by how
//! many bias tags they carry, and most of the time the pick comes from the
//! better-scoring part of the list. Repeated calls with the same inputs are
//! expected to return different outfits; pass a seeded RNG for repeatable
//! results.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
  category::Category,
  garment::GarmentItem,
  occasion::{OccasionFamily, OccasionProfile},
  weather::WeatherBucket,
};

// ─── Slots ───────────────────────────────────────────────────────────────────

/// A logical position in an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
  Outerwear,
  Top,
  Bottom,
  Dress,
  Footwear,
}

impl Slot {
  /// Canonical categories a slot accepts.
  pub fn categories(self) -> &'static [Category] {
    match self {
      Self::Outerwear => &[Category::Jacket, Category::Sweater],
      Self::Top => &[Category::Shirt],
      Self::Bottom => &[Category::Trousers, Category::Skirt],
      Self::Dress => &[Category::Dress],
      Self::Footwear => &[Category::Shoes, Category::Sandals, Category::Heels, Category::Loafers],
    }
  }

  pub fn accepts(self, category: Category) -> bool { self.categories().contains(&category) }
}

// ─── Sampling ────────────────────────────────────────────────────────────────

/// Tunables for the biased draw. Defaults: 70% of draws come from the top
/// half of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
  /// Chance of drawing from the preferred pool instead of all candidates.
  pub preferred_probability: f64,
  /// Share of the score-sorted candidates that forms the preferred pool.
  pub preferred_fraction:    f64,
}

impl Default for SamplingConfig {
  fn default() -> Self { Self { preferred_probability: 0.7, preferred_fraction: 0.5 } }
}

impl SamplingConfig {
  /// Size of the preferred pool for `n` candidates; at least one when `n > 0`.
  pub fn pool_size(&self, n: usize) -> usize {
    if n == 0 {
      return 0;
    }
    let fraction = unit_or(self.preferred_fraction, 0.5);
    ((n as f64 * fraction).ceil() as usize).clamp(1, n)
  }

  fn probability(&self) -> f64 { unit_or(self.preferred_probability, 0.7) }
}

/// Clamp to `[0, 1]`, substituting `fallback` for NaN.
fn unit_or(value: f64, fallback: f64) -> f64 {
  if value.is_nan() { fallback } else { value.clamp(0.0, 1.0) }
}

/// Number of bias tags found (as case-insensitive substrings) in any of the
/// item's tag fields.
///
/// Plain substring containment over a flattened field set, so unrelated
/// tags can collide (a bias tag of `"art"` hits `"party"`).
pub fn score(item: &GarmentItem, bias: &[String]) -> usize {
  let haystack = item.tag_haystack();
  bias
    .iter()
    .map(|t| t.trim().to_lowercase())
    .filter(|t| !t.is_empty())
    .filter(|t| haystack.iter().any(|h| h.contains(t.as_str())))
    .count()
}

/// Pick zero or one item for `slot`.
pub fn pick_slot<'a, R>(
  closet: &'a [GarmentItem],
  slot: Slot,
  bias: &[String],
  config: &SamplingConfig,
  rng: &mut R,
) -> Option<&'a GarmentItem>
where
  R: Rng + ?Sized,
{
  let candidates: Vec<&GarmentItem> =
    closet.iter().filter(|item| slot.accepts(item.category)).collect();
  if candidates.is_empty() {
    return None;
  }

  let mut ranked: Vec<(usize, &GarmentItem)> =
    candidates.iter().map(|item| (score(item, bias), *item)).collect();
  // Stable: equal scores keep closet order.
  ranked.sort_by(|a, b| b.0.cmp(&a.0));

  let pick = if rng.gen_bool(config.probability()) {
    let pool = config.pool_size(ranked.len());
    ranked[rng.gen_range(0..pool)].1
  } else {
    candidates[rng.gen_range(0..candidates.len())]
  };
  Some(pick)
}

// ─── Assembly ────────────────────────────────────────────────────────────────

/// What covers the torso and legs: separates, or one dress on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
  Separates {
    top:    Option<GarmentItem>,
    bottom: Option<GarmentItem>,
  },
  Dress(GarmentItem),
}

impl Default for Body {
  fn default() -> Self { Self::Separates { top: None, bottom: None } }
}

impl Body {
  fn dress_or_empty(dress: Option<GarmentItem>) -> Self {
    dress.map(Self::Dress).unwrap_or_default()
  }
}

/// An assembled outfit, one item per slot at most.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutfitAssembly {
  pub outerwear: Option<GarmentItem>,
  pub body:      Body,
  pub footwear:  Option<GarmentItem>,
}

impl OutfitAssembly {
  /// Items in wearing order: outerwear, top or dress, bottom, footwear.
  pub fn layers(&self) -> Vec<&GarmentItem> {
    let (first, second) = match &self.body {
      Body::Separates { top, bottom } => (top.as_ref(), bottom.as_ref()),
      Body::Dress(dress) => (Some(dress), None),
    };
    [self.outerwear.as_ref(), first, second, self.footwear.as_ref()]
      .into_iter()
      .flatten()
      .collect()
  }

  pub fn into_layers(self) -> Vec<GarmentItem> {
    let (first, second) = match self.body {
      Body::Separates { top, bottom } => (top, bottom),
      Body::Dress(dress) => (Some(dress), None),
    };
    [self.outerwear, first, second, self.footwear].into_iter().flatten().collect()
  }

  pub fn len(&self) -> usize { self.layers().len() }

  /// No item could be found for any slot.
  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn dress(&self) -> Option<&GarmentItem> {
    match &self.body {
      Body::Dress(dress) => Some(dress),
      Body::Separates { .. } => None,
    }
  }
}

/// Per-call state for filling slots from one closet snapshot.
struct Picker<'a, R: ?Sized> {
  closet: &'a [GarmentItem],
  bias:   Vec<String>,
  config: &'a SamplingConfig,
  rng:    &'a mut R,
}

impl<R: Rng + ?Sized> Picker<'_, R> {
  fn pick(&mut self, slot: Slot) -> Option<GarmentItem> {
    pick_slot(self.closet, slot, &self.bias, self.config, &mut *self.rng).cloned()
  }

  fn coin(&mut self) -> bool { self.rng.gen_bool(0.5) }

  fn separates(&mut self) -> Body {
    Body::Separates { top: self.pick(Slot::Top), bottom: self.pick(Slot::Bottom) }
  }

  /// Top plus bottom; with no bottom available a dress takes over the whole
  /// body and the top is dropped.
  fn top_with_bottom_or_dress(&mut self) -> Body {
    let top = self.pick(Slot::Top);
    if let Some(bottom) = self.pick(Slot::Bottom) {
      return Body::Separates { top, bottom: Some(bottom) };
    }
    match self.pick(Slot::Dress) {
      Some(dress) => Body::Dress(dress),
      None => Body::Separates { top, bottom: None },
    }
  }

  fn dress_or_separates(&mut self) -> Body {
    match self.pick(Slot::Dress) {
      Some(dress) => Body::Dress(dress),
      None => self.separates(),
    }
  }
}

/// Assemble an outfit for `profile` under `weather`.
///
/// Never fails: slots with no candidates are left empty, and an empty closet
/// gives an empty assembly.
pub fn assemble<R>(
  closet: &[GarmentItem],
  profile: &OccasionProfile,
  weather: WeatherBucket,
  config: &SamplingConfig,
  rng: &mut R,
) -> OutfitAssembly
where
  R: Rng + ?Sized,
{
  let mut p = Picker {
    closet,
    bias: profile.tags.iter().map(|t| t.to_lowercase()).collect(),
    config,
    rng,
  };

  let (outerwear, body) = match profile.occasion.family() {
    OccasionFamily::Formal => {
      let body = p.top_with_bottom_or_dress();
      let layer = weather.wants_layer() || profile.has_tag("modest");
      let outerwear = if layer { p.pick(Slot::Outerwear) } else { None };
      (outerwear, body)
    }
    OccasionFamily::Academic => (None, p.separates()),
    OccasionFamily::Ceremonial => (None, p.dress_or_separates()),
    OccasionFamily::Social => {
      if p.coin() {
        (None, Body::dress_or_empty(p.pick(Slot::Dress)))
      } else {
        (None, p.separates())
      }
    }
    OccasionFamily::Casual => match weather {
      WeatherBucket::Rainy | WeatherBucket::Harmattan => {
        let outerwear = p.pick(Slot::Outerwear);
        (outerwear, p.top_with_bottom_or_dress())
      }
      WeatherBucket::Cool => {
        if p.coin() {
          let outerwear = p.pick(Slot::Outerwear);
          (outerwear, Body::dress_or_empty(p.pick(Slot::Dress)))
        } else {
          (None, p.separates())
        }
      }
      WeatherBucket::Hot => {
        if p.coin() {
          (None, Body::dress_or_empty(p.pick(Slot::Dress)))
        } else {
          (None, p.separates())
        }
      }
    },
  };

  let footwear = p.pick(Slot::Footwear);
  let assembly = OutfitAssembly { outerwear, body, footwear };

  tracing::debug!(
    occasion = %profile.occasion,
    %weather,
    layers = assembly.len(),
    "assembled outfit"
  );
  assembly
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use rand::{SeedableRng, rngs::StdRng};
  use uuid::Uuid;

  use super::*;
  use crate::{
    garment::NewGarment,
    occasion::{Occasion, OccasionProfile},
  };

  fn item(category: &str) -> GarmentItem {
    NewGarment::new(format!("img://{category}"), category).into_item(Uuid::new_v4(), Utc::now())
  }

  fn tagged(category: &str, occasion_tags: &[&str]) -> GarmentItem {
    NewGarment::new(format!("img://{category}"), category)
      .with_occasion_tags(occasion_tags.iter().map(|t| (*t).to_owned()).collect())
      .into_item(Uuid::new_v4(), Utc::now())
  }

  fn rng(seed: u64) -> StdRng { StdRng::seed_from_u64(seed) }

  fn profile(occasion: Occasion) -> OccasionProfile { OccasionProfile::for_occasion(occasion) }

  fn full_closet() -> Vec<GarmentItem> {
    vec![
      item("Jacket"),
      item("Sweater"),
      item("Shirt"),
      item("Shirt"),
      item("Trousers"),
      item("Skirt"),
      item("Dress"),
      item("Dress"),
      item("Shoes"),
      item("Heels"),
      item("Native"),
    ]
  }

  fn assert_well_formed(a: &OutfitAssembly) {
    if let Some(o) = &a.outerwear {
      assert!(Slot::Outerwear.accepts(o.category));
    }
    match &a.body {
      Body::Dress(d) => assert!(Slot::Dress.accepts(d.category)),
      Body::Separates { top, bottom } => {
        assert!(top.iter().all(|t| Slot::Top.accepts(t.category)));
        assert!(bottom.iter().all(|b| Slot::Bottom.accepts(b.category)));
      }
    }
    if let Some(f) = &a.footwear {
      assert!(Slot::Footwear.accepts(f.category));
    }

    let layers = a.layers();
    assert!(layers.len() <= 4);
    let dresses = layers.iter().filter(|l| l.category == Category::Dress).count();
    let separates = layers
      .iter()
      .filter(|l| Slot::Top.accepts(l.category) || Slot::Bottom.accepts(l.category))
      .count();
    assert!(dresses == 0 || separates == 0, "dress mixed with separates");
  }

  // ── Scoring ───────────────────────────────────────────────────────────────

  #[test]
  fn score_counts_bias_tags_as_substrings() {
    let shirt = NewGarment::new("img://s", "Shirt")
      .with_subcategory("Button-down")
      .with_occasion_tags(vec!["Office".into(), "Interview".into()])
      .into_item(Uuid::new_v4(), Utc::now());

    let bias = vec!["office".to_owned(), "formal".to_owned(), "button".to_owned()];
    assert_eq!(score(&shirt, &bias), 2);
    assert_eq!(score(&shirt, &[]), 0);
    assert_eq!(score(&shirt, &["".to_owned()]), 0);
  }

  #[test]
  fn pool_size_is_at_least_one() {
    let config = SamplingConfig::default();
    assert_eq!(config.pool_size(0), 0);
    assert_eq!(config.pool_size(1), 1);
    assert_eq!(config.pool_size(3), 2);
    assert_eq!(config.pool_size(4), 2);

    let tiny = SamplingConfig { preferred_fraction: 0.0, ..Default::default() };
    assert_eq!(tiny.pool_size(10), 1);
  }

  #[test]
  fn out_of_range_sampling_values_are_clamped() {
    let wild = SamplingConfig { preferred_probability: 7.0, preferred_fraction: f64::NAN };
    assert_eq!(wild.probability(), 1.0);
    assert_eq!(wild.pool_size(4), 2);
  }

  // ── Slot picking ──────────────────────────────────────────────────────────

  #[test]
  fn missing_slot_resolves_to_none() {
    let closet = vec![item("Shoes")];
    let config = SamplingConfig::default();
    assert!(pick_slot(&closet, Slot::Top, &[], &config, &mut rng(1)).is_none());
    assert!(pick_slot(&[], Slot::Footwear, &[], &config, &mut rng(1)).is_none());
  }

  #[test]
  fn preferred_pool_draw_takes_best_scored_item() {
    let closet = vec![item("Shirt"), tagged("Shirt", &["Office"]), item("Shirt"), item("Shirt")];
    let bias = vec!["office".to_owned()];
    let always_pool = SamplingConfig { preferred_probability: 1.0, preferred_fraction: 0.25 };

    for seed in 0..50 {
      let pick = pick_slot(&closet, Slot::Top, &bias, &always_pool, &mut rng(seed)).unwrap();
      assert_eq!(pick.id, closet[1].id);
    }
  }

  #[test]
  fn full_set_draw_reaches_unscored_items() {
    let closet = vec![tagged("Shirt", &["Office"]), item("Shirt")];
    let bias = vec!["office".to_owned()];
    let never_pool = SamplingConfig { preferred_probability: 0.0, preferred_fraction: 0.5 };

    let picked_plain = (0..200).any(|seed| {
      pick_slot(&closet, Slot::Top, &bias, &never_pool, &mut rng(seed)).unwrap().id
        == closet[1].id
    });
    assert!(picked_plain);
  }

  // ── Composition ───────────────────────────────────────────────────────────

  #[test]
  fn empty_closet_gives_empty_assembly() {
    let config = SamplingConfig::default();
    for occasion in Occasion::PRESETS {
      for weather in WeatherBucket::ALL {
        let a = assemble(&[], &profile(occasion), weather, &config, &mut rng(3));
        assert!(a.is_empty());
      }
    }
  }

  #[test]
  fn class_with_only_jacket_and_shoes_fills_footwear_only() {
    let closet = vec![item("Jacket"), item("Shoes")];
    let a = assemble(
      &closet,
      &profile(Occasion::Class),
      WeatherBucket::Rainy,
      &SamplingConfig::default(),
      &mut rng(5),
    );
    assert_eq!(a.body, Body::default());
    assert!(a.outerwear.is_none());
    assert_eq!(a.footwear.as_ref().map(|f| f.category), Some(Category::Shoes));
    assert_eq!(a.len(), 1);
  }

  #[test]
  fn church_prefers_dress_alone() {
    let dress = item("Dress");
    let shoes = item("Shoes");
    let closet = vec![item("Shirt"), dress.clone(), item("Trousers"), shoes.clone()];

    for seed in 0..30 {
      let a = assemble(
        &closet,
        &profile(Occasion::ChurchMosque),
        WeatherBucket::Hot,
        &SamplingConfig::default(),
        &mut rng(seed),
      );
      let ids: Vec<Uuid> = a.layers().iter().map(|l| l.id).collect();
      assert_eq!(ids, [dress.id, shoes.id]);
    }
  }

  #[test]
  fn ceremonial_falls_back_to_separates() {
    let closet = vec![item("Shirt"), item("Skirt"), item("Sandals")];
    let a = assemble(
      &closet,
      &profile(Occasion::Wedding),
      WeatherBucket::Hot,
      &SamplingConfig::default(),
      &mut rng(9),
    );
    let cats: Vec<Category> = a.layers().iter().map(|l| l.category).collect();
    assert_eq!(cats, [Category::Shirt, Category::Skirt, Category::Sandals]);
  }

  #[test]
  fn formal_adds_layer_only_when_cool_rainy_or_modest() {
    let closet = full_closet();
    let config = SamplingConfig::default();

    let office = profile(Occasion::Office);
    let interview = profile(Occasion::Interview);

    for seed in 0..20 {
      let hot = assemble(&closet, &office, WeatherBucket::Hot, &config, &mut rng(seed));
      assert!(hot.outerwear.is_none());

      let harmattan = assemble(&closet, &office, WeatherBucket::Harmattan, &config, &mut rng(seed));
      assert!(harmattan.outerwear.is_none());

      let rainy = assemble(&closet, &interview, WeatherBucket::Rainy, &config, &mut rng(seed));
      assert!(rainy.outerwear.is_some());

      let modest = OccasionProfile { occasion: Occasion::Conference, tags: vec!["Modest".into()] };
      let layered = assemble(&closet, &modest, WeatherBucket::Hot, &config, &mut rng(seed));
      assert!(layered.outerwear.is_some());
    }
  }

  #[test]
  fn formal_uses_dress_when_no_bottom_exists() {
    let closet = vec![item("Shirt"), item("Dress"), item("Loafers")];
    let a = assemble(
      &closet,
      &profile(Occasion::Presentation),
      WeatherBucket::Hot,
      &SamplingConfig::default(),
      &mut rng(11),
    );
    let cats: Vec<Category> = a.layers().iter().map(|l| l.category).collect();
    assert_eq!(cats, [Category::Dress, Category::Loafers]);
  }

  #[test]
  fn academic_never_uses_dress_or_outerwear() {
    let closet = full_closet();
    for seed in 0..30 {
      let a = assemble(
        &closet,
        &profile(Occasion::ExamTest),
        WeatherBucket::Cool,
        &SamplingConfig::default(),
        &mut rng(seed),
      );
      assert!(a.outerwear.is_none());
      assert!(a.dress().is_none());
      assert_eq!(a.len(), 3);
    }
  }

  #[test]
  fn social_alternates_between_dress_and_separates() {
    let closet = full_closet();
    let shapes: Vec<bool> = (0..100)
      .map(|seed| {
        assemble(
          &closet,
          &profile(Occasion::Date),
          WeatherBucket::Hot,
          &SamplingConfig::default(),
          &mut rng(seed),
        )
        .dress()
        .is_some()
      })
      .collect();
    assert!(shapes.iter().any(|d| *d));
    assert!(shapes.iter().any(|d| !*d));
  }

  #[test]
  fn casual_rainy_and_harmattan_layer_up() {
    let closet = full_closet();
    for weather in [WeatherBucket::Rainy, WeatherBucket::Harmattan] {
      let a = assemble(
        &closet,
        &OccasionProfile::casual(),
        weather,
        &SamplingConfig::default(),
        &mut rng(21),
      );
      let cats: Vec<Category> = a.layers().iter().map(|l| l.category).collect();
      assert_eq!(cats.len(), 4);
      assert!(Slot::Outerwear.accepts(cats[0]));
      assert_eq!(cats[1], Category::Shirt);
      assert!(Slot::Bottom.accepts(cats[2]));
      assert!(Slot::Footwear.accepts(cats[3]));
    }
  }

  #[test]
  fn casual_cool_layers_only_over_a_dress() {
    let closet = full_closet();
    for seed in 0..60 {
      let a = assemble(
        &closet,
        &OccasionProfile::casual(),
        WeatherBucket::Cool,
        &SamplingConfig::default(),
        &mut rng(seed),
      );
      assert_eq!(a.outerwear.is_some(), a.dress().is_some());
    }
  }

  #[test]
  fn casual_hot_never_layers() {
    let closet = full_closet();
    for seed in 0..60 {
      let a = assemble(
        &closet,
        &OccasionProfile::casual(),
        WeatherBucket::Hot,
        &SamplingConfig::default(),
        &mut rng(seed),
      );
      assert!(a.outerwear.is_none());
      assert!(a.footwear.is_some());
    }
  }

  #[test]
  fn assemblies_are_always_well_formed() {
    let closets = [
      full_closet(),
      vec![item("Dress"), item("Shirt")],
      vec![item("Native"), item("Other")],
    ];
    let config = SamplingConfig::default();

    for closet in &closets {
      for occasion in Occasion::PRESETS {
        for weather in WeatherBucket::ALL {
          for seed in 0..5 {
            let a = assemble(closet, &profile(occasion), weather, &config, &mut rng(seed));
            assert_well_formed(&a);
          }
        }
      }
    }
  }

  #[test]
  fn repeated_suggestions_vary() {
    let closet = full_closet();
    let config = SamplingConfig::default();
    let hangout = profile(Occasion::Hangout);
    let first = assemble(&closet, &hangout, WeatherBucket::Hot, &config, &mut rng(0));
    let varied = (1..50).any(|seed| {
      assemble(&closet, &hangout, WeatherBucket::Hot, &config, &mut rng(seed)) != first
    });
    assert!(varied);
  }

  #[test]
  fn layers_follow_wearing_order() {
    let a = OutfitAssembly {
      outerwear: Some(item("Jacket")),
      body:      Body::Separates { top: Some(item("Shirt")), bottom: Some(item("Trousers")) },
      footwear:  Some(item("Shoes")),
    };
    let cats: Vec<Category> = a.layers().iter().map(|l| l.category).collect();
    assert_eq!(cats, [Category::Jacket, Category::Shirt, Category::Trousers, Category::Shoes]);
    assert_eq!(a.clone().into_layers().len(), 4);
  }
}
