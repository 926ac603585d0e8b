//! ColorTable: category → color mapping built once per dataset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::dataset::Dataset;

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

/// Ten-color categorical palette (matplotlib / d3 "category10").
pub const DEFAULT_PALETTE: [Rgba; 10] = [
    Rgba::rgb(31, 119, 180),
    Rgba::rgb(255, 127, 14),
    Rgba::rgb(44, 160, 44),
    Rgba::rgb(214, 39, 40),
    Rgba::rgb(148, 103, 189),
    Rgba::rgb(140, 86, 75),
    Rgba::rgb(227, 119, 194),
    Rgba::rgb(127, 127, 127),
    Rgba::rgb(188, 189, 34),
    Rgba::rgb(23, 190, 207),
];

/// Mapping from category to exactly one color.
///
/// Entries are kept in first-seen order so the legend lists categories in the
/// same order the palette was assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorTable {
    entries: Vec<(String, Rgba)>,
}

impl ColorTable {
    /// Assign palette colors to `categories` in order, cycling when the palette
    /// is shorter than the category list. An empty palette falls back to
    /// [`DEFAULT_PALETTE`].
    pub fn from_categories<S: AsRef<str>>(categories: &[S], palette: &[Rgba]) -> Self {
        Self::with_overrides(categories, palette, &HashMap::new())
    }

    /// Like [`from_categories`](Self::from_categories), but categories present in
    /// `overrides` take that color instead of the next palette slot.
    pub fn with_overrides<S: AsRef<str>>(
        categories: &[S],
        palette: &[Rgba],
        overrides: &HashMap<String, Rgba>,
    ) -> Self {
        let palette: &[Rgba] = if palette.is_empty() {
            &DEFAULT_PALETTE
        } else {
            palette
        };
        let mut entries: Vec<(String, Rgba)> = Vec::with_capacity(categories.len());
        let mut next = 0usize;
        for cat in categories {
            let cat = cat.as_ref();
            if entries.iter().any(|(c, _)| c == cat) {
                continue;
            }
            let color = match overrides.get(cat) {
                Some(c) => *c,
                None => {
                    let c = palette[next % palette.len()];
                    next += 1;
                    c
                }
            };
            entries.push((cat.to_string(), color));
        }
        Self { entries }
    }

    /// Build the table from the categories observed in `dataset`.
    pub fn for_dataset(
        dataset: &Dataset,
        palette: &[Rgba],
        overrides: &HashMap<String, Rgba>,
    ) -> Self {
        Self::with_overrides(dataset.categories(), palette, overrides)
    }

    pub fn color_of(&self, category: &str) -> Option<Rgba> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, color)| *color)
    }

    pub fn entries(&self) -> &[(String, Rgba)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-point color buffer, parallel to the dataset order.
    ///
    /// A category missing from the table (only possible when the table was
    /// built for a different dataset) falls back to opaque gray.
    pub fn color_buffer(&self, dataset: &Dataset) -> Vec<Rgba> {
        let lookup: HashMap<&str, Rgba> = self
            .entries
            .iter()
            .map(|(c, color)| (c.as_str(), *color))
            .collect();
        dataset
            .points()
            .iter()
            .map(|p| {
                lookup
                    .get(p.category.as_str())
                    .copied()
                    .unwrap_or(Rgba::rgb(127, 127, 127))
            })
            .collect()
    }
}
