use std::collections::BTreeMap;

use crate::{io::report::CardLine, types::{CardRecord, Category}};

/// Running totals for one category
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryTotals {
    pub count: u32,
    pub total_mana_cost: f64,
}

impl CategoryTotals {
    pub fn average_mana_cost(&self) -> f64 {
        average(self.total_mana_cost, self.count)
    }
}

/// `total / count`, or 0.0 when there is nothing to average over
pub fn average(total: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / f64::from(count)
    }
}

/// Per-category and overall statistics of one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckComposition {
    categories: BTreeMap<Category, CategoryTotals>,
    pub total_cards: u32,
    pub total_mana_cost: f64,
}

impl DeckComposition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, category: Category) -> CategoryTotals {
        self.categories.get(&category).copied().unwrap_or_default()
    }

    pub fn land_count(&self) -> u32 {
        self.category(Category::Land).count
    }

    /// Mean cost over every card that is not a land
    pub fn average_mana_cost(&self) -> f64 {
        average(self.total_mana_cost, self.total_cards.saturating_sub(self.land_count()))
    }

    /// Fold one card into the totals and return the category it was credited to.
    ///
    /// Lands count toward their category but add nothing to its cost; the
    /// overall totals include every card.
    pub fn add(&mut self, record: &CardRecord) -> Option<Category> {
        let category = record.category();

        if let Some(category) = category {
            let totals = self.categories.entry(category).or_default();
            totals.count += 1;
            if category != Category::Land {
                totals.total_mana_cost += record.converted_mana_cost;
            }
        }

        self.total_cards += 1;
        self.total_mana_cost += record.converted_mana_cost;

        category
    }
}

/// Accumulates the cards of one build in processing order.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    composition: DeckComposition,
    card_lines: Vec<String>,
    land_lines: Vec<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, record: &CardRecord) -> Option<Category> {
        let category = self.composition.add(record);

        let line = CardLine(record).to_string();
        if record.is_land() {
            self.land_lines.push(line);
        } else {
            self.card_lines.push(line);
        }

        category
    }

    pub fn composition(&self) -> &DeckComposition {
        &self.composition
    }

    pub fn len(&self) -> usize {
        self.card_lines.len() + self.land_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop accumulating; the result is read-only
    pub fn finish(self) -> Aggregation {
        Aggregation {
            composition: self.composition,
            card_lines: self.card_lines,
            land_lines: self.land_lines,
        }
    }
}

impl Extend<CardRecord> for Aggregator {
    fn extend<I: IntoIterator<Item = CardRecord>>(&mut self, records: I) {
        for record in records {
            self.accumulate(&record);
        }
    }
}

/// Everything the renderer needs from a finished build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub composition: DeckComposition,
    /// Non-land card lines, first seen first
    pub card_lines: Vec<String>,
    /// Land card lines, first seen first
    pub land_lines: Vec<String>,
}

impl FromIterator<CardRecord> for Aggregation {
    fn from_iter<I: IntoIterator<Item = CardRecord>>(records: I) -> Self {
        let mut aggregator = Aggregator::new();
        aggregator.extend(records);
        aggregator.finish()
    }
}
