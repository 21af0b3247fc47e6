use std::fmt::{self, Display, Formatter};

use crate::{aggregate::Aggregation, types::{CardRecord, Category}};

const RULE: &str = "=============================";

/// What kind of report a build produces, with its banner fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportHeader {
    Deck {
        name: String,
        summary: String,
        format: String,
    },
    Collection {
        name: String,
        summary: String,
    },
}

impl ReportHeader {
    pub fn is_deck(&self) -> bool {
        matches!(self, Self::Deck { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Deck { name, .. } | Self::Collection { name, .. } => name,
        }
    }

    /// "Deck" or "Collection"
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deck { .. } => "Deck",
            Self::Collection { .. } => "Collection",
        }
    }
}

/// The information banner at the top of a report
impl Display for ReportHeader {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "{} Information", self.kind())?;
        writeln!(f, "{RULE}")?;
        match self {
            Self::Deck { name, summary, format } => {
                writeln!(f, "Deck Name: {name}")?;
                writeln!(f, "Summary: {summary}")?;
                writeln!(f, "Format: {format}")?;
            }
            Self::Collection { name, summary } => {
                writeln!(f, "Collection Name: {name}")?;
                writeln!(f, "Summary: {summary}")?;
            }
        }
        writeln!(f)
    }
}

/// Number in shortest round-trip form, always with a fractional part
struct Number(f64);

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// `U/B`, or `None` when absent or empty
struct ColorList<'a>(&'a Option<Vec<String>>);

impl Display for ColorList<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(colors) if !colors.is_empty() => f.write_str(&colors.join("/")),
            _ => f.write_str("None"),
        }
    }
}

struct OrNone<'a, T>(&'a Option<T>);

impl<T: Display> Display for OrNone<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("None"),
        }
    }
}

/// One report line describing a card
pub struct CardLine<'a>(pub &'a CardRecord);

impl Display for CardLine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let card = self.0;
        write!(f, "Card Name: \"{}\", Type: {}", card.name, card.type_line)?;

        if card.is_land() {
            return write!(f, ", Color Identity(s): {}", ColorList(&card.color_identity));
        }

        write!(
            f,
            ", Mana Cost: {}, Converted Mana Cost: {}, Color(s): {}, Color Identity(s): {}",
            card.mana_cost,
            Number(card.converted_mana_cost),
            ColorList(&card.colors),
            ColorList(&card.color_identity)
        )?;
        if card.is_creature() {
            write!(f, ", Power: {} Toughness: {}", OrNone(&card.power), OrNone(&card.toughness))?;
        }
        if card.is_planeswalker() {
            write!(f, ", Loyalty: {}", OrNone(&card.loyalty))?;
        }
        Ok(())
    }
}

/// Card listing, followed by statistics for decks
pub struct ReportBody<'a> {
    pub header: &'a ReportHeader,
    pub aggregation: &'a Aggregation,
}

impl Display for ReportBody<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "Cards")?;
        writeln!(f, "{RULE}")?;
        for line in self.aggregation.card_lines.iter().chain(&self.aggregation.land_lines) {
            writeln!(f, "{line}")?;
        }

        if !self.header.is_deck() {
            return Ok(());
        }

        let composition = &self.aggregation.composition;
        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Deck Statistics ")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Total Cards: {}", composition.total_cards)?;
        writeln!(f, "Total Mana Cost: {}", Number(composition.total_mana_cost))?;
        writeln!(f, "Average Mana Cost: {}", Number(composition.average_mana_cost()))?;

        for category in [
            Category::Creature,
            Category::Enchantment,
            Category::Instant,
            Category::Sorcery,
            Category::Artifact,
            Category::Planeswalker,
        ] {
            let totals = composition.category(category);
            // Existing reports label the instant average "Count"
            let average_label = if category == Category::Instant { "Count" } else { "Cost" };
            writeln!(f, "Total {category} Count: {}", totals.count)?;
            writeln!(f, "Average {category} {average_label}: {}", Number(totals.average_mana_cost()))?;
        }

        writeln!(f, "Total Lands: {}", composition.land_count())
    }
}

/// Render a complete report
pub fn render(header: &ReportHeader, aggregation: &Aggregation) -> String {
    format!("{}{}", header, ReportBody { header, aggregation })
}
