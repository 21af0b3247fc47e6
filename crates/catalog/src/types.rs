use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Token an operator types to abandon the current build.
pub const CANCEL_TOKEN: &str = "quit";

/// Gameplay-relevant attributes of a card as returned by the card database.
///
/// Reprints share all of these fields, so any printing whose name matches
/// exactly is interchangeable with any other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub name: String,
    #[serde(default)]
    pub mana_cost: String,
    #[serde(rename = "cmc", default)]
    pub converted_mana_cost: f64,
    #[serde(rename = "type")]
    pub type_line: String,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub color_identity: Option<Vec<String>>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loyalty")]
    pub loyalty: Option<u32>,
}

impl CardRecord {
    /// Statistics bucket for this card, if any.
    pub fn category(&self) -> Option<Category> {
        Category::classify(&self.type_line)
    }

    /// Lands are listed after every other card and render without costs.
    pub fn is_land(&self) -> bool {
        self.type_line.contains("Land")
    }

    pub fn is_creature(&self) -> bool {
        self.type_line.contains("Creature")
    }

    pub fn is_planeswalker(&self) -> bool {
        self.type_line.contains("Planeswalker")
    }
}

// The database reports loyalty as text ("3") for most printings and as a
// number for some; "X" and similar have no numeric value.
fn deserialize_loyalty<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loyalty {
        Number(u32),
        Text(String),
    }

    Ok(match Option::<Loyalty>::deserialize(deserializer)? {
        Some(Loyalty::Number(value)) => Some(value),
        Some(Loyalty::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

/// Statistics bucket. Variant order is the classification precedence.
#[derive(
    Debug, Clone, Copy,
    Display, EnumIter, IntoStaticStr,
    PartialEq, Eq, PartialOrd, Ord, Hash
)]
pub enum Category {
    Creature,
    Enchantment,
    Artifact,
    Planeswalker,
    Instant,
    Sorcery,
    Land,
}

impl Category {
    /// Classify a type line into exactly one category.
    ///
    /// Categories are tested in declaration order and the first whose name
    /// occurs in the type line wins, so "Artifact Creature" is a Creature and
    /// "Artifact Land" is an Artifact. Returns `None` for type lines that name
    /// no category at all.
    pub fn classify(type_line: &str) -> Option<Self> {
        Self::iter().find(|category| type_line.contains(<&'static str>::from(*category)))
    }
}

/// A recognition that could not be matched to a database record.
#[derive(Debug, Clone, PartialEq)]
pub struct Unresolved {
    pub image_path: PathBuf,
    /// Text as read from the card's title region, before sanitizing.
    pub raw_text: String,
    /// Name most recently looked up without success.
    pub attempted: String,
}

/// Outcome of one recognition step.
#[derive(Debug, Clone, PartialEq)]
pub enum Recognition {
    Resolved(CardRecord),
    Unresolved(Unresolved),
}

/// Operator response to an [`Unresolved`] recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    Name(String),
    Cancel,
}

impl Correction {
    /// Interpret one line of operator input.
    pub fn from_input(input: &str) -> Self {
        let input = input.trim_end_matches(['\r', '\n']);
        if input == CANCEL_TOKEN {
            Self::Cancel
        } else {
            Self::Name(input.to_string())
        }
    }
}
