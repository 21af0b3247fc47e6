//! Fake collaborators and sample cards shared by unit tests.

use std::{collections::VecDeque, path::Path, sync::Mutex};

use image::{Rgb, RgbImage};
use crate::{
    algorithms::{CARD_HEIGHT, CARD_WIDTH},
    database::InMemoryDatabase,
    error::{CatalogError, Result},
    traits::{CorrectionSource, ImageNormalizer, TextRecognizer},
    types::{CardRecord, Correction, Unresolved},
};

fn colors(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|value| value.to_string()).collect())
}

pub fn grizzly_bears() -> CardRecord {
    CardRecord {
        name: "Grizzly Bears".to_string(),
        mana_cost: "{1}{G}".to_string(),
        converted_mana_cost: 2.0,
        type_line: "Creature — Bear".to_string(),
        colors: colors(&["G"]),
        color_identity: colors(&["G"]),
        power: Some("2".to_string()),
        toughness: Some("2".to_string()),
        loyalty: None,
    }
}

pub fn island() -> CardRecord {
    CardRecord {
        name: "Island".to_string(),
        mana_cost: String::new(),
        converted_mana_cost: 0.0,
        type_line: "Basic Land - Island".to_string(),
        colors: None,
        color_identity: None,
        power: None,
        toughness: None,
        loyalty: None,
    }
}

pub fn counterspell() -> CardRecord {
    CardRecord {
        name: "Counterspell".to_string(),
        mana_cost: "{U}{U}".to_string(),
        converted_mana_cost: 2.0,
        type_line: "Instant".to_string(),
        colors: colors(&["U"]),
        color_identity: colors(&["U"]),
        power: None,
        toughness: None,
        loyalty: None,
    }
}

pub fn solemn_simulacrum() -> CardRecord {
    CardRecord {
        name: "Solemn Simulacrum".to_string(),
        mana_cost: "{4}".to_string(),
        converted_mana_cost: 4.0,
        type_line: "Artifact Creature — Golem".to_string(),
        colors: None,
        color_identity: None,
        power: Some("2".to_string()),
        toughness: Some("2".to_string()),
        loyalty: None,
    }
}

pub fn jace_beleren() -> CardRecord {
    CardRecord {
        name: "Jace Beleren".to_string(),
        mana_cost: "{1}{U}{U}".to_string(),
        converted_mana_cost: 3.0,
        type_line: "Legendary Planeswalker — Jace".to_string(),
        colors: colors(&["U"]),
        color_identity: colors(&["U"]),
        power: None,
        toughness: None,
        loyalty: Some(3),
    }
}

pub fn sample_database() -> InMemoryDatabase {
    InMemoryDatabase::new(vec![
        grizzly_bears(),
        island(),
        counterspell(),
        solemn_simulacrum(),
        jace_beleren(),
    ])
}

/// Returns a blank card for any path except ones containing "unreadable"
pub struct BlankNormalizer;

impl ImageNormalizer for BlankNormalizer {
    fn normalize(&self, path: &Path) -> Result<RgbImage> {
        if path.to_string_lossy().contains("unreadable") {
            return Err(CatalogError::NoCardBoundary(path.to_path_buf()));
        }
        Ok(RgbImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, Rgb([255u8, 255, 255])))
    }
}

/// Hands out prepared OCR results in order
pub struct ScriptedRecognizer {
    texts: Mutex<VecDeque<String>>,
}

impl ScriptedRecognizer {
    pub fn new(texts: &[&str]) -> Self {
        Self {
            texts: Mutex::new(texts.iter().map(|text| text.to_string()).collect()),
        }
    }
}

impl TextRecognizer for ScriptedRecognizer {
    fn recognize_text(&self, image: &RgbImage) -> Result<String> {
        assert_eq!(image.dimensions(), (485, 50), "Should receive the title region");
        let mut texts = self.texts.lock().map_err(|_| CatalogError::Recognition("poisoned".to_string()))?;
        texts.pop_front().ok_or_else(|| CatalogError::Recognition("script exhausted".to_string()))
    }
}

/// Operator stand-in that answers from a queue and records each prompt
#[derive(Default)]
pub struct ScriptedCorrections {
    answers: VecDeque<Correction>,
    pub prompts: Vec<Unresolved>,
}

impl ScriptedCorrections {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|answer| Correction::from_input(answer)).collect(),
            prompts: Vec::new(),
        }
    }
}

impl CorrectionSource for ScriptedCorrections {
    fn request_correction(&mut self, pending: &Unresolved) -> Result<Correction> {
        self.prompts.push(pending.clone());
        Ok(self.answers.pop_front().unwrap_or(Correction::Cancel))
    }
}
