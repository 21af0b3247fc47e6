use tracing::debug;
use crate::{error::Result, traits::CardDatabase, types::CardRecord};

/// Maps a candidate name to one canonical card record.
#[derive(Debug, Clone)]
pub struct CardResolver<D> {
    database: D,
}

impl<D: CardDatabase> CardResolver<D> {
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &D {
        &self.database
    }

    /// Look up `candidate` and keep the first printing whose name matches it
    /// exactly, including case and punctuation.
    ///
    /// `Ok(None)` means the name is unknown, which is expected for imperfect
    /// OCR output. Errors come only from the database itself.
    pub fn resolve(&self, candidate: &str) -> Result<Option<CardRecord>> {
        if candidate.is_empty() {
            return Ok(None);
        }

        let records = self.database.lookup_card(candidate)?;
        debug!("{} records returned for {:?}", records.len(), candidate);

        Ok(records.into_iter().find(|record| record.name == candidate))
    }
}
