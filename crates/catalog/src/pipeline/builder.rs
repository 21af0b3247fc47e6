use crate::{
    algorithms::{CardBoundaryNormalizer, TesseractRecognizer},
    database::{MtgApiDatabase, DEFAULT_API_URL},
    error::Result,
    pipeline::RecognitionPipeline,
    traits::{CardDatabase, ImageNormalizer, TextRecognizer},
};

/// Builder for creating recognition pipelines with a fluent API
#[derive(Default)]
pub struct PipelineBuilder {
    normalizer: Option<Box<dyn ImageNormalizer>>,
    recognizer: Option<Box<dyn TextRecognizer>>,
    database: Option<Box<dyn CardDatabase>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image normalizer (replaces any existing one)
    pub fn set_normalizer<N>(mut self, normalizer: N) -> Self
    where
        N: ImageNormalizer + 'static,
    {
        self.normalizer = Some(Box::new(normalizer));
        self
    }

    /// Set the text recognizer (replaces any existing one)
    pub fn set_recognizer<R>(mut self, recognizer: R) -> Self
    where
        R: TextRecognizer + 'static,
    {
        self.recognizer = Some(Box::new(recognizer));
        self
    }

    /// Set the card database (replaces any existing one)
    pub fn set_database<D>(mut self, database: D) -> Self
    where
        D: CardDatabase + 'static,
    {
        self.database = Some(Box::new(database));
        self
    }

    /// Use Tesseract at the given location
    pub fn with_tesseract(self, executable: impl Into<std::path::PathBuf>) -> Self {
        self.set_recognizer(TesseractRecognizer::new(executable))
    }

    /// Build the pipeline, filling unset stages with the default
    /// normalizer, `tesseract` from `PATH` and the public MTG API.
    pub fn build(self) -> Result<RecognitionPipeline> {
        let normalizer = self.normalizer
            .unwrap_or_else(|| Box::new(CardBoundaryNormalizer::default()));

        let recognizer = self.recognizer
            .unwrap_or_else(|| Box::new(TesseractRecognizer::default()));

        let database = match self.database {
            Some(database) => database,
            None => Box::new(MtgApiDatabase::new(DEFAULT_API_URL)?),
        };

        Ok(RecognitionPipeline::new(normalizer, recognizer, database))
    }
}
