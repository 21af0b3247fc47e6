pub mod builder;

use std::path::Path;

use image::{imageops, RgbImage};
use tracing::{info, warn};
use crate::{
    error::Result,
    resolver::CardResolver,
    traits::{CardDatabase, CorrectionSource, ImageNormalizer, TextRecognizer},
    types::{CardRecord, Correction, Recognition, Unresolved},
};

/// Rectangle of a normalized card image, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn crop(&self, image: &RgbImage) -> RgbImage {
        imageops::crop_imm(image, self.x, self.y, self.width, self.height).to_image()
    }
}

/// Where the card name is printed on a 715x1000 normalized card
pub const TITLE_REGION: Region = Region { x: 65, y: 50, width: 485, height: 50 };

/// Keep only characters that can appear in a card name, then trim.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | ',' | '\''))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Final result of recognizing one image with operator recovery
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(CardRecord),
    /// The operator abandoned the build
    Cancelled,
}

/// Image path in, card record out: normalize, read the title, resolve.
pub struct RecognitionPipeline {
    normalizer: Box<dyn ImageNormalizer>,
    recognizer: Box<dyn TextRecognizer>,
    resolver: CardResolver<Box<dyn CardDatabase>>,
}

impl RecognitionPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn new(
        normalizer: Box<dyn ImageNormalizer>,
        recognizer: Box<dyn TextRecognizer>,
        database: Box<dyn CardDatabase>,
    ) -> Self {
        Self {
            normalizer,
            recognizer,
            resolver: CardResolver::new(database),
        }
    }

    /// Raw OCR text of the card's title region
    pub fn read_title(&self, image_path: &Path) -> Result<String> {
        let card = self.normalizer.normalize(image_path)?;
        let title = TITLE_REGION.crop(&card);
        self.recognizer.recognize_text(&title)
    }

    /// Run one image through the pipeline without operator involvement.
    ///
    /// An unknown name comes back as [`Recognition::Unresolved`]; pass it to
    /// [`retry`](Self::retry) together with a corrected name to resume.
    pub fn recognize(&self, image_path: &Path) -> Result<Recognition> {
        let raw_text = self.read_title(image_path)?;
        let candidate = sanitize_name(&raw_text);
        info!("Read {:?} from {}", candidate, image_path.display());

        let pending = Unresolved {
            image_path: image_path.to_path_buf(),
            raw_text,
            attempted: String::new(),
        };
        self.retry(pending, &candidate)
    }

    /// Resume an unresolved recognition with a name supplied from outside.
    pub fn retry(&self, pending: Unresolved, name: &str) -> Result<Recognition> {
        Ok(match self.resolver.resolve(name)? {
            Some(record) => Recognition::Resolved(record),
            None => Recognition::Unresolved(Unresolved {
                attempted: name.to_string(),
                ..pending
            }),
        })
    }

    /// Recognize an image, asking `corrections` for a new name each time
    /// resolution fails. There is no retry limit; only a resolved card or a
    /// cancellation ends the loop.
    pub fn recognize_with<C>(&self, image_path: &Path, corrections: &mut C) -> Result<Resolution>
    where
        C: CorrectionSource + ?Sized,
    {
        let mut recognition = self.recognize(image_path)?;

        loop {
            let pending = match recognition {
                Recognition::Resolved(record) => return Ok(Resolution::Resolved(record)),
                Recognition::Unresolved(pending) => pending,
            };

            warn!(
                "No card named {:?} (image {}, read {:?})",
                pending.attempted,
                pending.image_path.display(),
                pending.raw_text
            );

            match corrections.request_correction(&pending)? {
                Correction::Cancel => return Ok(Resolution::Cancelled),
                Correction::Name(name) => recognition = self.retry(pending, &name)?,
            }
        }
    }
}
