use std::path::Path;

use image::RgbImage;
use crate::{error::Result, types::{CardRecord, Correction, Unresolved}};

/// Trait for turning a photograph into a flat, fixed-size card image
pub trait ImageNormalizer: Send + Sync {
    /// Load the image at `path` and normalize it. Failure is fatal for that image.
    fn normalize(&self, path: &Path) -> Result<RgbImage>;
}

/// Trait for optical character recognition engines
pub trait TextRecognizer: Send + Sync {
    /// Read the text printed in `image`
    fn recognize_text(&self, image: &RgbImage) -> Result<String>;
}

/// Trait for card database lookups
pub trait CardDatabase: Send + Sync {
    /// Return every record whose name matches `name`; may be empty
    fn lookup_card(&self, name: &str) -> Result<Vec<CardRecord>>;
}

impl<D: CardDatabase + ?Sized> CardDatabase for Box<D> {
    fn lookup_card(&self, name: &str) -> Result<Vec<CardRecord>> {
        (**self).lookup_card(name)
    }
}

/// Supplier of corrected names during recovery mode
pub trait CorrectionSource {
    /// Ask for a replacement name for an unresolved card
    fn request_correction(&mut self, pending: &Unresolved) -> Result<Correction>;
}
