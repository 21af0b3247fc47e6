use std::path::Path;

use image::{imageops::{self, FilterType}, GrayImage, RgbImage};
use crate::{error::{CatalogError, Result}, traits::ImageNormalizer};

/// Width of a normalized card image in pixels
pub const CARD_WIDTH: u32 = 715;
/// Height of a normalized card image in pixels
pub const CARD_HEIGHT: u32 = 1000;

/// Locates a dark card against a lighter background and crops to it.
///
/// The photo is downscaled, blurred and thresholded; the bounding box of
/// every pixel that stays dark is taken as the card, cut out of the
/// downscaled color image and resized to `output_width` x `output_height`.
#[derive(Debug, Clone)]
pub struct CardBoundaryNormalizer {
    pub scale: f32,
    pub blur_sigma: f32,
    pub threshold: u8,
    pub output_width: u32,
    pub output_height: u32,
}

impl Default for CardBoundaryNormalizer {
    fn default() -> Self {
        Self {
            scale: 0.25,
            blur_sigma: 2.0,
            threshold: 100,
            output_width: CARD_WIDTH,
            output_height: CARD_HEIGHT,
        }
    }
}

impl CardBoundaryNormalizer {
    /// Normalize an already decoded photo. Returns `None` when no pixel
    /// survives thresholding as part of the card.
    pub fn normalize_image(&self, photo: &RgbImage) -> Option<RgbImage> {
        let width = ((photo.width() as f32 * self.scale).round() as u32).max(1);
        let height = ((photo.height() as f32 * self.scale).round() as u32).max(1);
        let small = imageops::resize(photo, width, height, FilterType::Triangle);

        let gray = imageops::grayscale(&small);
        let gray = if self.blur_sigma > 0.0 {
            imageproc::filter::gaussian_blur_f32(&gray, self.blur_sigma)
        } else {
            gray
        };
        let binary = imageproc::contrast::threshold(&gray, self.threshold);

        let (x, y, w, h) = dark_bounds(&binary)?;
        let card = imageops::crop_imm(&small, x, y, w, h).to_image();

        Some(imageops::resize(&card, self.output_width, self.output_height, FilterType::Triangle))
    }
}

impl ImageNormalizer for CardBoundaryNormalizer {
    fn normalize(&self, path: &Path) -> Result<RgbImage> {
        let photo = image::open(path)?.to_rgb8();
        self.normalize_image(&photo)
            .ok_or_else(|| CatalogError::NoCardBoundary(path.to_path_buf()))
    }
}

/// Bounding rectangle `(x, y, width, height)` of all black pixels
fn dark_bounds(binary: &GrayImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in binary.enumerate_pixels() {
        if pixel.0[0] != 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    bounds.map(|(min_x, min_y, max_x, max_y)| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}
