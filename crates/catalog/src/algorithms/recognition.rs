use std::{path::{Path, PathBuf}, process::Command};

use image::{ImageFormat, RgbImage};
use tracing::debug;
use crate::{error::{CatalogError, Result}, traits::TextRecognizer};

/// Runs the Tesseract command line tool on a temporary PNG.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    executable: PathBuf,
}

impl TesseractRecognizer {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into() }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize_text(&self, image: &RgbImage) -> Result<String> {
        let input = tempfile::Builder::new()
            .prefix("card-title-")
            .suffix(".png")
            .tempfile()?;
        image.save_with_format(input.path(), ImageFormat::Png)?;

        let output = Command::new(&self.executable)
            .arg(input.path())
            .arg("stdout")
            .output()
            .map_err(|e| CatalogError::Recognition(
                format!("failed to run {}: {}", self.executable.display(), e)
            ))?;

        if !output.status.success() {
            return Err(CatalogError::Recognition(format!(
                "{} exited with {}: {}",
                self.executable.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("Recognized text: {:?}", text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_missing_executable() {
        let recognizer = TesseractRecognizer::new("/nonexistent/tesseract");
        let image = RgbImage::from_pixel(8, 8, Rgb([255u8, 255, 255]));

        let err = recognizer.recognize_text(&image).expect_err("Should fail to spawn");
        assert!(matches!(err, CatalogError::Recognition(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_invokes_executable_with_stdout_target() {
        // `echo` stands in for tesseract and prints its own arguments
        let recognizer = TesseractRecognizer::new("echo");
        let image = RgbImage::from_pixel(8, 8, Rgb([255u8, 255, 255]));

        let text = recognizer.recognize_text(&image).expect("Should run echo");
        assert!(text.contains("card-title-"));
        assert!(text.trim_end().ends_with(".png stdout"));
    }
}
