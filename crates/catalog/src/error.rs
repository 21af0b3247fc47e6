use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("No card boundary detected in {}", .0.display())]
    NoCardBoundary(PathBuf),

    #[error("Text recognition failed: {0}")]
    Recognition(String),

    #[error("Card database request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Card database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
