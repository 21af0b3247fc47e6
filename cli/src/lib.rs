pub mod prompt;

use catalog::{
    CatalogError, InMemoryDatabase, MtgApiDatabase, RecognitionPipeline, DEFAULT_API_URL,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Environment variable that overrides `tesseract_path`
pub const TESSERACT_ENV: &str = "CATALOGER_TESSERACT";

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    CatalogError(#[from] CatalogError),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
    #[error("Tesseract executable not found: {}", .0.display())]
    TesseractNotFound(PathBuf),
    #[error("Cannot read image list {}: {source}", .path.display())]
    ImageList {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Card catalog file not found: {}", .0.display())]
    CatalogNotFound(PathBuf),
    #[error("'page_size' must be between 1 and {max}, got {0}", max = catalog::database::MAX_PAGE_SIZE)]
    InvalidPageSize(u32),
    #[error("Operator quit")]
    Quit,
}

/// Settings for the recognition collaborators
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct CatalogerConfig {
    /// Tesseract executable, either a path or a name looked up on `PATH`
    pub tesseract_path: PathBuf,
    /// Base URL of the MTG API
    pub api_base_url: String,
    /// Cards requested per API page, at most 100
    pub page_size: u32,
    /// Extra attempts when the API cannot be reached
    pub max_retries: u32,
    /// Offline JSON card list to use instead of the API
    pub catalog: Option<PathBuf>,
}

impl Default for CatalogerConfig {
    fn default() -> Self {
        Self {
            tesseract_path: PathBuf::from("tesseract"),
            api_base_url: DEFAULT_API_URL.to_string(),
            page_size: catalog::database::DEFAULT_PAGE_SIZE,
            max_retries: catalog::database::DEFAULT_MAX_RETRIES,
            catalog: None,
        }
    }
}

impl CatalogerConfig {
    /// Get the JSON schema of the configuration file
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(CatalogerConfig)
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(TESSERACT_ENV).filter(|path| !path.is_empty()) {
            self.tesseract_path = PathBuf::from(path);
        }
        self
    }

    /// Check the configuration and resolve the Tesseract executable
    pub fn validate(&self) -> Result<PathBuf, CliError> {
        if !(1..=catalog::database::MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(CliError::InvalidPageSize(self.page_size));
        }
        if let Some(catalog) = &self.catalog {
            if !catalog.is_file() {
                return Err(CliError::CatalogNotFound(catalog.clone()));
            }
        }
        find_executable(&self.tesseract_path, std::env::var_os("PATH"))
            .ok_or_else(|| CliError::TesseractNotFound(self.tesseract_path.clone()))
    }

    /// Validate and assemble the recognition pipeline
    pub fn pipeline(&self) -> Result<RecognitionPipeline, CliError> {
        let tesseract = self.validate()?;
        info!("Using tesseract at {}", tesseract.display());

        let builder = RecognitionPipeline::builder().with_tesseract(tesseract);
        let builder = match &self.catalog {
            Some(path) => {
                let database = InMemoryDatabase::from_json_file(path)?;
                info!("Loaded {} cards from {}", database.len(), path.display());
                builder.set_database(database)
            }
            None => builder.set_database(
                MtgApiDatabase::new(self.api_base_url.clone())?
                    .with_page_size(self.page_size)
                    .with_max_retries(self.max_retries),
            ),
        };

        Ok(builder.build()?)
    }
}

/// Resolve `program` the way a shell would: paths with a directory part are
/// taken as given, bare names are searched for in `search_path`.
pub fn find_executable(program: &Path, search_path: Option<OsString>) -> Option<PathBuf> {
    if program.components().count() > 1 || program.is_absolute() {
        return program.is_file().then(|| program.to_path_buf());
    }

    let search_path = search_path?;
    std::env::split_paths(&search_path).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let candidate = candidate.with_extension("exe");
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    })
}

/// Read image paths from a text file, one per line. Lines are trimmed and
/// blank lines skipped.
pub fn read_image_list<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>, CliError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CliError::ImageList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}
