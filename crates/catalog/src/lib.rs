//! # Card Catalog Library
//!
//! Turns photographs of Magic: The Gathering cards into plain-text deck and
//! collection reports.
//!
//! ## Core Features
//!
//! - **Trait-based Collaborators**: image normalization, text recognition and
//!   card lookup sit behind traits so each can be swapped or faked
//! - **Recoverable Recognition**: an unknown name suspends the pipeline until
//!   a corrected name or a cancellation is supplied
//! - **Typed Statistics**: cards fold into per-category totals with a fixed
//!   classification precedence
//! - **Stable Reports**: identical input always renders identical text
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalog::{run_build, BuildRequest, RecognitionPipeline, ReportHeader, Correction, Unresolved};
//!
//! struct GiveUp;
//!
//! impl catalog::CorrectionSource for GiveUp {
//!     fn request_correction(&mut self, _pending: &Unresolved) -> catalog::Result<Correction> {
//!         Ok(Correction::Cancel)
//!     }
//! }
//!
//! let pipeline = RecognitionPipeline::builder()
//!     .with_tesseract("/usr/bin/tesseract")
//!     .build()?;
//!
//! let request = BuildRequest {
//!     header: ReportHeader::Collection {
//!         name: "Binder".to_string(),
//!         summary: "Trade stock".to_string(),
//!     },
//!     images: vec!["bears.jpg".into(), "island.jpg".into()],
//!     output: "binder.txt".into(),
//! };
//! run_build(&pipeline, &request, &mut GiveUp)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod database;
pub mod resolver;
pub mod pipeline;
pub mod aggregate;
pub mod io;
pub mod build;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use error::{CatalogError, Result};
pub use types::{CardRecord, Category, Correction, Recognition, Unresolved, CANCEL_TOKEN};
pub use traits::*;
pub use algorithms::*;
pub use database::{InMemoryDatabase, MtgApiDatabase, DEFAULT_API_URL};
pub use resolver::CardResolver;
pub use pipeline::{builder::PipelineBuilder, sanitize_name, RecognitionPipeline, Region, Resolution, TITLE_REGION};
pub use aggregate::{Aggregation, Aggregator, CategoryTotals, DeckComposition};
pub use io::*;
pub use build::{run_build, BuildOutcome, BuildRequest, BuildSummary};
