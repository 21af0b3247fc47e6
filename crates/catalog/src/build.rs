use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use tracing::{info, warn};
use crate::{
    aggregate::{Aggregator, DeckComposition},
    error::Result,
    io::report::{ReportBody, ReportHeader},
    pipeline::{RecognitionPipeline, Resolution},
    traits::CorrectionSource,
};

/// Inputs of one deck or collection build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRequest {
    pub header: ReportHeader,
    pub images: Vec<PathBuf>,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub output: PathBuf,
    pub composition: DeckComposition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Completed(BuildSummary),
    /// The operator cancelled while `processed` images were done. The
    /// output file holds only the banner.
    Cancelled { processed: usize },
}

/// Produce one report file from a list of card images.
///
/// The output file is created (or truncated) and the banner written before
/// the first image is read. Images are processed strictly in order. The file
/// is flushed and closed however the build ends; after a cancellation or a
/// collaborator failure it contains the banner and nothing else.
pub fn run_build<C>(
    pipeline: &RecognitionPipeline,
    request: &BuildRequest,
    corrections: &mut C,
) -> Result<BuildOutcome>
where
    C: CorrectionSource + ?Sized,
{
    let mut report = BufWriter::new(File::create(&request.output)?);
    write!(report, "{}", request.header)?;

    let total = request.images.len();
    let mut aggregator = Aggregator::new();

    for (index, image) in request.images.iter().enumerate() {
        match pipeline.recognize_with(image, corrections)? {
            Resolution::Resolved(record) => {
                info!("[{}/{}] {}", index + 1, total, record.name);
                aggregator.accumulate(&record);
            }
            Resolution::Cancelled => {
                warn!(
                    "{} '{}' cancelled at {}",
                    request.header.kind(),
                    request.header.name(),
                    image.display()
                );
                report.flush()?;
                return Ok(BuildOutcome::Cancelled { processed: index });
            }
        }
    }

    let aggregation = aggregator.finish();
    write!(report, "{}", ReportBody { header: &request.header, aggregation: &aggregation })?;
    report.flush()?;

    info!("Wrote {} cards to {}", total, request.output.display());
    Ok(BuildOutcome::Completed(BuildSummary {
        output: request.output.clone(),
        composition: aggregation.composition,
    }))
}
