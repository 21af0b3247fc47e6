use clap::{Parser, Subcommand};
use cli::{prompt::Prompter, read_image_list, CatalogerConfig, CliError};
use catalog::{BuildOutcome, BuildRequest, ReportHeader};
use color_eyre::eyre::Result;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Catalog Magic: The Gathering cards from photographs", long_about = None)]
struct Cli {
    /// Path to a TOML or JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Offline JSON card list to use instead of the MTG API
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Menu-driven session (the default)
    Interactive,
    /// Build a deck report with statistics
    Deck {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        summary: String,
        /// Competition format, e.g. Modern
        #[arg(short, long)]
        format: String,
        /// Report file to write (overwritten)
        #[arg(short, long)]
        output: PathBuf,
        /// Text file listing one image path per line
        #[arg(short, long)]
        images: PathBuf,
    },
    /// Build a collection report
    Collection {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        summary: String,
        /// Report file to write (overwritten)
        #[arg(short, long)]
        output: PathBuf,
        /// Text file listing one image path per line
        #[arg(short, long)]
        images: PathBuf,
    },
    /// Print the JSON schema of the configuration file
    ConfigSchema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(Commands::ConfigSchema) = &cli.command {
        println!("{}", serde_json::to_string_pretty(&CatalogerConfig::schema())?);
        return Ok(());
    }

    let config = load_config(cli.config.as_deref(), cli.catalog)?;
    let pipeline = config.pipeline()?;
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => prompter.run_menu(&pipeline)?,
        Commands::Deck { name, summary, format, output, images } => {
            let request = BuildRequest {
                header: ReportHeader::Deck { name, summary, format },
                images: read_image_list(images)?,
                output,
            };
            report_outcome(prompter.build(&pipeline, &request)?);
        }
        Commands::Collection { name, summary, output, images } => {
            let request = BuildRequest {
                header: ReportHeader::Collection { name, summary },
                images: read_image_list(images)?,
                output,
            };
            report_outcome(prompter.build(&pipeline, &request)?);
        }
        Commands::ConfigSchema => {}
    }

    Ok(())
}

fn load_config(path: Option<&Path>, catalog: Option<PathBuf>) -> Result<CatalogerConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            CatalogerConfig::from_file(path)?
        }
        None => CatalogerConfig::default(),
    }
    .with_env_overrides();

    if catalog.is_some() {
        config.catalog = catalog;
    }
    Ok(config)
}

fn report_outcome(outcome: BuildOutcome) {
    match outcome {
        BuildOutcome::Completed(summary) => info!(
            "✅ {} cards, {} lands written to {:?}",
            summary.composition.total_cards,
            summary.composition.land_count(),
            summary.output
        ),
        BuildOutcome::Cancelled { processed } => warn!("Build cancelled after {} cards", processed),
    }
}
