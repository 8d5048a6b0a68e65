//! triplescope CLI: generate an interactive HTML dashboard from extraction JSON.

use std::path::PathBuf;

use clap::Parser;
use miette::Result;

use triplescope::config::ReportConfig;
use triplescope::error::ExportError;
use triplescope::export;
use triplescope::session::Session;

#[derive(Parser)]
#[command(
    name = "triplescope",
    version,
    about = "Render semantic-triple extraction data as an interactive dashboard"
)]
struct Cli {
    /// Path to the input JSON file (array of speaker turns).
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Path to save the generated HTML report.
    #[arg(long, short = 'o')]
    output: PathBuf,

    /// Custom report template; must contain the data placeholder marker.
    #[arg(long)]
    template: Option<PathBuf>,

    /// TOML config file overriding the report tunables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Graph neighborhood expansion distance (0 = matched entities only).
    #[arg(long)]
    hops: Option<usize>,

    /// Also write the entity-type frequency table as CSV.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Also write the full analytics bundle as pretty JSON.
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Print a session summary to stdout.
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    let hops = cli.hops.unwrap_or(config.default_hops);

    let mut session = Session::new(config);
    session.load_file(&cli.input)?;

    session.write_report(&cli.output, cli.template.as_deref(), hops)?;
    println!("Report written to {}", cli.output.display());

    if let Some(path) = &cli.csv {
        match session.export_entity_types_csv() {
            Ok(content) => {
                export::write_export(path, &content)?;
                println!("Entity-type CSV written to {}", path.display());
            }
            Err(ExportError::NothingToExport) => {
                tracing::warn!("entity-type CSV skipped: nothing to export");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &cli.export_json {
        match session.export_analytics_json() {
            Ok(content) => {
                export::write_export(path, &content)?;
                println!("Analytics JSON written to {}", path.display());
            }
            Err(ExportError::NothingToExport) => {
                tracing::warn!("analytics JSON skipped: nothing to export");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if cli.stats {
        print!("{}", session.info());
    }

    Ok(())
}
