//! Strata CLI binary.
//!
//! Derives quarterly, TTM and growth series from SEC companyfacts JSON files.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;
use strata::data::FactsDocument;
use strata::output::{ExportFormat, Exporter, SeriesSummary};
use strata::series::{EngineConfig, MetricSeries, SeriesEngine, available_metrics};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Strata: financial series from SEC company facts", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive quarterly, TTM and growth series for a metric
    Derive {
        /// Path to a companyfacts JSON file
        facts: PathBuf,

        /// Metric name (see `strata metrics`)
        #[arg(long, short)]
        metric: String,

        /// Comma-separated concept keys to use instead of the registry's
        #[arg(long, value_delimiter = ',')]
        concepts: Vec<String>,

        /// Which series to print
        #[arg(long, value_enum, default_value_t = SeriesKind::All)]
        series: SeriesKind,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Engine configuration (JSON, missing fields use defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List built-in metrics
    Metrics,

    /// List concepts that carry USD facts
    Concepts {
        /// Path to a companyfacts JSON file
        facts: PathBuf,

        /// Only show concepts whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SeriesKind {
    Quarterly,
    Ttm,
    Growth,
    TtmGrowth,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Derive {
            facts,
            metric,
            concepts,
            series,
            format,
            config,
            output,
        } => {
            let engine = SeriesEngine::new(load_config(config.as_deref())?)?;
            let doc = FactsDocument::from_path(&facts)?;

            let derived = if concepts.is_empty() {
                engine.derive_by_name(&doc, &metric)?
            } else {
                engine.derive_keys(&doc, &metric, &concepts)
            };
            if derived.concept.is_none() {
                eprintln!("No usable facts for '{}' in {}", metric, facts.display());
            }

            let rendered = render(&derived, series, format)?;
            match output {
                Some(path) => std::fs::write(path, rendered)?,
                None => println!("{}", rendered),
            }
        }
        Commands::Metrics => list_metrics(),
        Commands::Concepts { facts, filter } => {
            let doc = FactsDocument::from_path(&facts)?;
            list_concepts(&doc, filter.as_deref());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = std::fs::read_to_string(path)?;
    let config = EngineConfig::from_json(&json)
        .map_err(|e| format!("Failed to load config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), ?config, "loaded engine config");
    Ok(config)
}

/// Keep only the requested series so the summary table shows just those columns.
fn select(series: &MetricSeries, kind: SeriesKind) -> MetricSeries {
    let mut selected = series.clone();
    if !matches!(kind, SeriesKind::Quarterly | SeriesKind::All) {
        selected.quarterly.clear();
    }
    if !matches!(kind, SeriesKind::Ttm | SeriesKind::All) {
        selected.ttm.clear();
    }
    if !matches!(kind, SeriesKind::Growth | SeriesKind::All) {
        selected.quarterly_growth.clear();
    }
    if !matches!(kind, SeriesKind::TtmGrowth | SeriesKind::All) {
        selected.ttm_growth.clear();
    }
    selected
}

fn render(
    series: &MetricSeries,
    kind: SeriesKind,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let export = match format {
        OutputFormat::Table => {
            let summary = SeriesSummary::from_series(&select(series, kind));
            return Ok(summary.to_ascii_table());
        }
        OutputFormat::Csv => ExportFormat::Csv,
        OutputFormat::Json => ExportFormat::PrettyJson,
    };

    let rendered = match kind {
        SeriesKind::Quarterly => series.quarterly.export_to_string(export)?,
        SeriesKind::Ttm => series.ttm.export_to_string(export)?,
        SeriesKind::Growth => series.quarterly_growth.export_to_string(export)?,
        SeriesKind::TtmGrowth => series.ttm_growth.export_to_string(export)?,
        SeriesKind::All => series.export_to_string(export)?,
    };
    Ok(rendered)
}

fn list_metrics() {
    println!(
        "{:<26} {:<10} {:<52}",
        "Metric", "Category", "Concepts (in order of preference)"
    );
    println!("{}", "-".repeat(90));
    for metric in available_metrics() {
        println!(
            "{:<26} {:<10} {}",
            metric.name,
            metric.category.to_string(),
            metric.concept_keys.join(", ")
        );
    }
}

fn list_concepts(doc: &FactsDocument, filter: Option<&str>) {
    println!(
        "{} (CIK {})",
        doc.entity_name.as_deref().unwrap_or("Unknown entity"),
        doc.cik.as_deref().unwrap_or("-")
    );
    println!("{}", "=".repeat(90));

    let concepts = doc.usd_concepts();
    let mut shown = 0;
    for (taxonomy, concept, count) in &concepts {
        if filter.is_some_and(|f| !concept.contains(f)) {
            continue;
        }
        println!("{:<72} {:>8}", format!("{}:{}", taxonomy, concept), count);
        shown += 1;
    }

    println!("{}", "-".repeat(90));
    println!("{} of {} concepts with USD facts", shown, concepts.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_derive() {
        let cli = Cli::try_parse_from([
            "strata",
            "derive",
            "facts.json",
            "--metric",
            "revenue",
            "--series",
            "ttm-growth",
            "--format",
            "csv",
            "--concepts",
            "us-gaap:Revenues,SalesRevenueNet",
        ])
        .unwrap();

        match cli.command {
            Commands::Derive {
                metric,
                concepts,
                series,
                format,
                ..
            } => {
                assert_eq!(metric, "revenue");
                assert_eq!(concepts, vec!["us-gaap:Revenues", "SalesRevenueNet"]);
                assert_eq!(series, SeriesKind::TtmGrowth);
                assert_eq!(format, OutputFormat::Csv);
            }
            _ => panic!("expected derive"),
        }
    }

    #[test]
    fn test_select_ttm_only() {
        let mut series = MetricSeries::empty("revenue");
        series.quarterly_growth.push(strata::series::GrowthPoint {
            period_end: "2024-03-31".parse().unwrap(),
            growth_percent: 3.0,
        });

        let selected = select(&series, SeriesKind::Ttm);
        assert!(selected.quarterly_growth.is_empty());
        assert_eq!(select(&series, SeriesKind::All), series);
    }

    #[test]
    fn test_render_empty_table() {
        let table = render(
            &MetricSeries::empty("revenue"),
            SeriesKind::All,
            OutputFormat::Table,
        )
        .unwrap();
        assert!(table.contains("No quarterly data."));
    }
}
