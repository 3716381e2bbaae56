use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use decklist_stats::analyzer::{Analyzer, Progress};
use decklist_stats::availability;
use decklist_stats::discovery::DEFAULT_BASE_URL;
use decklist_stats::export;
use decklist_stats::fetch::{HttpPageSource, PageSource};
use decklist_stats::layout::DEFAULT_COLUMNS;
use decklist_stats::matchups::{self, DEFAULT_MIN_MATCHES};
use decklist_stats::meta;
use decklist_stats::settings::{is_enabled, JsonSettings, Module};
use decklist_stats::xlsx;
use decklist_stats::{AnalysisReport, AnalyzerError};

#[derive(Parser)]
#[command(name = "decklist-stats")]
#[command(about = "Aggregate card usage across tournament decklists", long_about = None)]
struct Cli {
    /// JSON file with module toggles
    #[arg(long, global = true, env = "DECKLIST_STATS_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
    Xlsx,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze decklists from tournament pages
    Analyze {
        /// Page listing tournaments (e.g. a player's page); its decklist links are analyzed
        #[arg(long)]
        listing: Option<String>,

        /// Tournament decklist page to analyze (repeatable)
        #[arg(long = "url")]
        urls: Vec<String>,

        /// Base URL for resolving relative tournament links
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Number of columns for the text layout
        #[arg(long, default_value_t = DEFAULT_COLUMNS)]
        columns: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output file (stdout when omitted; required for xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Delay between page requests in milliseconds
        #[arg(long, default_value = "200")]
        delay_ms: u64,

        /// Only print the inferred decklist as plain text
        #[arg(long)]
        decklist_only: bool,
    },

    /// Show deck shares from a meta overview page
    Meta {
        /// Page containing the meta table
        url: String,
    },

    /// List matchups with at least a minimum number of matches
    Matchups {
        /// Page containing the matchup table
        url: String,

        /// Minimum matches for a row to be shown
        #[arg(long, default_value_t = DEFAULT_MIN_MATCHES)]
        min_matches: f64,
    },

    /// Check scheduled rows against the weekly availability in the settings file
    Availability {
        /// Page containing a table of dated rows
        url: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => JsonSettings::load(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?,
        None => JsonSettings::default(),
    };

    let module = match cli.command {
        Commands::Analyze { .. } => Module::TournamentAnalyzer,
        Commands::Meta { .. } => Module::MetaShare,
        Commands::Matchups { .. } => Module::MatchThreshold,
        Commands::Availability { .. } => Module::AvailabilityHighlighter,
    };
    if !is_enabled(&settings, module) {
        log::info!("{} disabled in settings", module);
        println!("{} is disabled", module);
        return Ok(());
    }

    match cli.command {
        Commands::Analyze {
            listing,
            urls,
            base_url,
            columns,
            format,
            output,
            delay_ms,
            decklist_only,
        } => {
            let source = HttpPageSource::new().context("Failed to create HTTP client")?;
            let analyzer = Analyzer::new(source).with_delay(Duration::from_millis(delay_ms));

            let report = match run_analysis(&analyzer, listing.as_deref(), urls, &base_url) {
                Ok(report) => report,
                Err(AnalyzerError::NoTournaments) => {
                    println!("No tournaments found");
                    return Ok(());
                }
                Err(e) => return Err(e).context("Analysis failed"),
            };

            if decklist_only {
                print!("{}", export::decklist_text(&report.auto_decklist));
            } else {
                write_report(&report, format, output.as_deref(), columns)?;
            }
        }
        Commands::Meta { url } => {
            let html = fetch_page(&url)?;
            let shares = meta::parse_meta_share(&html);
            if shares.is_empty() {
                println!("No valid data found in meta table");
            }
            for share in shares {
                println!("{:<40} {:>6.2}%", share.deck, share.share * 100.0);
            }
        }
        Commands::Matchups { url, min_matches } => {
            let html = fetch_page(&url)?;
            for table in matchups::filter_matchups(&html, min_matches) {
                println!("{}", table.header.join(" | "));
                for row in &table.rows {
                    println!("{}", row.cells.join(" | "));
                }
                println!("({} row(s) below {} matches hidden)", table.hidden, min_matches);
                println!();
            }
        }
        Commands::Availability { url } => {
            let config = settings
                .availability()
                .context("Invalid availability configuration")?;
            let html = fetch_page(&url)?;
            let rows = availability::highlight_rows(&html, &config, &Local);
            if rows.is_empty() {
                println!("No dated rows found");
            }
            for row in rows {
                let mark = if row.in_range { "available" } else { "unavailable" };
                println!("{:<12} {}", mark, row.labelled_date());
            }
        }
    }

    Ok(())
}

fn fetch_page(url: &str) -> Result<String> {
    let source = HttpPageSource::new().context("Failed to create HTTP client")?;
    source
        .fetch(url)
        .with_context(|| format!("Failed to fetch {}", url))
}

fn run_analysis(
    analyzer: &Analyzer<HttpPageSource>,
    listing: Option<&str>,
    urls: Vec<String>,
    base_url: &str,
) -> decklist_stats::Result<AnalysisReport> {
    match listing {
        Some(listing_url) => {
            println!("Finding tournaments on: {}", listing_url);
            analyzer.analyze_listing(listing_url, base_url, &urls, print_progress)
        }
        None => analyzer.analyze(&urls, print_progress),
    }
}

fn print_progress(p: &Progress) {
    let status = if p.failed { " (failed)" } else { "" };
    eprint!("\rAnalyzed {}/{} tournaments...{}", p.processed, p.total, status);
    if p.processed == p.total {
        eprintln!();
    }
}

fn write_report(
    report: &AnalysisReport,
    format: OutputFormat,
    output: Option<&Path>,
    columns: usize,
) -> Result<()> {
    match (format, output) {
        (OutputFormat::Xlsx, Some(path)) => {
            println!("Writing Excel file: {}", path.display());
            xlsx::write_report_to_xlsx(report, path).context("Failed to write Excel file")?;
        }
        (OutputFormat::Xlsx, None) => {
            anyhow::bail!("xlsx output requires --output");
        }
        (OutputFormat::Csv, Some(path)) => {
            export::write_csv_file(report, path).context("Failed to write CSV file")?;
        }
        (OutputFormat::Csv, None) => {
            export::write_csv(report, io::stdout().lock()).context("Failed to write CSV")?;
        }
        (OutputFormat::Json, Some(path)) => {
            let file = std::fs::File::create(path).context("Failed to create output file")?;
            export::write_json(report, file).context("Failed to write JSON")?;
        }
        (OutputFormat::Json, None) => {
            export::write_json(report, io::stdout().lock()).context("Failed to write JSON")?;
            println!();
        }
        (OutputFormat::Text, output) => {
            let text = export::render_text_report(report, columns);
            match output {
                Some(path) => std::fs::write(path, text).context("Failed to write report")?,
                None => print!("{}", text),
            }
        }
    }

    Ok(())
}
