//! Command implementation for the ratings processor CLI
//!
//! Orchestrates the complete single-pass workflow: load the movie catalog,
//! stream each rating file in fixed name order, finalize every closed
//! movie block into a report row, and save the workbook. Only the final
//! save is allowed to terminate the run; every other failure is logged
//! and processing continues with the remaining input.

use crate::app::services::movie_catalog::{LoadStats, MovieCatalog};
use crate::app::services::rating_stream::{process_file, ParseStats};
use crate::app::services::report_writer::ReportWriter;
use crate::app::services::row_builder::build_row;
use crate::cli::args::Args;
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Statistics for a complete processing run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Number of report rows written
    pub movies_written: u32,

    /// Catalog loading statistics
    pub catalog: LoadStats,

    /// Rating stream parsing statistics
    pub parse: ParseStats,

    /// Path the report was saved to
    pub report_path: PathBuf,

    /// Total processing time
    pub processing_time: Duration,
}

/// Run the complete report generation workflow
pub fn run(args: Args) -> Result<RunStats> {
    let start_time = Instant::now();

    setup_logging(&args);

    info!("Starting ratings processor");
    debug!("Command line arguments: {:?}", args);

    let config = args.to_config();
    config.validate()?;

    if config.show_progress {
        println!(
            "{}",
            "Starting ratings report generation".bright_green().bold()
        );
        println!(
            "  {} {}",
            "Base directory:".bright_cyan(),
            config.base_dir.display()
        );
        println!(
            "  {} {}",
            "Report path:".bright_cyan(),
            config.report_path().display()
        );
    }

    // Metadata catalog loads once; a missing file degrades to sentinels
    let (catalog, catalog_stats) = MovieCatalog::load(&config.metadata_path());
    if config.show_progress {
        println!(
            "\n{} {} {}",
            "Loaded".bright_yellow(),
            catalog_stats.records_loaded.to_string().bright_white().bold(),
            "movie titles".bright_yellow()
        );
    }

    let rating_files = discover_rating_files(&config)?;
    info!("Discovered {} rating files to process", rating_files.len());
    if rating_files.is_empty() {
        warn!(
            "No rating files matching '{}' found - the report will contain headers only",
            config.rating_file_pattern()
        );
    }

    let mut writer = ReportWriter::new()?;
    let mut parse_stats = ParseStats::new();

    let progress_bar = if config.show_progress && !rating_files.is_empty() {
        Some(create_progress_bar(
            rating_files.len() as u64,
            "Processing rating files",
        ))
    } else {
        None
    };

    for file_path in &rating_files {
        if let Some(pb) = &progress_bar {
            pb.set_message(format!(
                "Processing {}",
                file_path.file_name().unwrap_or_default().to_string_lossy()
            ));
        }

        process_file(file_path, &mut parse_stats, |aggregate| {
            let movie_id = aggregate.movie_id;
            match build_row(aggregate, &catalog) {
                Ok(row) => writer.append_row(&row),
                Err(e) => {
                    // Recoverable: drop the one row, keep the stream going
                    warn!("Skipped report row for movie {}: {}", movie_id, e);
                    Ok(())
                }
            }
        })?;

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("All rating files processed");
    }

    // The report is the job's sole output: save failures are fatal
    config.ensure_report_directory()?;
    let report_path = config.report_path();
    writer.save(&report_path)?;

    let stats = RunStats {
        movies_written: writer.rows_written(),
        catalog: catalog_stats,
        parse: parse_stats,
        report_path,
        processing_time: start_time.elapsed(),
    };

    if config.show_progress {
        print_summary(&stats);
    }

    Ok(stats)
}

/// Set up structured logging from the verbosity flags
fn setup_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ratings_processor={}", log_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Discover rating files under the data directory, in sorted name order
pub fn discover_rating_files(config: &Config) -> Result<Vec<PathBuf>> {
    let pattern = config.rating_file_pattern();

    let entries = glob::glob(&pattern)
        .map_err(|e| Error::configuration(format!("Invalid rating file pattern '{}': {}", pattern, e)))?;

    let mut rating_files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => rating_files.push(path),
            Err(e) => {
                warn!("Skipping unreadable rating file path: {}", e);
            }
        }
    }

    // Sorted for the fixed processing order the report depends on
    rating_files.sort();

    debug!("Discovered {} rating files", rating_files.len());
    for file in &rating_files {
        debug!("  Found: {}", file.display());
    }

    Ok(rating_files)
}

/// Print the closing summary in console-friendly form
fn print_summary(stats: &RunStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Rating files processed:".bright_cyan(),
        stats.parse.files_processed.to_string().bright_white().bold()
    );
    if stats.parse.files_skipped > 0 {
        println!(
            "  {} {}",
            "Rating files skipped:".bright_cyan(),
            stats.parse.files_skipped.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Lines read:".bright_cyan(),
        stats.parse.lines_read.to_string().bright_white().bold()
    );
    if stats.parse.lines_skipped > 0 {
        println!(
            "  {} {}",
            "Lines skipped:".bright_cyan(),
            stats.parse.lines_skipped.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Movies written:".bright_cyan(),
        stats.movies_written.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Report:".bright_cyan(),
        stats.report_path.display()
    );
    println!(
        "  {} {}",
        "Elapsed:".bright_cyan(),
        HumanDuration(stats.processing_time)
    );
}

/// Create a progress bar with the standard styling
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_discover_rating_files_sorted_order() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        std::fs::create_dir(&data_dir).unwrap();
        for name in ["combined_data_2.txt", "combined_data_1.txt", "notes.txt"] {
            let mut file = std::fs::File::create(data_dir.join(name)).unwrap();
            writeln!(file, "1:").unwrap();
        }

        let config = Config::new(temp_dir.path());
        let files = discover_rating_files(&config).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["combined_data_1.txt", "combined_data_2.txt"]);
    }

    #[test]
    fn test_discover_rating_files_empty_when_no_matches() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("data")).unwrap();

        let config = Config::new(temp_dir.path());
        let files = discover_rating_files(&config).unwrap();

        assert!(files.is_empty());
    }
}
