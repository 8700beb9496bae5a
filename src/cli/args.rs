//! Command-line argument definitions for the ratings processor
//!
//! The job is a single batch run with no required arguments: every path is
//! resolved relative to the base directory, so a bare invocation from the
//! dataset root produces the report.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the ratings processor
///
/// Aggregates per-movie rating events from segmented text files into a
/// single Excel summary report with rating histograms, observation date
/// ranges, midpoint dates, and season labels.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ratings-processor",
    version,
    about = "Aggregate movie rating events into a seasonal Excel summary report",
    long_about = "Reads a movie metadata reference file and one or more segmented rating \
                  files and produces one Excel report row per movie: rating-count \
                  histogram, total ratings, observation date range, midpoint date, and \
                  season label. All paths are resolved relative to a single base \
                  directory and the job runs to completion without interactive input."
)]
pub struct Args {
    /// Base directory the dataset paths are resolved against
    ///
    /// Expects `data/movie_titles.csv` and `data/combined_data_*.txt`
    /// beneath it. The report is written to `Informe/Analisis.xlsx` under
    /// the same directory unless --output overrides it.
    #[arg(
        short = 'b',
        long = "base-dir",
        value_name = "PATH",
        default_value = ".",
        help = "Base directory containing the data/ directory"
    )]
    pub base_dir: PathBuf,

    /// Report output path override
    ///
    /// If not specified, the report is written to
    /// `<base-dir>/Informe/Analisis.xlsx`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Report output path (defaults to <base-dir>/Informe/Analisis.xlsx)"
    )]
    pub output: Option<PathBuf>,

    /// Suppress progress bars and console summaries
    #[arg(short = 'q', long = "quiet", help = "Suppress progress output")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose", help = "Enable verbose (debug) logging")]
    pub verbose: bool,
}

impl Args {
    /// Resolve the tracing log level from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Whether progress bars and summaries should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the processing configuration from the arguments
    pub fn to_config(&self) -> Config {
        let mut config = Config::new(self.base_dir.clone()).with_progress(self.show_progress());
        if let Some(output) = &self.output {
            config = config.with_report_path(output.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_need_no_arguments() {
        let args = Args::parse_from(["ratings-processor"]);
        assert_eq!(args.base_dir, PathBuf::from("."));
        assert_eq!(args.output, None);
        assert!(!args.quiet);
        assert!(args.show_progress());
        assert_eq!(args.get_log_level(), "info");
    }

    #[test]
    fn test_quiet_lowers_log_level_and_hides_progress() {
        let args = Args::parse_from(["ratings-processor", "--quiet"]);
        assert_eq!(args.get_log_level(), "warn");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_verbose_wins_over_quiet() {
        let args = Args::parse_from(["ratings-processor", "-q", "-v"]);
        assert_eq!(args.get_log_level(), "debug");
    }

    #[test]
    fn test_output_override_flows_into_config() {
        let args = Args::parse_from([
            "ratings-processor",
            "--base-dir",
            "/tmp/dataset",
            "--output",
            "/tmp/report.xlsx",
        ]);
        let config = args.to_config();
        assert_eq!(config.report_path(), PathBuf::from("/tmp/report.xlsx"));
        assert_eq!(config.base_dir, PathBuf::from("/tmp/dataset"));
    }
}
