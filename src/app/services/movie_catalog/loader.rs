//! Movie catalog loading
//!
//! Reads the metadata reference file and populates the catalog. The file
//! is a legacy single-byte text file, so each line's bytes are decoded as
//! windows-1252 rather than UTF-8. A missing or unreadable file yields an
//! empty catalog; the report is still produced with sentinel titles and
//! absent years.

use super::{LoadStats, MovieCatalog};
use crate::app::models::MovieMetadata;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

impl MovieCatalog {
    /// Load the catalog from the metadata reference file
    ///
    /// The file is streamed line by line. Malformed lines are skipped and
    /// counted. This never fails: open errors degrade to an empty catalog
    /// and mid-read errors keep whatever was loaded so far, so downstream
    /// processing can continue with fallbacks.
    pub fn load(path: &Path) -> (Self, LoadStats) {
        info!("Loading movie catalog: {}", path.display());

        let start_time = Instant::now();
        let mut catalog = Self::new();
        let mut stats = LoadStats::new();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    "Failed to open movie catalog {}: {} - continuing with empty catalog",
                    path.display(),
                    e
                );
                stats.errors.push(format!("{}: {}", path.display(), e));
                stats.load_duration = start_time.elapsed();
                return (catalog, stats);
            }
        };

        let reader = BufReader::new(file);
        for raw_line in reader.split(b'\n') {
            let raw_line = match raw_line {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(
                        "Read error in movie catalog {}: {} - keeping {} records loaded so far",
                        path.display(),
                        e,
                        stats.records_loaded
                    );
                    stats.errors.push(format!("{}: {}", path.display(), e));
                    break;
                }
            };

            // Legacy single-byte charset: decode byte-for-byte, never abort
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&raw_line);
            let line = decoded.trim();
            if line.is_empty() {
                continue;
            }

            match MovieMetadata::parse_line(line) {
                Ok(metadata) => {
                    if metadata.premiere_year.is_none() {
                        stats.null_years += 1;
                    }
                    catalog.insert(metadata);
                    stats.records_loaded += 1;
                }
                Err(e) => {
                    stats.records_skipped += 1;
                    debug!("Skipped metadata line '{}': {}", line, e);
                }
            }
        }

        stats.load_duration = start_time.elapsed();

        info!(
            "Movie catalog loaded: {} movies ({} without premiere year, {} lines skipped) in {:.2}s",
            stats.records_loaded,
            stats.null_years,
            stats.records_skipped,
            stats.load_duration.as_secs_f64()
        );

        (catalog, stats)
    }
}
