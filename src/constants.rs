//! Application constants for the ratings processor
//!
//! This module contains all file names, report layout values, and
//! classification boundaries used throughout the application.

// =============================================================================
// Input File Names and Patterns
// =============================================================================

/// Data directory name under the base directory
pub const DATA_DIR_NAME: &str = "data";

/// Movie metadata reference file name
pub const MOVIE_TITLES_FILE_NAME: &str = "movie_titles.csv";

/// Rating file name pattern, matched under the data directory and
/// processed in sorted name order
pub const RATING_FILE_PATTERN: &str = "combined_data_*.txt";

/// Year field token marking an absent premiere year (matched case-insensitively)
pub const NULL_YEAR_TOKEN: &str = "null";

/// Movie block header line grammar: an integer id followed by a colon
pub const MOVIE_HEADER_PATTERN: &str = r"^(\d+):$";

/// Rating line date format (sorts lexically identical to chronological order)
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Rating Values
// =============================================================================

/// Lowest rating bucketed in the histogram
pub const RATING_MIN: i64 = 1;

/// Highest rating bucketed in the histogram
pub const RATING_MAX: i64 = 5;

// =============================================================================
// Report Layout
// =============================================================================

/// Report directory name under the base directory
pub const REPORT_DIR_NAME: &str = "Informe";

/// Report workbook file name
pub const REPORT_FILE_NAME: &str = "Analisis.xlsx";

/// Detail worksheet name
pub const DETAIL_SHEET_NAME: &str = "Detalle";

/// Report column headers, in fixed output order
pub const REPORT_COLUMNS: &[&str] = &[
    "IdMovie",
    "MovieTitle",
    "PremiereYear",
    "C1",
    "C2",
    "C3",
    "C4",
    "C5",
    "TotalRatings",
    "StartDate",
    "EndDate",
    "Media",
    "Estacion",
];

/// Zero-based column index of the premiere year cell (annotation target)
pub const PREMIERE_YEAR_COLUMN: u16 = 2;

/// Date format used for all date cells in the report
pub const DATE_OUTPUT_FORMAT: &str = "%d-%m-%Y";

// =============================================================================
// Metadata Fallbacks
// =============================================================================

/// Title used for movies absent from the metadata catalog
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Premiere year substituted when the catalog records none
pub const FALLBACK_PREMIERE_YEAR: i32 = 1900;

/// Annotation attached to the premiere year cell of substituted rows
pub const YEAR_NOTE_TEXT: &str =
    "Año de estreno nulo reemplazado por 1900 para fines de análisis";

/// Annotation author name
pub const YEAR_NOTE_AUTHOR: &str = "Sistema";

// =============================================================================
// Season Boundaries
// =============================================================================

/// Season interval boundaries as (month, day) pairs, evaluated against the
/// midpoint date's month and day with Dec -> Mar wraparound. The labels
/// follow the source data convention and are intentionally inverted
/// relative to northern-hemisphere calendar seasons.
pub mod season_bounds {
    /// Primavera interval start, inclusive
    pub const PRIMAVERA_START: (u32, u32) = (9, 21);
    /// Primavera interval end, inclusive
    pub const PRIMAVERA_END: (u32, u32) = (12, 20);

    /// Verano interval start, inclusive (wraps across the year boundary)
    pub const VERANO_START: (u32, u32) = (12, 21);
    /// Verano interval end, inclusive
    pub const VERANO_END: (u32, u32) = (3, 19);

    /// Otoño interval start, inclusive
    pub const OTONO_START: (u32, u32) = (3, 20);
    /// Otoño interval end, inclusive
    pub const OTONO_END: (u32, u32) = (6, 20);

    /// Invierno interval start, inclusive
    pub const INVIERNO_START: (u32, u32) = (6, 21);
    /// Invierno interval end, inclusive
    pub const INVIERNO_END: (u32, u32) = (9, 20);
}
