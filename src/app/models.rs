//! Data models for ratings processing
//!
//! This module contains the core data structures for representing movie
//! metadata, rating events, the per-movie running aggregate, and the
//! finalized report rows.

use crate::constants::{season_bounds, DATE_INPUT_FORMAT, RATING_MAX, RATING_MIN};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Movie Metadata Structure
// =============================================================================

/// One record from the movie metadata reference file
///
/// Built once at load time and kept immutable afterwards. A missing or
/// `NULL` premiere year is stored as absent, never as zero.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MovieMetadata {
    /// Unique movie identifier - primary key for catalog lookups
    pub id: u32,

    /// Movie title, verbatim from the reference file (may contain commas)
    pub title: String,

    /// Premiere year, absent when the reference file records `NULL`
    pub premiere_year: Option<i32>,
}

impl MovieMetadata {
    /// Parse a metadata reference line: `movieId,year|"NULL",title`
    ///
    /// Only the first two commas delimit fields; the remainder of the line
    /// is the title verbatim. Returns an error for lines without three
    /// logical fields or a non-integer id.
    pub fn parse_line(line: &str) -> Result<Self> {
        let mut parts = line.splitn(3, ',');
        let (id_field, year_field, title) = match (parts.next(), parts.next(), parts.next()) {
            (Some(id), Some(year), Some(title)) => (id.trim(), year.trim(), title),
            _ => {
                return Err(Error::record_format(format!(
                    "Expected 3 fields in metadata line, got '{}'",
                    line
                )));
            }
        };

        let id = id_field.parse::<u32>().map_err(|e| {
            Error::record_format(format!("Invalid movie id '{}': {}", id_field, e))
        })?;

        let premiere_year = if year_field.is_empty()
            || year_field.eq_ignore_ascii_case(crate::constants::NULL_YEAR_TOKEN)
        {
            None
        } else {
            match year_field.parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    // Tolerated like NULL: the row falls back to the sentinel year
                    None
                }
            }
        };

        Ok(Self {
            id,
            title: title.to_string(),
            premiere_year,
        })
    }
}

// =============================================================================
// Rating Event Structure
// =============================================================================

/// A single rating line: `userId,rating,date`
///
/// Transient - consumed immediately into the running aggregate and never
/// retained as a collection. The date keeps its `YYYY-MM-DD` lexical form
/// because range tracking compares dates as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingEvent {
    /// Rating user identifier (ignored by aggregation)
    pub user_id: u32,

    /// Rating value; integers outside 1-5 are tolerated but never bucketed
    pub rating: i64,

    /// Observation date in `YYYY-MM-DD` form, validated at parse time
    pub date: String,
}

impl FromStr for RatingEvent {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 3 {
            return Err(Error::record_format(format!(
                "Expected 3 fields in rating line, got {}",
                parts.len()
            )));
        }

        let user_id = parts[0].trim().parse::<u32>().map_err(|e| {
            Error::record_format(format!("Invalid user id '{}': {}", parts[0].trim(), e))
        })?;

        let rating = parts[1].trim().parse::<i64>().map_err(|e| {
            Error::record_format(format!("Invalid rating '{}': {}", parts[1].trim(), e))
        })?;

        let date = parts[2].trim();
        NaiveDate::parse_from_str(date, DATE_INPUT_FORMAT)
            .map_err(|e| Error::date_parse(format!("Invalid rating date '{}'", date), e))?;

        Ok(Self {
            user_id,
            rating,
            date: date.to_string(),
        })
    }
}

// =============================================================================
// Per-Movie Running Aggregate
// =============================================================================

/// Running state for the movie block currently being accumulated
///
/// Created when a block header is encountered, mutated by each rating line,
/// and finalized into a [`ReportRow`] when the next header or end-of-input
/// closes the block. Date extremes are tracked lexically, which matches
/// chronological order for `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieAggregate {
    /// Movie identifier from the block header
    pub movie_id: u32,

    /// Rating counts for values 1 through 5
    pub histogram: [u64; 5],

    /// Number of rating lines observed, including out-of-range ratings
    pub date_count: u64,

    /// Earliest observed date, `YYYY-MM-DD`
    pub min_date: Option<String>,

    /// Latest observed date, `YYYY-MM-DD`
    pub max_date: Option<String>,
}

impl MovieAggregate {
    /// Create an empty aggregate for a newly opened movie block
    pub fn new(movie_id: u32) -> Self {
        Self {
            movie_id,
            histogram: [0; 5],
            date_count: 0,
            min_date: None,
            max_date: None,
        }
    }

    /// Fold one rating event into the aggregate
    ///
    /// Every event counts toward the total and the date range; only ratings
    /// in 1-5 land in a histogram bucket. The asymmetry is intentional.
    pub fn record(&mut self, event: &RatingEvent) {
        if (RATING_MIN..=RATING_MAX).contains(&event.rating) {
            self.histogram[(event.rating - 1) as usize] += 1;
        }
        self.date_count += 1;

        let is_new_min = self
            .min_date
            .as_deref()
            .is_none_or(|current| event.date.as_str() < current);
        if is_new_min {
            self.min_date = Some(event.date.clone());
        }

        let is_new_max = self
            .max_date
            .as_deref()
            .is_none_or(|current| event.date.as_str() > current);
        if is_new_max {
            self.max_date = Some(event.date.clone());
        }
    }

    /// Total number of rating lines observed for this movie
    pub fn total_ratings(&self) -> u64 {
        self.date_count
    }

    /// Number of ratings that landed in a histogram bucket
    pub fn bucketed_total(&self) -> u64 {
        self.histogram.iter().sum()
    }
}

// =============================================================================
// Season Classification
// =============================================================================

/// Season label derived from a midpoint date
///
/// The labels follow the source data convention: interval boundaries are
/// fixed (month, day) pairs and the naming is inverted relative to
/// northern-hemisphere calendar seasons. This is a property of the data,
/// not a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    /// Sep 21 - Dec 20
    Primavera,
    /// Dec 21 - Mar 19, wrapping the year boundary
    Verano,
    /// Mar 20 - Jun 20
    Otono,
    /// Jun 21 - Sep 20
    Invierno,
}

impl Season {
    /// Classify a date by its (month, day) within the fixed intervals
    ///
    /// The intervals cover the full year, so the trailing fallback only
    /// exists as a defined answer for unreachable input.
    pub fn from_date(date: NaiveDate) -> Self {
        let month_day = (date.month(), date.day());

        if (season_bounds::PRIMAVERA_START..=season_bounds::PRIMAVERA_END).contains(&month_day) {
            Season::Primavera
        } else if month_day >= season_bounds::VERANO_START
            || month_day <= season_bounds::VERANO_END
        {
            Season::Verano
        } else if (season_bounds::OTONO_START..=season_bounds::OTONO_END).contains(&month_day) {
            Season::Otono
        } else if (season_bounds::INVIERNO_START..=season_bounds::INVIERNO_END)
            .contains(&month_day)
        {
            Season::Invierno
        } else {
            Season::Invierno
        }
    }

    /// Localized label written to the report
    pub fn label(&self) -> &'static str {
        match self {
            Season::Primavera => "Primavera",
            Season::Verano => "Verano",
            Season::Otono => "Otoño",
            Season::Invierno => "Invierno",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Finalized Report Row
// =============================================================================

/// The finalized, immutable output unit for one movie
///
/// Invariants: the five histogram counts sum to at most `total_ratings`
/// (equality when every rating was in range); `start_date <= end_date`
/// when present; `season` is present exactly when `midpoint_date` is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Movie identifier
    pub movie_id: u32,

    /// Title from the catalog, or the sentinel for unknown movies
    pub title: String,

    /// Premiere year, substituted with the fallback when absent
    pub premiere_year: i32,

    /// Whether the premiere year was substituted (drives the annotation)
    pub year_defaulted: bool,

    /// Rating counts for values 1 through 5
    pub counts: [u64; 5],

    /// Count of all parsed rating lines for the movie
    pub total_ratings: u64,

    /// Earliest observed rating date
    pub start_date: Option<NaiveDate>,

    /// Latest observed rating date
    pub end_date: Option<NaiveDate>,

    /// Arithmetic midpoint of the observed range, truncated to whole days
    pub midpoint_date: Option<NaiveDate>,

    /// Season of the midpoint date; absent for movies without dates
    pub season: Option<Season>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_metadata_line_with_year() {
        let meta = MovieMetadata::parse_line("712,1997,Titanic").unwrap();
        assert_eq!(meta.id, 712);
        assert_eq!(meta.title, "Titanic");
        assert_eq!(meta.premiere_year, Some(1997));
    }

    #[test]
    fn test_metadata_line_null_year() {
        let meta = MovieMetadata::parse_line("5,NULL,Unknown Film").unwrap();
        assert_eq!(meta.premiere_year, None);
    }

    #[test]
    fn test_metadata_title_keeps_commas() {
        let meta = MovieMetadata::parse_line("42,2001,Love, Actually, Maybe").unwrap();
        assert_eq!(meta.title, "Love, Actually, Maybe");
    }

    #[test]
    fn test_metadata_line_too_few_fields() {
        assert!(MovieMetadata::parse_line("42,2001").is_err());
        assert!(MovieMetadata::parse_line("42").is_err());
    }

    #[test]
    fn test_rating_event_parses() {
        let event: RatingEvent = "1488844,3,2005-09-06".parse().unwrap();
        assert_eq!(event.user_id, 1488844);
        assert_eq!(event.rating, 3);
        assert_eq!(event.date, "2005-09-06");
    }

    #[test]
    fn test_rating_event_rejects_bad_fields() {
        assert!("1,2".parse::<RatingEvent>().is_err());
        assert!("1,2,3,4".parse::<RatingEvent>().is_err());
        assert!("abc,3,2005-09-06".parse::<RatingEvent>().is_err());
        assert!("1,threestars,2005-09-06".parse::<RatingEvent>().is_err());
        assert!("1,3,06-09-2005".parse::<RatingEvent>().is_err());
        assert!("1,3,2005-13-40".parse::<RatingEvent>().is_err());
    }

    #[test]
    fn test_aggregate_buckets_in_range_ratings() {
        let mut agg = MovieAggregate::new(712);
        agg.record(&"1,5,1999-01-01".parse().unwrap());
        agg.record(&"2,3,1999-03-03".parse().unwrap());
        assert_eq!(agg.histogram, [0, 0, 1, 0, 1]);
        assert_eq!(agg.total_ratings(), 2);
        assert_eq!(agg.bucketed_total(), 2);
    }

    #[test]
    fn test_aggregate_out_of_range_rating_counts_toward_total_only() {
        let mut agg = MovieAggregate::new(10);
        agg.record(&"10,7,2000-05-05".parse().unwrap());
        agg.record(&"11,0,2000-05-06".parse().unwrap());
        assert_eq!(agg.histogram, [0; 5]);
        assert_eq!(agg.total_ratings(), 2);
        assert_eq!(agg.bucketed_total(), 0);
        assert_eq!(agg.min_date.as_deref(), Some("2000-05-05"));
        assert_eq!(agg.max_date.as_deref(), Some("2000-05-06"));
    }

    #[test]
    fn test_aggregate_tracks_date_extremes_lexically() {
        let mut agg = MovieAggregate::new(1);
        agg.record(&"1,4,2003-07-15".parse().unwrap());
        agg.record(&"2,4,2001-01-31".parse().unwrap());
        agg.record(&"3,4,2002-12-01".parse().unwrap());
        assert_eq!(agg.min_date.as_deref(), Some("2001-01-31"));
        assert_eq!(agg.max_date.as_deref(), Some("2003-07-15"));
    }

    #[test]
    fn test_season_primavera_interval() {
        assert_eq!(Season::from_date(date(2004, 9, 21)), Season::Primavera);
        assert_eq!(Season::from_date(date(2004, 10, 15)), Season::Primavera);
        assert_eq!(Season::from_date(date(2004, 12, 20)), Season::Primavera);
    }

    #[test]
    fn test_season_verano_wraps_year_boundary() {
        assert_eq!(Season::from_date(date(2004, 12, 21)), Season::Verano);
        assert_eq!(Season::from_date(date(2005, 1, 31)), Season::Verano);
        assert_eq!(Season::from_date(date(2005, 3, 19)), Season::Verano);
    }

    #[test]
    fn test_season_otono_interval() {
        assert_eq!(Season::from_date(date(2005, 3, 20)), Season::Otono);
        assert_eq!(Season::from_date(date(2005, 5, 1)), Season::Otono);
        assert_eq!(Season::from_date(date(2005, 6, 20)), Season::Otono);
    }

    #[test]
    fn test_season_invierno_interval() {
        assert_eq!(Season::from_date(date(2005, 6, 21)), Season::Invierno);
        assert_eq!(Season::from_date(date(2005, 8, 10)), Season::Invierno);
        assert_eq!(Season::from_date(date(2005, 9, 20)), Season::Invierno);
    }

    #[test]
    fn test_season_labels() {
        assert_eq!(Season::Primavera.label(), "Primavera");
        assert_eq!(Season::Verano.label(), "Verano");
        assert_eq!(Season::Otono.label(), "Otoño");
        assert_eq!(Season::Invierno.label(), "Invierno");
    }
}
