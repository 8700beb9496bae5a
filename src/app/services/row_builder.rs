//! Row finalization
//!
//! Turns a closed per-movie aggregate into an immutable report row:
//! catalog lookups with fallback policy, midpoint date arithmetic, and
//! season classification.

use crate::app::models::{MovieAggregate, ReportRow, Season};
use crate::app::services::movie_catalog::MovieCatalog;
use crate::constants::{DATE_INPUT_FORMAT, FALLBACK_PREMIERE_YEAR, UNKNOWN_TITLE};
use crate::{Error, Result};
use chrono::{Days, NaiveDate};

/// Finalize one movie aggregate into a report row
///
/// Title falls back to the sentinel for movies absent from the catalog.
/// An absent premiere year is substituted with the fallback year and the
/// row is flagged so the sink can attach the annotation. A movie with no
/// observed dates produces empty start/end/midpoint and no season; this is
/// the one case where the season label is absent.
pub fn build_row(aggregate: MovieAggregate, catalog: &MovieCatalog) -> Result<ReportRow> {
    let title = catalog
        .title(aggregate.movie_id)
        .unwrap_or(UNKNOWN_TITLE)
        .to_string();

    let (premiere_year, year_defaulted) = match catalog.year(aggregate.movie_id) {
        Some(year) => (year, false),
        None => (FALLBACK_PREMIERE_YEAR, true),
    };

    let start_date = aggregate.min_date.as_deref().map(parse_date).transpose()?;
    let end_date = aggregate.max_date.as_deref().map(parse_date).transpose()?;

    let midpoint_date = match (start_date, end_date) {
        (Some(start), Some(end)) => Some(midpoint(start, end)),
        _ => None,
    };
    let season = midpoint_date.map(Season::from_date);

    Ok(ReportRow {
        movie_id: aggregate.movie_id,
        title,
        premiere_year,
        year_defaulted,
        counts: aggregate.histogram,
        total_ratings: aggregate.date_count,
        start_date,
        end_date,
        midpoint_date,
        season,
    })
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_INPUT_FORMAT)
        .map_err(|e| Error::date_parse(format!("Invalid aggregate date '{}'", date), e))
}

/// Midpoint of the inclusive date range, truncating half-day remainders
fn midpoint(start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span_days = (end - start).num_days() / 2;
    start
        .checked_add_days(Days::new(span_days as u64))
        .unwrap_or(start)
}
