//! Report workbook writer
//!
//! External sink for finalized report rows. Owns the Excel workbook,
//! appends one row per movie in emission order, attaches the premiere-year
//! annotation to substituted rows, and saves the workbook. Writing the
//! report is the sole purpose of a run, so failures here are fatal and
//! propagate to the caller.

use crate::app::models::ReportRow;
use crate::constants::{
    DATE_OUTPUT_FORMAT, DETAIL_SHEET_NAME, PREMIERE_YEAR_COLUMN, REPORT_COLUMNS, YEAR_NOTE_AUTHOR,
    YEAR_NOTE_TEXT,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use rust_xlsxwriter::{Note, Workbook};
use std::path::Path;
use tracing::{debug, info};

/// Writer for the detail report worksheet
pub struct ReportWriter {
    workbook: Workbook,
    next_row: u32,
}

impl ReportWriter {
    /// Create a workbook with the detail worksheet and its header row
    pub fn new() -> Result<Self> {
        let mut workbook = Workbook::new();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(DETAIL_SHEET_NAME)?;
        for (col, header) in REPORT_COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }

        Ok(Self {
            workbook,
            next_row: 1,
        })
    }

    /// Append one finalized row to the detail worksheet
    ///
    /// Dates are rendered `DD-MM-YYYY`; movies without observations get
    /// empty date and season cells. Rows whose premiere year was
    /// substituted receive the annotation note on the year cell.
    pub fn append_row(&mut self, row: &ReportRow) -> Result<()> {
        let row_index = self.next_row;
        let worksheet = self.workbook.worksheet_from_index(0)?;

        worksheet.write_number(row_index, 0, row.movie_id as f64)?;
        worksheet.write_string(row_index, 1, row.title.as_str())?;
        worksheet.write_number(row_index, 2, row.premiere_year as f64)?;
        for (offset, count) in row.counts.iter().enumerate() {
            worksheet.write_number(row_index, 3 + offset as u16, *count as f64)?;
        }
        worksheet.write_number(row_index, 8, row.total_ratings as f64)?;
        worksheet.write_string(row_index, 9, format_date(row.start_date))?;
        worksheet.write_string(row_index, 10, format_date(row.end_date))?;
        worksheet.write_string(row_index, 11, format_date(row.midpoint_date))?;
        worksheet.write_string(
            row_index,
            12,
            row.season.map(|season| season.label()).unwrap_or(""),
        )?;

        if row.year_defaulted {
            debug!(
                "Annotating substituted premiere year for movie {}",
                row.movie_id
            );
            let note = Note::new(YEAR_NOTE_TEXT)
                .set_author(YEAR_NOTE_AUTHOR)
                .add_author_prefix(false);
            worksheet.insert_note(row_index, PREMIERE_YEAR_COLUMN, &note)?;
        }

        self.next_row += 1;
        Ok(())
    }

    /// Number of data rows appended so far
    pub fn rows_written(&self) -> u32 {
        self.next_row.saturating_sub(1)
    }

    /// Save the workbook to the given path
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.workbook.save(path).map_err(|e| {
            Error::report_write(format!("Failed to save report to {}", path.display()), e)
        })?;

        info!(
            "Report saved: {} ({} rows)",
            path.display(),
            self.rows_written()
        );
        Ok(())
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(DATE_OUTPUT_FORMAT).to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Season;
    use tempfile::TempDir;

    fn sample_row(movie_id: u32, year_defaulted: bool) -> ReportRow {
        ReportRow {
            movie_id,
            title: "Titanic".to_string(),
            premiere_year: if year_defaulted { 1900 } else { 1997 },
            year_defaulted,
            counts: [0, 0, 1, 0, 1],
            total_ratings: 2,
            start_date: NaiveDate::from_ymd_opt(1999, 1, 1),
            end_date: NaiveDate::from_ymd_opt(1999, 3, 3),
            midpoint_date: NaiveDate::from_ymd_opt(1999, 1, 31),
            season: Some(Season::Verano),
        }
    }

    #[test]
    fn test_writer_saves_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Analisis.xlsx");

        let mut writer = ReportWriter::new().unwrap();
        writer.append_row(&sample_row(712, false)).unwrap();
        writer.append_row(&sample_row(5, true)).unwrap();
        writer.save(&path).unwrap();

        assert!(path.is_file());
        assert_eq!(writer.rows_written(), 2);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no_such_dir").join("Analisis.xlsx");

        let mut writer = ReportWriter::new().unwrap();
        writer.append_row(&sample_row(1, false)).unwrap();

        assert!(writer.save(&path).is_err());
    }

    #[test]
    fn test_format_date_renders_day_month_year() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(1999, 1, 31)), "31-01-1999");
        assert_eq!(format_date(None), "");
    }
}
