//! Movie catalog service
//!
//! Loads the movie metadata reference file once at startup and provides
//! O(1) title and premiere-year lookups keyed by movie id. The catalog is
//! immutable after loading.

mod loader;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::time::Duration;

use crate::app::models::MovieMetadata;

/// In-memory movie metadata catalog
///
/// Holds two mappings built from the reference file: id to title and id to
/// optional premiere year. A movie can be present with an absent year; the
/// fallback policy for such movies lives in the row finalizer, not here.
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    titles: HashMap<u32, String>,
    years: HashMap<u32, i32>,
}

impl MovieCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one metadata record, replacing any previous entry for the id
    pub fn insert(&mut self, metadata: MovieMetadata) {
        if let Some(year) = metadata.premiere_year {
            self.years.insert(metadata.id, year);
        } else {
            self.years.remove(&metadata.id);
        }
        self.titles.insert(metadata.id, metadata.title);
    }

    /// Look up a movie title
    pub fn title(&self, movie_id: u32) -> Option<&str> {
        self.titles.get(&movie_id).map(String::as_str)
    }

    /// Look up a premiere year; absent for unknown movies and `NULL` years
    pub fn year(&self, movie_id: u32) -> Option<i32> {
        self.years.get(&movie_id).copied()
    }

    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the catalog holds no movies
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Statistics collected while loading the catalog
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Number of metadata records loaded into the catalog
    pub records_loaded: usize,

    /// Number of malformed lines skipped
    pub records_skipped: usize,

    /// Number of records whose premiere year was absent or `NULL`
    pub null_years: usize,

    /// Total loading time
    pub load_duration: Duration,

    /// Loading errors for diagnostics
    pub errors: Vec<String>,
}

impl LoadStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }
}
