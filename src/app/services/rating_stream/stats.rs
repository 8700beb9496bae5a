//! Parsing statistics for rating stream processing

/// Statistics accumulated across all rating files in a run
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Number of rating files streamed to completion
    pub files_processed: usize,

    /// Number of rating files skipped because they could not be opened
    pub files_skipped: usize,

    /// Total number of lines read across all files
    pub lines_read: usize,

    /// Number of malformed or out-of-block lines skipped
    pub lines_skipped: usize,

    /// Number of movie blocks finalized
    pub movies_emitted: usize,

    /// Skipped-file errors for diagnostics
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines that contributed to an aggregate or opened a block
    pub fn lines_accepted(&self) -> usize {
        self.lines_read.saturating_sub(self.lines_skipped)
    }
}
