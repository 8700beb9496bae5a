//! Block parser implementation
//!
//! The per-movie accumulator lifecycle is a small explicit state machine:
//! `Idle` until the first header, `Accumulating` while inside a block.
//! Three transitions exist: header while idle opens a block, header while
//! accumulating closes the previous block and opens the next, and a data
//! line folds into the open block. Keeping the machine as a value with
//! `push_line`/`finish` makes finalize-on-boundary behavior testable
//! without touching the filesystem.

use super::stats::ParseStats;
use crate::app::models::{MovieAggregate, RatingEvent};
use crate::constants::MOVIE_HEADER_PATTERN;
use crate::Result;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

fn header_regex() -> &'static Regex {
    static HEADER_RE: OnceLock<Regex> = OnceLock::new();
    HEADER_RE.get_or_init(|| Regex::new(MOVIE_HEADER_PATTERN).expect("hard-coded header pattern"))
}

/// Accumulator state for the line loop
#[derive(Debug)]
enum ParserState {
    /// No movie block is open yet
    Idle,
    /// A block is open and collecting rating lines
    Accumulating(MovieAggregate),
}

/// Streaming per-movie block parser
///
/// Feed lines in file order with [`push_line`](Self::push_line); every
/// closed block is returned at the boundary that closed it. Call
/// [`finish`](Self::finish) at end of input to close the final block.
#[derive(Debug)]
pub struct BlockParser {
    state: ParserState,
}

impl BlockParser {
    /// Create a parser with no open block
    pub fn new() -> Self {
        Self {
            state: ParserState::Idle,
        }
    }

    /// Consume one line, returning the previous block if this line closed it
    ///
    /// Malformed lines and rating lines outside any block are counted and
    /// skipped; they never abort the stream.
    pub fn push_line(&mut self, line: &str, stats: &mut ParseStats) -> Option<MovieAggregate> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(caps) = header_regex().captures(line) {
            let movie_id = match caps[1].parse::<u32>() {
                Ok(movie_id) => movie_id,
                Err(e) => {
                    stats.lines_skipped += 1;
                    warn!("Skipped movie header '{}': {}", line, e);
                    return None;
                }
            };

            let previous = std::mem::replace(
                &mut self.state,
                ParserState::Accumulating(MovieAggregate::new(movie_id)),
            );
            return match previous {
                ParserState::Accumulating(aggregate) => Some(aggregate),
                ParserState::Idle => None,
            };
        }

        match line.parse::<RatingEvent>() {
            Ok(event) => match &mut self.state {
                ParserState::Accumulating(aggregate) => aggregate.record(&event),
                ParserState::Idle => {
                    stats.lines_skipped += 1;
                    debug!("Skipped rating line outside any movie block: '{}'", line);
                }
            },
            Err(e) => {
                stats.lines_skipped += 1;
                debug!("Skipped rating line '{}': {}", line, e);
            }
        }

        None
    }

    /// Close and return the block left open at end of input, if any
    pub fn finish(&mut self) -> Option<MovieAggregate> {
        match std::mem::replace(&mut self.state, ParserState::Idle) {
            ParserState::Accumulating(aggregate) => Some(aggregate),
            ParserState::Idle => None,
        }
    }
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream one rating file, invoking `on_block` for every closed movie block
///
/// The file is read line by line so arbitrarily large inputs stay in
/// bounded memory, and the handle is scoped to this call. A file that
/// cannot be opened is skipped with a warning and `Ok(false)` is returned;
/// read failures mid-file are unrecoverable and propagate.
pub fn process_file<F>(path: &Path, stats: &mut ParseStats, mut on_block: F) -> Result<bool>
where
    F: FnMut(MovieAggregate) -> Result<()>,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Skipping rating file {}: {}", path.display(), e);
            stats.files_skipped += 1;
            stats.errors.push(format!("{}: {}", path.display(), e));
            return Ok(false);
        }
    };

    debug!("Streaming rating file: {}", path.display());

    let reader = BufReader::new(file);
    let mut parser = BlockParser::new();

    for line in reader.lines() {
        let line = line.map_err(|e| {
            crate::Error::io(format!("Failed reading {}", path.display()), e)
        })?;
        stats.lines_read += 1;

        if let Some(aggregate) = parser.push_line(&line, stats) {
            stats.movies_emitted += 1;
            on_block(aggregate)?;
        }
    }

    if let Some(aggregate) = parser.finish() {
        stats.movies_emitted += 1;
        on_block(aggregate)?;
    }

    stats.files_processed += 1;
    info!(
        "Finished rating file {}: {} lines read",
        path.display(),
        stats.lines_read
    );

    Ok(true)
}
