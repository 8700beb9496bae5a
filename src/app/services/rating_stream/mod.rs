//! Rating stream parser service
//!
//! Streams segmented rating files line by line and groups rating lines into
//! per-movie blocks. A block opens at a `<movie-id>:` header and closes at
//! the next header or end of input; closed blocks are handed to the caller
//! as finished [`MovieAggregate`](crate::app::models::MovieAggregate)
//! values as soon as the boundary is detected.

mod parser;
mod stats;

#[cfg(test)]
mod tests;

pub use parser::{BlockParser, process_file};
pub use stats::ParseStats;
