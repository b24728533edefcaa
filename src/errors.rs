/*!
 * Error types for the subport library.
 *
 * Every fallible parse, write and model operation returns `SubtitleError`
 * through the crate-wide `Result` alias.
 */

use thiserror::Error;

use crate::time::Timestamp;

/// Errors that can occur while parsing, building or writing subtitles
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Timestamp text does not match the expected `HH:MM:SS<sep>mmm` shape
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// An item would end before it starts
    #[error("Invalid time range: start {start} is after end {end}")]
    InvalidTimeRange {
        /// Start of the rejected range
        start: Timestamp,
        /// End of the rejected range
        end: Timestamp,
    },

    /// A region with the same identifier is already registered
    #[error("Duplicate region: {0}")]
    DuplicateRegion(String),

    /// An item references a region the document does not define
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// Write attempted on a document without items
    #[error("No subtitles to write")]
    NoSubtitlesToWrite,

    /// A block matches none of the recognized grammar shapes
    #[error("Malformed block at line {line}: {reason}")]
    MalformedBlock {
        /// 1-based line number where the block starts
        line: usize,
        /// What was wrong with the block
        reason: String,
    },

    /// The WebVTT signature line is missing or wrong
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Failure of the underlying byte source or sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SubtitleError {
    /// Shorthand for a malformed block error
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedBlock {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SubtitleError>;
