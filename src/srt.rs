/*!
 * SubRip (SRT) codec.
 *
 * A block is an optional sequence number, one `start --> end` timing line
 * with comma-decimal times, and payload lines carried verbatim. Sequence
 * numbers are decorative: they are dropped on parse and regenerated from 1
 * on write.
 */

use std::fmt;
use std::io::{Read, Write};

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::blocks::{Block, split_blocks};
use crate::codec::SubtitleCodec;
use crate::config::Config;
use crate::cue_text::{Line, to_srt};
use crate::document::{Document, Item};
use crate::errors::{Result, SubtitleError};
use crate::time::{TimeFormat, Timestamp};

// Anything after the end time (e.g. "X1:100 X2:200") is ignored
static TIMING_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+)\s*-->\s*(\S+)").unwrap());

/// SRT parser and writer
#[derive(Debug, Clone)]
pub struct SrtCodec {
    strict: bool,
    formatting_tags: bool,
}

impl SrtCodec {
    /// Create a codec from the parse and write settings of `config`
    pub fn new(config: &Config) -> Self {
        Self {
            strict: config.parse.strict,
            formatting_tags: config.write.srt_formatting_tags,
        }
    }

    fn parse_block(&self, block: &Block<'_>) -> Result<Option<Item>> {
        let mut lines = block.lines.iter().copied();

        // Sequence number is optional; when the first line is not an integer
        // it must already be the timing line
        let mut timing = lines.next().unwrap_or_default();
        if timing.parse::<u64>().is_ok() {
            timing = lines.next().unwrap_or_default();
        }

        if !timing.contains("-->") {
            let reason = format!("expected a timing line, found {:?}", timing);
            if self.strict {
                return Err(SubtitleError::malformed(block.line_number, reason));
            }
            warn!("Skipping SRT block at line {}: {}", block.line_number, reason);
            return Ok(None);
        }

        let (start, end) = parse_timing_line(timing)?;
        let payload = lines.map(Line::from_text).collect();

        Item::new(start, end, payload).map(Some)
    }
}

impl Default for SrtCodec {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

fn parse_timing_line(line: &str) -> Result<(Timestamp, Timestamp)> {
    let caps = TIMING_LINE_REGEX
        .captures(line)
        .ok_or_else(|| SubtitleError::InvalidTimestamp(line.to_string()))?;

    let start = Timestamp::parse(&caps[1], TimeFormat::Srt)?;
    let end = Timestamp::parse(&caps[2], TimeFormat::Srt)?;
    Ok((start, end))
}

/// One numbered output block, terminated by a newline
struct SrtBlock<'a> {
    number: usize,
    item: &'a Item,
    formatting_tags: bool,
}

impl fmt::Display for SrtBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.number)?;
        writeln!(
            f,
            "{} --> {}",
            self.item.start().format(TimeFormat::Srt),
            self.item.end().format(TimeFormat::Srt)
        )?;
        // A blank payload line would end the block early
        for text in self.item.lines.iter().map(|line| to_srt(line, self.formatting_tags)) {
            if !text.trim().is_empty() {
                writeln!(f, "{}", text)?;
            }
        }
        Ok(())
    }
}

impl SubtitleCodec for SrtCodec {
    fn name(&self) -> &'static str {
        "srt"
    }

    fn parse_str(&self, source: &str) -> Result<Document> {
        let mut document = Document::new();

        for block in split_blocks(source) {
            if let Some(item) = self.parse_block(&block)? {
                document.push_item(item)?;
            }
        }

        debug!("Parsed {} SRT item(s)", document.len());
        Ok(document)
    }

    fn write_string(&self, document: &Document) -> Result<String> {
        if document.is_empty() {
            return Err(SubtitleError::NoSubtitlesToWrite);
        }

        let blocks: Vec<String> = document
            .items()
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                SrtBlock {
                    number: idx + 1,
                    item,
                    formatting_tags: self.formatting_tags,
                }
                .to_string()
            })
            .collect();

        Ok(blocks.join("\n"))
    }
}

/// Parse SRT from a byte source with the default configuration
pub fn parse_srt<R: Read>(mut reader: R) -> Result<Document> {
    SrtCodec::default().read_from(&mut reader)
}

/// Write a document as SRT with the default configuration
pub fn write_srt<W: Write>(document: &Document, mut writer: W) -> Result<()> {
    SrtCodec::default().write_to(document, &mut writer)
}
