/*!
 * WebVTT block parser.
 *
 * The first block is the header (`WEBVTT` plus optional `X-TIMESTAMP-MAP`).
 * Every following block is a NOTE, REGION, STYLE or cue block.
 */

use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::blocks::{Block, split_blocks};
use crate::cue_text::{Line, parse_line};
use crate::document::{Document, Item, Region, StyleAttributes};
use crate::errors::{Result, SubtitleError};
use crate::time::{TimeFormat, Timestamp};

static TIMING_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+?)\s*-->\s*(\S+)(.*)$").unwrap());

static TIMESTAMP_MAP_FIELD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(MPEGTS|LOCAL)\s*:\s*([^,\s]+)").unwrap());

const SIGNATURE: &str = "WEBVTT";
const TIMESTAMP_MAP_PREFIX: &str = "X-TIMESTAMP-MAP=";

/// MPEG-TS presentation clock rate
const MPEGTS_TICKS_PER_SECOND: u64 = 90_000;

/// Parse state for a single document
pub(crate) struct WebVttParser {
    strict: bool,
    document: Document,
    pending_comments: Vec<String>,
    shift_ms: i64,
}

impl WebVttParser {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            document: Document::new(),
            pending_comments: Vec::new(),
            shift_ms: 0,
        }
    }

    pub fn parse(mut self, source: &str) -> Result<Document> {
        let mut blocks = split_blocks(source).into_iter();

        let header = blocks
            .next()
            .ok_or_else(|| SubtitleError::InvalidHeader("empty input".to_string()))?;
        if let Some(cue) = self.parse_header(&header)? {
            self.parse_cue(&cue)?;
        }

        for block in blocks {
            self.parse_block(&block)?;
        }

        // NOTE blocks after the last cue belong to the document
        self.document
            .metadata
            .comments
            .append(&mut self.pending_comments);

        debug!(
            "Parsed {} WebVTT item(s), {} region(s)",
            self.document.len(),
            self.document.regions().len()
        );
        Ok(self.document)
    }

    /// Read the signature and header fields. A cue that follows the header
    /// without a blank line is split off and returned.
    fn parse_header<'a>(&mut self, block: &Block<'a>) -> Result<Option<Block<'a>>> {
        let signature = block.first();
        let title = keyword_rest(signature, SIGNATURE)
            .ok_or_else(|| SubtitleError::InvalidHeader(signature.to_string()))?;
        if !title.is_empty() {
            self.document.metadata.title = Some(title.to_string());
        }

        let cue_start = block.lines[1..]
            .iter()
            .position(|line| line.contains("-->"))
            .map(|idx| idx + 1);
        let header_end = cue_start.unwrap_or(block.lines.len());

        for line in &block.lines[1..header_end] {
            match line.strip_prefix(TIMESTAMP_MAP_PREFIX) {
                Some(fields) => {
                    self.shift_ms = parse_timestamp_map(fields)?;
                    debug!("X-TIMESTAMP-MAP shifts cues by {}ms", self.shift_ms);
                }
                None => debug!("Ignoring header line {:?}", line),
            }
        }

        Ok(cue_start.map(|idx| {
            let line_number = block.line_number + idx;
            warn!("Cue at line {} is not separated from the header", line_number);
            Block {
                line_number,
                lines: block.lines[idx..].to_vec(),
            }
        }))
    }

    fn parse_block(&mut self, block: &Block<'_>) -> Result<()> {
        let first = block.first();

        if let Some(rest) = keyword_rest(first, "NOTE") {
            self.pending_comments.extend(
                std::iter::once(rest)
                    .filter(|text| !text.is_empty())
                    .chain(block.lines[1..].iter().copied())
                    .map(String::from),
            );
            Ok(())
        } else if first == "REGION" {
            self.parse_region(block)
        } else if first == "STYLE" {
            let sheet = block.lines[1..].join("\n");
            if !sheet.is_empty() {
                self.document.metadata.style_sheets.push(sheet);
            }
            Ok(())
        } else {
            self.parse_cue(block)
        }
    }

    fn parse_region(&mut self, block: &Block<'_>) -> Result<()> {
        let mut id = None;
        let mut style = StyleAttributes::default();

        // Settings may be one per line or space separated
        for token in block.lines[1..].iter().flat_map(|line| line.split_whitespace()) {
            let Some((key, value)) = token.split_once(':') else {
                debug!("Ignoring region token {:?}", token);
                continue;
            };
            match key {
                "id" => id = Some(value.to_string()),
                "lines" => match value.parse() {
                    Ok(lines) => style.lines = Some(lines),
                    Err(_) => warn!("Ignoring invalid region line count {:?}", value),
                },
                "regionanchor" | "region-anchor" => style.region_anchor = Some(value.to_string()),
                "viewportanchor" | "viewport-anchor" => {
                    style.viewport_anchor = Some(value.to_string())
                }
                "scroll" => style.scroll = Some(value.to_string()),
                "width" => style.width = Some(value.to_string()),
                _ => debug!("Ignoring region setting {:?}", token),
            }
        }

        let Some(id) = id else {
            return self.reject(block, "REGION block without an id");
        };

        let mut region = Region::new(id);
        if !style.is_empty() {
            region.style = Some(style);
        }
        self.document.insert_region(region)
    }

    fn parse_cue(&mut self, block: &Block<'_>) -> Result<()> {
        // Optional identifier line before the timing line
        let timing_idx = match block.lines.iter().take(2).position(|line| line.contains("-->")) {
            Some(idx) => idx,
            None => return self.reject(block, "block is neither a cue nor a known keyword"),
        };
        let timing = block.lines[timing_idx];

        let caps = TIMING_LINE_REGEX
            .captures(timing)
            .ok_or_else(|| SubtitleError::InvalidTimestamp(timing.to_string()))?;
        let start = Timestamp::parse(&caps[1], TimeFormat::WebVtt)?.shifted(self.shift_ms);
        let end = Timestamp::parse(&caps[2], TimeFormat::WebVtt)?.shifted(self.shift_ms);
        let (style, region) = parse_cue_settings(&caps[3]);

        // Payloads such as "<>" carry no nodes and are not kept
        let lines: Vec<Line> = block.lines[timing_idx + 1..]
            .iter()
            .map(|line| parse_line(line))
            .filter(|line| !line.is_empty())
            .map(|mut line| {
                line.shift(self.shift_ms);
                line
            })
            .collect();

        let mut item = Item::new(start, end, lines)?;
        if !style.is_empty() {
            item.inline_style = Some(style);
        }
        item.region = self.resolve_region(region)?;
        item.comments = std::mem::take(&mut self.pending_comments);

        trace!("Cue {} --> {} with {} line(s)", start, end, item.lines.len());
        self.document.push_item(item)
    }

    fn resolve_region(&self, region: Option<String>) -> Result<Option<String>> {
        match region {
            Some(id) if !self.document.regions().contains(&id) => {
                if self.strict {
                    return Err(SubtitleError::UnknownRegion(id));
                }
                warn!("Dropping reference to unknown region {:?}", id);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    fn reject(&self, block: &Block<'_>, reason: &str) -> Result<()> {
        if self.strict {
            return Err(SubtitleError::malformed(block.line_number, reason));
        }
        warn!("Skipping WebVTT block at line {}: {}", block.line_number, reason);
        Ok(())
    }
}

/// Text after `keyword` if the line is that keyword alone or followed by
/// whitespace
fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// `MPEGTS:<ticks>,LOCAL:<timestamp>` in any order. Returns the signed
/// millisecond shift `ticks / 90kHz - local`.
fn parse_timestamp_map(fields: &str) -> Result<i64> {
    let invalid = || SubtitleError::InvalidTimestamp(format!("{}{}", TIMESTAMP_MAP_PREFIX, fields));
    let mut mpegts_ms: u64 = 0;
    let mut local = Timestamp::ZERO;

    for caps in TIMESTAMP_MAP_FIELD_REGEX.captures_iter(fields) {
        match &caps[1] {
            "MPEGTS" => {
                let ticks: u64 = caps[2].parse().map_err(|_| invalid())?;
                mpegts_ms = ticks.checked_mul(1000).ok_or_else(invalid)? / MPEGTS_TICKS_PER_SECOND;
            }
            _ => local = Timestamp::parse(&caps[2], TimeFormat::WebVtt)?,
        }
    }

    let mpegts_ms = i64::try_from(mpegts_ms).map_err(|_| invalid())?;
    let local_ms = i64::try_from(local.as_millis()).map_err(|_| invalid())?;
    Ok(mpegts_ms - local_ms)
}

/// Split `align:left position:10%,start region:fred` into inline style and
/// region reference
fn parse_cue_settings(settings: &str) -> (StyleAttributes, Option<String>) {
    let mut style = StyleAttributes::default();
    let mut region = None;

    for token in settings.split_whitespace() {
        let Some((key, value)) = token.split_once(':') else {
            debug!("Ignoring cue setting {:?}", token);
            continue;
        };
        let value = value.to_string();
        match key {
            "align" => style.align = Some(value),
            "line" => style.line = Some(value),
            "position" => style.position = Some(value),
            "size" => style.size = Some(value),
            "vertical" => style.vertical = Some(value),
            "region" => region = Some(value),
            _ => debug!("Ignoring cue setting {:?}", token),
        }
    }

    (style, region)
}
