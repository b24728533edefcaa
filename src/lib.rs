/*!
 * # subport - SubRip and WebVTT subtitle conversion
 *
 * A Rust library that reads SRT and WebVTT files into one document model and
 * writes either format back out.
 *
 * ## Features
 *
 * - SRT parsing with optional sequence numbers and renumbering on write
 * - WebVTT parsing with:
 *   - NOTE comments, REGION and STYLE blocks
 *   - Cue settings (align, line, position, region, size, vertical)
 *   - `X-TIMESTAMP-MAP` remapping for MPEG-TS segments
 * - Structured cue text (`<b>`, `<i>`, `<u>`, `<c>`, `<v>`, `<lang>`, `<ruby>`,
 *   custom tags and inline timestamps) with HTML entity handling
 * - Document operations: shift, merge, sort, optimize, remove styling
 * - Strict or tolerant parsing, configurable from JSON
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `document`: Items, regions and metadata shared by every codec
 * - `cue_text`: Cue-text tag tree with its parser and serializers
 * - `time`: Millisecond timestamps and their SRT/WebVTT renderings
 * - `escape`: HTML entity escaping for WebVTT text
 * - `codec`: The `SubtitleCodec` trait
 * - `srt`, `webvtt`: The two format engines
 * - `config`: Parse and write settings
 * - `errors`: Custom error types for the library
 *
 * ## Example
 *
 * ```
 * use subport::{SrtCodec, SubtitleCodec, WebVttCodec};
 *
 * let srt = "1\n00:00:01,000 --> 00:00:02,500\nHello & welcome\n";
 * let document = SrtCodec::default().parse_str(srt).unwrap();
 * let vtt = WebVttCodec::default().write_string(&document).unwrap();
 *
 * assert_eq!(vtt, "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.500\nHello &amp; welcome\n");
 * ```
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

mod blocks;

// Public modules
pub mod codec;
pub mod config;
pub mod cue_text;
pub mod document;
pub mod errors;
pub mod escape;
pub mod srt;
pub mod time;
pub mod webvtt;

// Re-export main types for easier usage
pub use codec::SubtitleCodec;
pub use config::{Config, LogLevel, ParseConfig, VoiceSpanMode, WriteConfig};
pub use cue_text::{Line, Node, Span};
pub use document::{Document, Item, Metadata, Region, RegionMap, StyleAttributes};
pub use errors::{Result, SubtitleError};
pub use srt::{SrtCodec, parse_srt, write_srt};
pub use time::{TimeFormat, Timestamp};
pub use webvtt::{WebVttCodec, parse_webvtt, write_webvtt};
