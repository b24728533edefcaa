/*!
 * WebVTT codec.
 *
 * Supports the header title, `X-TIMESTAMP-MAP` remapping of MPEG-TS
 * segments, NOTE comments, REGION and STYLE blocks, cue settings and
 * structured cue text.
 */

mod parser;
mod writer;

use std::io::{Read, Write};

use crate::codec::SubtitleCodec;
use crate::config::{Config, VoiceSpanMode};
use crate::document::Document;
use crate::errors::Result;

use parser::WebVttParser;

/// WebVTT parser and writer
#[derive(Debug, Clone)]
pub struct WebVttCodec {
    strict: bool,
    voice_spans: VoiceSpanMode,
}

impl WebVttCodec {
    /// Create a codec from the parse and write settings of `config`
    pub fn new(config: &Config) -> Self {
        Self {
            strict: config.parse.strict,
            voice_spans: config.write.voice_spans,
        }
    }
}

impl Default for WebVttCodec {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl SubtitleCodec for WebVttCodec {
    fn name(&self) -> &'static str {
        "webvtt"
    }

    fn parse_str(&self, source: &str) -> Result<Document> {
        WebVttParser::new(self.strict).parse(source)
    }

    fn write_string(&self, document: &Document) -> Result<String> {
        writer::write_document(document, self.voice_spans)
    }
}

/// Parse WebVTT from a byte source with the default configuration
pub fn parse_webvtt<R: Read>(mut reader: R) -> Result<Document> {
    WebVttCodec::default().read_from(&mut reader)
}

/// Write a document as WebVTT with the default configuration
pub fn write_webvtt<W: Write>(document: &Document, mut writer: W) -> Result<()> {
    WebVttCodec::default().write_to(document, &mut writer)
}
