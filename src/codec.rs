/*!
 * Shared contract for subtitle codecs.
 *
 * Every format engine turns source text into a `Document` and a `Document`
 * back into text. Codecs for further formats plug in by implementing
 * `SubtitleCodec` on top of the same model.
 */

use std::fmt::Debug;
use std::io::{Read, Write};

use crate::document::Document;
use crate::errors::Result;

/// Common trait for all subtitle format engines
///
/// Implementations are stateless between calls, so one codec value can be
/// shared across threads and reused for any number of documents.
pub trait SubtitleCodec: Send + Sync + Debug {
    /// Short format name, e.g. `"srt"`
    fn name(&self) -> &'static str;

    /// Parse a complete document from text
    ///
    /// # Arguments
    /// * `source` - The full file contents
    ///
    /// # Returns
    /// * `Result<Document>` - The parsed document; no partial document is
    ///   returned on a fatal error
    fn parse_str(&self, source: &str) -> Result<Document>;

    /// Serialize a document to text
    ///
    /// # Returns
    /// * `Result<String>` - The file contents, or `NoSubtitlesToWrite` for a
    ///   document without items
    fn write_string(&self, document: &Document) -> Result<String>;

    /// Read everything from a byte source and parse it
    fn read_from(&self, reader: &mut dyn Read) -> Result<Document> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        self.parse_str(&source)
    }

    /// Serialize and write to a byte sink
    fn write_to(&self, document: &Document, writer: &mut dyn Write) -> Result<()> {
        let text = self.write_string(document)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
