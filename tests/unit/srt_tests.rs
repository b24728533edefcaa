/*!
 * Tests for the SRT codec
 */

use anyhow::Result;

use subport::errors::SubtitleError;
use subport::{Config, Document, SrtCodec, SubtitleCodec, parse_srt, write_srt};

use crate::common;

#[test]
fn test_parseSrt_withSampleFile_shouldReadAllEntries() -> Result<()> {
    common::init_logging();
    let doc = parse_srt(common::SAMPLE_SRT.as_bytes())?;

    assert_eq!(doc.len(), 3);
    assert_eq!(doc.items()[0].plain_text(), "This is a <i>test</i> subtitle.");
    assert_eq!(doc.items()[1].lines.len(), 2);
    assert_eq!(doc.items()[1].lines[1].plain_text(), "& two lines.");
    assert_eq!(doc.duration().as_millis(), 14_000);
    Ok(())
}

#[test]
fn test_writeSrt_afterParse_shouldReproduceInput() -> Result<()> {
    let doc = parse_srt(common::SAMPLE_SRT.as_bytes())?;

    let mut out = Vec::new();
    write_srt(&doc, &mut out)?;

    assert_eq!(String::from_utf8(out)?, common::SAMPLE_SRT);
    Ok(())
}

#[test]
fn test_parseSrt_withCrlfAndBom_shouldMatchUnixInput() -> Result<()> {
    let windows = format!("\u{feff}{}", common::SAMPLE_SRT.replace('\n', "\r\n"));

    assert_eq!(parse_srt(windows.as_bytes())?, parse_srt(common::SAMPLE_SRT.as_bytes())?);
    Ok(())
}

#[test]
fn test_parseSrt_withGeneratedEntries_shouldRoundTrip() -> Result<()> {
    let source = common::generate_srt(250);
    let codec = SrtCodec::default();

    let doc = codec.parse_str(&source)?;
    let again = codec.parse_str(&codec.write_string(&doc)?)?;

    assert_eq!(doc.len(), 250);
    assert_eq!(again, doc);
    Ok(())
}

#[test]
fn test_writeSrt_withEmptyDocument_shouldFail() {
    let result = write_srt(&Document::new(), Vec::new());
    assert!(matches!(result, Err(SubtitleError::NoSubtitlesToWrite)));
}

#[test]
fn test_parseSrt_withGarbageBlock_shouldRespectStrictness() {
    let source = "garbage\n\n1\n00:00:01,000 --> 00:00:02,000\nHi\n";
    assert_eq!(parse_srt(source.as_bytes()).unwrap().len(), 1);

    let config = Config::from_json_str(r#"{"parse": {"strict": true}}"#).unwrap();
    let result = SrtCodec::new(&config).parse_str(source);
    assert!(matches!(result, Err(SubtitleError::MalformedBlock { line: 1, .. })));
}

#[test]
fn test_srtCodec_withoutFormattingTags_shouldFlattenSpans() -> Result<()> {
    let vtt = subport::parse_webvtt("WEBVTT\n\n00:01.000 --> 00:02.000\n<b>Loud</b> and <i>clear</i>\n".as_bytes())?;

    let config = Config::from_json_str(r#"{"write": {"srt_formatting_tags": false}}"#)?;
    let text = SrtCodec::new(&config).write_string(&vtt)?;

    assert_eq!(text, "1\n00:00:01,000 --> 00:00:02,000\nLoud and clear\n");
    Ok(())
}
