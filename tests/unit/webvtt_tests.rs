/*!
 * Tests for the WebVTT codec
 */

use anyhow::Result;

use subport::errors::SubtitleError;
use subport::{Config, SubtitleCodec, VoiceSpanMode, WebVttCodec, parse_webvtt, write_webvtt};

use crate::common;

#[test]
fn test_parseWebvtt_withSampleFile_shouldReadEveryBlockKind() -> Result<()> {
    common::init_logging();
    let doc = parse_webvtt(common::SAMPLE_WEBVTT.as_bytes())?;

    assert_eq!(doc.metadata.title.as_deref(), Some("Sample"));
    assert_eq!(doc.metadata.style_sheets.len(), 1);
    assert_eq!(doc.regions().len(), 1);
    assert_eq!(doc.len(), 2);

    let first = &doc.items()[0];
    assert_eq!(first.comments, vec!["opening scene".to_string()]);
    assert_eq!(doc.region_of(first).map(|r| r.id.as_str()), Some("top"));
    assert_eq!(first.lines[0].voice_name(), Some("Esme"));
    assert_eq!(first.plain_text(), "It's a blue apple tree!");

    let second = &doc.items()[1];
    let style = second.inline_style.as_ref().expect("inline style");
    assert_eq!(style.align.as_deref(), Some("start"));
    assert_eq!(style.line.as_deref(), Some("90%"));
    assert_eq!(second.plain_text(), "No way! - whispers");
    Ok(())
}

#[test]
fn test_writeWebvtt_afterParse_shouldBeCanonical() -> Result<()> {
    let doc = parse_webvtt(common::SAMPLE_WEBVTT.as_bytes())?;
    let mut out = Vec::new();
    write_webvtt(&doc, &mut out)?;

    let expected = "WEBVTT Sample

REGION
id:top
width:80%
lines:2
regionanchor:0%,0%
viewportanchor:10%,10%

STYLE
::cue(v[voice=\"Esme\"]) { color: cyan }

NOTE opening scene

1
00:00:01.000 --> 00:00:03.500 region:top
<v Esme>It's a <b>blue</b> apple tree!

2
00:00:04.000 --> 00:00:06.000 align:start line:90%
<v Mary>No way!
<i>whispers</i>
";
    assert_eq!(String::from_utf8(out)?, expected);

    // Canonical output is a fixed point
    let again = WebVttCodec::default().write_string(&parse_webvtt(expected.as_bytes())?)?;
    assert_eq!(again, expected);
    Ok(())
}

#[test]
fn test_writeWebvtt_withStrictVoiceSpans_shouldCloseVoices() -> Result<()> {
    let mut config = Config::default();
    config.write.voice_spans = VoiceSpanMode::Strict;
    let codec = WebVttCodec::new(&config);

    let doc = codec.parse_str(common::SAMPLE_WEBVTT)?;
    let text = codec.write_string(&doc)?;

    assert!(text.contains("\n<v Mary>No way!</v>\n"));
    assert!(text.contains("\n<v Esme>It's a <b>blue</b> apple tree!</v>\n"));
    Ok(())
}

#[test]
fn test_parseWebvtt_withTimestampMapAndLocalOffset_shouldShiftBack() -> Result<()> {
    let source = "WEBVTT\nX-TIMESTAMP-MAP=LOCAL:00:00:10.000,MPEGTS:900000\n\n00:00:12.000 --> 00:00:13.000\nHi\n";
    let doc = parse_webvtt(source.as_bytes())?;

    // 900000 ticks is 10s, matching LOCAL, so times are unchanged
    assert_eq!(doc.items()[0].start().as_millis(), 12_000);
    assert_eq!(doc.items()[0].end().as_millis(), 13_000);
    Ok(())
}

#[test]
fn test_parseWebvtt_withNegativeShift_shouldClampAtZero() -> Result<()> {
    let source = "WEBVTT\nX-TIMESTAMP-MAP=MPEGTS:0,LOCAL:00:00:05.000\n\n00:00:02.000 --> 00:00:08.000\nHi\n";
    let doc = parse_webvtt(source.as_bytes())?;

    assert_eq!(doc.items()[0].start().as_millis(), 0);
    assert_eq!(doc.items()[0].end().as_millis(), 3000);
    Ok(())
}

#[test]
fn test_parseWebvtt_withBadTimestamp_shouldFailWholeDocument() {
    let source = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nfine\n\n00:00:03.000 --> 00:0x:04.000\nbroken\n";
    assert!(matches!(
        parse_webvtt(source.as_bytes()),
        Err(SubtitleError::InvalidTimestamp(_))
    ));
}

#[test]
fn test_parseWebvtt_withRegionMissingId_shouldRespectStrictness() {
    let source = "WEBVTT\n\nREGION\nwidth:40%\n\n00:01.000 --> 00:02.000\nHi\n";

    let doc = parse_webvtt(source.as_bytes()).unwrap();
    assert!(doc.regions().is_empty());
    assert_eq!(doc.len(), 1);

    let config = Config::from_json_str(r#"{"parse": {"strict": true}}"#).unwrap();
    assert!(matches!(
        WebVttCodec::new(&config).parse_str(source),
        Err(SubtitleError::MalformedBlock { line: 3, .. })
    ));
}
