/*!
 * Integration tests for SRT <-> WebVTT conversion
 */

use anyhow::Result;

use subport::{Config, SrtCodec, SubtitleCodec, VoiceSpanMode, WebVttCodec};

use crate::common;

/// Test the full SRT -> WebVTT -> SRT workflow
#[test]
fn test_conversion_workflow_withSrtSource_shouldSurviveBothDirections() -> Result<()> {
    common::init_logging();
    let srt = SrtCodec::default();
    let vtt = WebVttCodec::default();

    // 1. Parse the SRT source
    let doc = srt.parse_str(common::SAMPLE_SRT)?;

    // 2. Convert to WebVTT; SRT payload is text, so markup gets escaped
    let webvtt = vtt.write_string(&doc)?;
    assert!(webvtt.starts_with("WEBVTT\n\n1\n00:00:01.000 --> 00:00:04.000\n"));
    assert!(webvtt.contains("This is a &lt;i&gt;test&lt;/i&gt; subtitle."));
    assert!(webvtt.contains("&amp; two lines."));

    // 3. Parse the WebVTT back; entities decode to the original text
    let reparsed = vtt.parse_str(&webvtt)?;
    assert_eq!(reparsed.len(), doc.len());
    for (before, after) in doc.items().iter().zip(reparsed.items()) {
        assert_eq!(before.start(), after.start());
        assert_eq!(before.end(), after.end());
        assert_eq!(before.plain_text(), after.plain_text());
    }

    // 4. Back to SRT gives the original file
    assert_eq!(srt.write_string(&reparsed)?, common::SAMPLE_SRT);
    Ok(())
}

/// Test that structured WebVTT keeps basic formatting when written as SRT
#[test]
fn test_conversion_workflow_withWebvttSource_shouldKeepBasicTags() -> Result<()> {
    let doc = WebVttCodec::default().parse_str(common::SAMPLE_WEBVTT)?;
    let srt = SrtCodec::default().write_string(&doc)?;

    assert_eq!(
        srt,
        "1\n00:00:01,000 --> 00:00:03,500\nIt's a <b>blue</b> apple tree!\n\n2\n00:00:04,000 --> 00:00:06,000\nNo way!\n<i>whispers</i>\n"
    );
    Ok(())
}

/// Test the properties a media pipeline relies on when reformatting WebVTT
#[test]
fn test_conversion_workflow_withConfigFile_shouldDriveBothCodecs() -> Result<()> {
    let config = Config::from_json_str(
        r#"{
            "parse": {"strict": true},
            "write": {"voice_spans": "strict", "srt_formatting_tags": false},
            "log_level": "trace"
        }"#,
    )?;
    assert_eq!(config.write.voice_spans, VoiceSpanMode::Strict);

    let vtt = WebVttCodec::new(&config);
    let srt = SrtCodec::new(&config);
    assert_eq!(vtt.name(), "webvtt");
    assert_eq!(srt.name(), "srt");

    let doc = vtt.parse_str(common::SAMPLE_WEBVTT)?;
    assert!(vtt.write_string(&doc)?.contains("<v Mary>No way!</v>"));
    assert!(srt.write_string(&doc)?.contains("\nwhispers\n"));
    Ok(())
}

/// Test writing through trait objects so formats can be chosen at runtime
#[test]
fn test_conversion_workflow_withDynCodecs_shouldDispatch() -> Result<()> {
    let codecs: Vec<Box<dyn SubtitleCodec>> =
        vec![Box::new(SrtCodec::default()), Box::new(WebVttCodec::default())];

    let doc = codecs[0].parse_str(&common::generate_srt(5))?;
    for codec in &codecs {
        let text = codec.write_string(&doc)?;
        let again = codec.parse_str(&text)?;
        assert_eq!(again.len(), 5, "{} round trip", codec.name());
    }
    Ok(())
}
