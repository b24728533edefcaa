/*!
 * Integration tests for file-backed reading and writing
 */

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};

use anyhow::Result;

use subport::{SrtCodec, SubtitleCodec, WebVttCodec, parse_srt, parse_webvtt, write_webvtt};

use crate::common;

/// Test converting an SRT file on disk into a WebVTT file on disk
#[test]
fn test_file_io_withSrtFile_shouldWriteWebvttFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "movie.srt", common::SAMPLE_SRT)?;
    let target = temp_dir.path().join("movie.vtt");

    let doc = parse_srt(BufReader::new(File::open(&source)?))?;
    write_webvtt(&doc, BufWriter::new(File::create(&target)?))?;

    let written = fs::read_to_string(&target)?;
    assert!(written.starts_with("WEBVTT\n\n"));
    assert!(written.ends_with("For testing purposes.\n"));

    let reread = parse_webvtt(File::open(&target)?)?;
    assert_eq!(reread.len(), 3);
    Ok(())
}

/// Test the trait's reader and writer helpers against real files
#[test]
fn test_file_io_withTraitHelpers_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "sample.vtt", common::SAMPLE_WEBVTT)?;
    let target = temp_dir.path().join("copy.vtt");
    let codec = WebVttCodec::default();

    let doc = codec.read_from(&mut File::open(&source)?)?;
    codec.write_to(&doc, &mut File::create(&target)?)?;

    assert_eq!(codec.read_from(&mut File::open(&target)?)?, doc);
    Ok(())
}

/// Test that a file that is not UTF-8 surfaces as an IO error
#[test]
fn test_file_io_withInvalidUtf8_shouldFailWithIo() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.srt");
    fs::write(&path, b"1\n00:00:01,000 --> 00:00:02,000\nOl\xe1\n")?;

    let result = SrtCodec::default().read_from(&mut File::open(&path)?);
    assert!(matches!(result, Err(subport::SubtitleError::Io(_))));
    Ok(())
}
