/*!
 * Tests for timestamp parsing, formatting and arithmetic
 */

use subport::errors::SubtitleError;
use subport::{TimeFormat, Timestamp};

#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = Timestamp::parse("01:23:45,678", TimeFormat::Srt).unwrap();
    assert_eq!(ts.as_millis(), 5_025_678);
    assert_eq!(ts.format(TimeFormat::Srt), "01:23:45,678");
    assert_eq!(ts.format(TimeFormat::WebVtt), "01:23:45.678");
}

#[test]
fn test_timestamp_parsing_withWideHours_shouldAccept() {
    let ts = Timestamp::parse("123:00:00.000", TimeFormat::WebVtt).unwrap();
    assert_eq!(ts, Timestamp::from_hms(123, 0, 0, 0));
    assert_eq!(ts.format(TimeFormat::WebVtt), "123:00:00.000");
}

#[test]
fn test_timestamp_parsing_withWrongSeparator_shouldFail() {
    assert!(matches!(
        Timestamp::parse("00:00:01.000", TimeFormat::Srt),
        Err(SubtitleError::InvalidTimestamp(_))
    ));
    assert!(Timestamp::parse("00:00:01,000", TimeFormat::WebVtt).is_err());
}

#[test]
fn test_timestamp_parsing_withOutOfRangeFields_shouldFail() {
    assert!(Timestamp::parse("00:60:00,000", TimeFormat::Srt).is_err());
    assert!(Timestamp::parse("00:00:60,000", TimeFormat::Srt).is_err());
    assert!(Timestamp::parse("garbage", TimeFormat::Srt).is_err());
}

#[test]
fn test_timestamp_parsing_withShortFraction_shouldReadAsDecimal() {
    let ts = Timestamp::parse("00:00:01,5", TimeFormat::Srt).unwrap();
    assert_eq!(ts.as_millis(), 1500);

    let ts = Timestamp::parse("00:00:01.23456", TimeFormat::WebVtt).unwrap();
    assert_eq!(ts.as_millis(), 1234);
}

#[test]
fn test_timestamp_arithmetic_shouldSaturateAtZero() {
    let a = Timestamp::from_millis(1000);
    let b = Timestamp::from_millis(2500);

    assert_eq!((a + b).as_millis(), 3500);
    assert_eq!((b - a).as_millis(), 1500);
    assert_eq!(a - b, Timestamp::ZERO);
    assert_eq!(a.checked_sub(b), None);
    assert_eq!(a.shifted(-5000), Timestamp::ZERO);
    assert_eq!(a.shifted(250).as_millis(), 1250);
    assert!(a < b);
}
