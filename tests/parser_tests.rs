use sar_tick_studio::parser::{parse_log, read_log, Observation};
use sar_tick_studio::utils::config::ChannelMap;
use sar_tick_studio::utils::error::ParseError;
use std::io::Write;
use tempfile::NamedTempFile;

const TRACE: &str = "\
INFO power-up
[0012] TOP:MinFBC_SAR_order: S1R=03 S2R=FE S3R=10
[0013] TOP : Ch=0
[0020] TOP:MinFBC_SAR_order: S1R=05 S15R=80
[0021] TOP : Ch=99
[0030] TOP:MinFBC_SAR_order: S2R=01
[0031] unrelated line
[0032] TOP : Ch=3
";

#[test]
fn test_parse_blocks_and_channels() {
    let parsed = parse_log(TRACE, &ChannelMap::default()).unwrap();

    assert_eq!(parsed.total_blocks, 3);
    assert_eq!(parsed.dropped_blocks, 1);
    assert_eq!(parsed.observations.len(), 2);

    let first = &parsed.observations[0];
    assert_eq!(first.channel, "CH0");
    assert_eq!(first.line, 2);
    assert_eq!(first.value(0), Some(0x03));
    assert_eq!(first.value(1), Some(0xFE));
    assert_eq!(first.value(2), Some(0x10));
    assert_eq!(first.value(3), None);

    let second = &parsed.observations[1];
    assert_eq!(second.channel, "CH3");
    assert_eq!(second.value(1), Some(0x01));
    assert_eq!(second.present_count(), 1);
}

#[test]
fn test_unmapped_channel_is_dropped_silently() {
    let trace = "TOP:MinFBC_SAR_order: S1R=11\nTOP : Ch=99\n";
    let parsed = parse_log(trace, &ChannelMap::default()).unwrap();

    assert!(parsed.observations.is_empty());
    assert_eq!(parsed.dropped_blocks, 1);
}

#[test]
fn test_channel_line_after_next_marker_does_not_count() {
    let trace = "\
TOP:MinFBC_SAR_order: S1R=11
TOP:MinFBC_SAR_order: S1R=22
TOP : Ch=1
";
    let parsed = parse_log(trace, &ChannelMap::default()).unwrap();

    assert_eq!(parsed.observations.len(), 1);
    assert_eq!(parsed.observations[0].value(0), Some(0x22));
    assert_eq!(parsed.dropped_blocks, 1);
}

#[test]
fn test_channel_on_marker_line() {
    let trace = "TOP:MinFBC_SAR_order: S4R=0a TOP : Ch=2\n";
    let parsed = parse_log(trace, &ChannelMap::default()).unwrap();

    assert_eq!(parsed.observations.len(), 1);
    assert_eq!(parsed.observations[0].channel, "CH2");
    assert_eq!(parsed.observations[0].hex(3), Some("0A".to_string()));
}

#[test]
fn test_recognized_channel_without_registers_is_kept() {
    let trace = "TOP:MinFBC_SAR_order: nothing here\nTOP : Ch=01\n";
    let parsed = parse_log(trace, &ChannelMap::default()).unwrap();

    assert_eq!(parsed.observations.len(), 1);
    assert_eq!(parsed.observations[0], Observation::new("CH1", 1));
}

#[test]
fn test_injected_channel_map() {
    let channels = ChannelMap::new([("7", "LEFT"), ("8", "RIGHT")]);
    let trace = "TOP:MinFBC_SAR_order: S1R=01\nTOP : Ch=8\nTOP:MinFBC_SAR_order: S1R=02\nTOP : Ch=0\n";
    let parsed = parse_log(trace, &channels).unwrap();

    assert_eq!(parsed.observations.len(), 1);
    assert_eq!(parsed.observations[0].channel, "RIGHT");
    assert_eq!(parsed.channel_counts().get("RIGHT"), Some(&1));
}

#[test]
fn test_invalid_hex_value_is_an_error() {
    let trace = "TOP:MinFBC_SAR_order: S1R=ZZ\nTOP : Ch=0\n";
    let err = parse_log(trace, &ChannelMap::default()).unwrap_err();

    match err {
        ParseError::InvalidRegisterValue { line, label, value } => {
            assert_eq!(line, 1);
            assert_eq!(label, "S1R");
            assert_eq!(value, "ZZ");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_wide_value_is_an_error() {
    let trace = "TOP:MinFBC_SAR_order: S1R=1FF\nTOP : Ch=0\n";
    assert!(parse_log(trace, &ChannelMap::default()).is_err());
}

#[test]
fn test_read_log_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(TRACE.as_bytes()).unwrap();
    // Stray non-UTF-8 byte outside any record
    file.write_all(&[0xFF, b'\n']).unwrap();

    let parsed = read_log(file.path(), &ChannelMap::default()).unwrap();
    assert_eq!(parsed.observations.len(), 2);
}

#[test]
fn test_empty_trace() {
    let parsed = parse_log("", &ChannelMap::default()).unwrap();
    assert_eq!(parsed.total_blocks, 0);
    assert!(parsed.observations.is_empty());
}
