//! Property-based tests for rust_logger_facade using proptest

use proptest::prelude::*;
use rust_logger_facade::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

/// Console line for one message, rendered off the main thread
fn render(details: DetailsFilter, text: &str) -> String {
    let buffer = CaptureBuffer::new();
    let logger = Arc::new(Logger::new());
    logger.init_cli_log_to(DEFAULT_TIME_FORMAT, buffer.clone()).set_details(details);

    let worker = Arc::clone(&logger);
    let text = text.to_string();
    std::thread::Builder::new()
        .name("prop".to_string())
        .spawn(move || worker.log(LogLevel::Warning, "src/prop.rs", 7, "render", text))
        .unwrap()
        .join()
        .unwrap();

    buffer.lines().pop().unwrap_or_default()
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that severity order matches bit order
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        prop_assert_eq!(level1 <= level2, level1.bit() <= level2.bit());
    }

    /// Fatal passes every valid filter
    #[test]
    fn test_fatal_never_filtered(bits in 0i64..=i64::from(LevelFilter::MAX_BITS)) {
        let filter = LevelFilter::from_bits(bits).unwrap();
        prop_assert!(filter.passes(LogLevel::Fatal));
    }

    /// A level passes exactly when its bit is not in the filter
    #[test]
    fn test_level_passes_iff_bit_clear(
        level in any_level(),
        bits in 0i64..=i64::from(LevelFilter::MAX_BITS),
    ) {
        let filter = LevelFilter::from_bits(bits).unwrap();
        let expected = level == LogLevel::Fatal || filter.bits() & level.bit() == 0;
        prop_assert_eq!(filter.passes(level), expected);
    }

    /// A filter built from a level passes that level and everything more severe
    #[test]
    fn test_cumulative_filter(threshold in any_level(), level in any_level()) {
        let filter = LevelFilter::from_level(threshold);
        prop_assert_eq!(filter.passes(level), level <= threshold);
    }

    /// Out-of-range filter bits are rejected
    #[test]
    fn test_invalid_level_bits_rejected(bits in prop_oneof![
        i64::MIN..0i64,
        (i64::from(LevelFilter::MAX_BITS) + 1)..i64::MAX,
    ]) {
        prop_assert!(LevelFilter::from_bits(bits).is_err());
        prop_assert!(Logger::new().try_set_level_bits(bits).is_err());
    }

    /// The logger forwards exactly the messages the filter passes
    #[test]
    fn test_logger_respects_filter(
        bits in 0i64..=i64::from(LevelFilter::MAX_BITS),
        levels in prop::collection::vec(any_level(), 0..20),
    ) {
        let filter = LevelFilter::from_bits(bits).unwrap();
        let logger = Logger::builder().level(filter).unlocked().build().unwrap();
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        logger.add_handler("recorder", move |msg, _| seen_clone.lock().push(msg.level()));

        for &level in &levels {
            logger.log(level, "src/prop.rs", 1, "test", "msg");
        }

        let expected: Vec<LogLevel> = levels.into_iter().filter(|&l| filter.passes(l)).collect();
        prop_assert_eq!(&*seen.lock(), &expected);
    }
}

// ============================================================================
// DetailsFilter Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Messages never span more than one line
    #[test]
    fn test_single_line_output(text in "[a-z\n\r\t ]{0,40}") {
        let line = render(DetailsFilter::MESSAGE_ONLY, &text);
        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('\r'));
    }

    #[test]
    fn test_invalid_details_bits_rejected(bits in (i64::from(DetailsFilter::MAX_BITS) + 1)..i64::MAX) {
        prop_assert!(DetailsFilter::from_bits(bits).is_err());
    }
}

/// Every field appears in the console line iff its bit is clear
#[test]
fn test_fields_follow_detail_bits() {
    let app_prefix = format!("{}: ", rust_logger_facade::destinations::application_name());

    for bits in 0..=i64::from(DetailsFilter::MAX_BITS) {
        let details = DetailsFilter::from_bits(bits).unwrap();
        let line = render(details, "payload");

        assert_eq!(
            line.starts_with(&app_prefix),
            details.shows(DetailsFilter::WITHOUT_APP_NAME),
            "app name, bits={bits}: {line:?}"
        );
        assert_eq!(
            line.contains("[warning]"),
            details.shows(DetailsFilter::WITHOUT_LEVEL),
            "level, bits={bits}: {line:?}"
        );
        assert_eq!(
            line.contains("-prop] "),
            details.shows(DetailsFilter::WITHOUT_THREAD_INFO),
            "thread info, bits={bits}: {line:?}"
        );
        assert_eq!(
            line.ends_with(" (from src/prop.rs:7)"),
            details.shows(DetailsFilter::WITHOUT_SOURCE_CODE),
            "source, bits={bits}: {line:?}"
        );

        let has_micros = line.split(' ').any(|token| {
            token.len() > 7
                && token.as_bytes()[token.len() - 7] == b'.'
                && token[token.len() - 6..].chars().all(|c| c.is_ascii_digit())
        });
        assert_eq!(
            has_micros,
            details.shows(DetailsFilter::WITHOUT_TIME)
                && details.shows(DetailsFilter::WITHOUT_MICROSECONDS),
            "microseconds, bits={bits}: {line:?}"
        );
        assert!(line.contains("payload"));
    }
}

#[test]
fn test_message_only_is_bare_text() {
    assert_eq!(render(DetailsFilter::MESSAGE_ONLY, "bare"), "bare");
}
