use chanlog::{Level, LoggerError};
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = Level> {
    proptest::sample::select(Level::iter().collect::<Vec<_>>())
}

/// Applies a case pattern to `name`, one flag per character.
fn recase(name: &str, upper: &[bool]) -> String {
    name.chars()
        .zip(upper.iter().cycle())
        .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
        .collect()
}

proptest! {
    #[test]
    fn canonical_names_round_trip(level in any_level()) {
        let parsed = Level::parse(&level.to_string()).expect("canonical name parses");
        prop_assert_eq!(parsed, level);
        prop_assert_eq!(Level::parse(&parsed.to_string()).ok(), Some(parsed));
    }

    #[test]
    fn case_and_padding_are_ignored(
        level in any_level(),
        upper in proptest::collection::vec(any::<bool>(), 1..8),
        left in "[ \t]{0,3}",
        right in "[ \t\n]{0,3}",
    ) {
        let text = format!("{left}{}{right}", recase(level.as_str(), &upper));
        prop_assert_eq!(Level::parse(&text).ok(), Some(level));
    }

    #[test]
    fn other_words_are_invalid(word in "[a-z]{1,8}") {
        prop_assume!(Level::iter().all(|l| !l.as_str().eq_ignore_ascii_case(&word)));

        let err = Level::parse(&word).expect_err("not a level");
        let is_invalid_level = matches!(err, LoggerError::InvalidLevel { .. });
        prop_assert!(is_invalid_level);
    }

    #[test]
    fn ordering_matches_filtering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, a.max(b) == b);
    }
}

#[test]
fn bogus_is_invalid() {
    let err = Level::parse("bogus").expect_err("bogus is not a level");
    assert_eq!(err.to_string(), "Invalid log level: 'bogus'");
}
