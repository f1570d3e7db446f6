//! Range algebra for board and selection expressions.
//!
//! Board specs are comma lists where each element is a bare board count
//! (`"12"`), an inclusive range (`"1-10"`), or the `NxM` shorthand that
//! expands at parse time into N consecutive width-M ranges starting at
//! board 1 (`"3x7"` → `"1-7,8-14,15-21"`). Phase and session selectors
//! are `K` or `A-B`, 1-based inclusive, resolved against a count into a
//! 0-based half-open range.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RangeError;

static BOARD_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+-[0-9]+$").expect("valid regex"));

static EXPANSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)x([0-9]+)$").expect("valid regex"));

static SELECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").expect("valid regex"));

static HASH_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#+").expect("valid regex"));

/// Validates a single board-spec token: a bare non-negative integer or
/// an `A-B` range.
///
/// Reversed bounds (`"10-1"`) are accepted; whether they should be is an
/// open product decision and the tool does not invent an answer.
///
/// # Errors
///
/// Returns [`RangeError::InvalidBoardRange`] naming the token when it
/// matches neither form.
pub fn validate_board_token(token: &str) -> Result<(), RangeError> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }
    if BOARD_RANGE_RE.is_match(token) {
        return Ok(());
    }
    Err(RangeError::InvalidBoardRange {
        token: token.to_string(),
    })
}

/// Parses a human-entered board spec into its canonical stored form.
///
/// Splits on commas; `NxM` elements are expanded into N literal `A-B`
/// ranges of width M, everything else passes through after validation.
/// The result is what gets written into the phase definition.
///
/// # Errors
///
/// Returns [`RangeError::InvalidBoardRange`] naming the first element
/// that fails the integer/`A-B`/`NxM` grammar.
pub fn parse_board_range(input: &str) -> Result<String, RangeError> {
    let mut elements = Vec::new();
    for token in input.split(',') {
        if let Some(caps) = EXPANSION_RE.captures(token) {
            let invalid = || RangeError::InvalidBoardRange {
                token: token.to_string(),
            };
            let count: u64 = caps[1].parse().map_err(|_| invalid())?;
            let width: u64 = caps[2].parse().map_err(|_| invalid())?;
            // bounds every (i+1)*width below, so the loop cannot overflow
            count.checked_mul(width).ok_or_else(invalid)?;
            for i in 0..count {
                elements.push(format!("{}-{}", i * width + 1, (i + 1) * width));
            }
            continue;
        }
        validate_board_token(token)?;
        elements.push(token.to_string());
    }
    Ok(elements.join(","))
}

/// Expands a stored board spec into one board-range string per session.
///
/// The comma-separated token list is validated (integer or `A-B` only —
/// `NxM` was already expanded at parse time) and then cycled, repeating
/// from the start, until one entry exists per session.
///
/// # Errors
///
/// Returns [`RangeError::InvalidBoardRange`] for the first invalid
/// token, including the empty token produced by a trailing comma.
pub fn expand_board_spec(spec: &str, sessions: usize) -> Result<Vec<String>, RangeError> {
    let tokens: Vec<&str> = spec.split(',').map(str::trim).collect();
    for token in &tokens {
        validate_board_token(token)?;
    }
    Ok(tokens
        .iter()
        .cycle()
        .take(sessions)
        .map(ToString::to_string)
        .collect())
}

/// Resolves a phase/session selector against `max_count` addressable
/// items.
///
/// Empty (or absent) input selects everything. A bare integer `K`
/// selects the single 0-based index `K-1`; `A-B` selects `(A-1)..B`.
///
/// # Errors
///
/// Returns [`RangeError::InvalidSelection`] when the input matches
/// neither grammar, and [`RangeError::OutOfRange`] when the resolved
/// start is negative or the resolved end exceeds `max_count`.
pub fn parse_selection_range(
    input: Option<&str>,
    max_count: usize,
) -> Result<Range<usize>, RangeError> {
    let max = i64::try_from(max_count).unwrap_or(i64::MAX);
    let (start, end) = match input {
        None | Some("") => (0, max),
        Some(s) => {
            if let Ok(k) = s.parse::<i64>() {
                (k - 1, k)
            } else if let Some(caps) = SELECTION_RE.captures(s) {
                let invalid = || RangeError::InvalidSelection {
                    input: s.to_string(),
                };
                let a: i64 = caps[1].parse().map_err(|_| invalid())?;
                let b: i64 = caps[2].parse().map_err(|_| invalid())?;
                (a - 1, b)
            } else {
                return Err(RangeError::InvalidSelection {
                    input: s.to_string(),
                });
            }
        }
    };
    if start < 0 {
        return Err(RangeError::OutOfRange { value: start + 1 });
    }
    if end > max {
        return Err(RangeError::OutOfRange { value: end });
    }
    // Both bounds are non-negative and within max_count here.
    let start = usize::try_from(start).unwrap_or_default();
    let end = usize::try_from(end).unwrap_or_default();
    Ok(start..end)
}

/// Substitutes the session number into an output-file-name template.
///
/// Every maximal run of `#` in the template is replaced with the
/// zero-padded 1-based session number at the run's width. Longer runs
/// are substituted first so a `##` run is never consumed as part of a
/// `###` run. With `reserve` set the literal suffix `reserve` is
/// appended.
#[must_use]
pub fn output_file_name(template: &str, session_number: usize, reserve: bool) -> String {
    let mut runs: Vec<&str> = HASH_RUN_RE
        .find_iter(template)
        .map(|m| m.as_str())
        .collect();
    runs.sort_unstable();
    runs.dedup();

    let mut name = template.to_string();
    for run in runs.iter().rev() {
        let width = run.len();
        let padded = format!("{session_number:0width$}");
        name = name.replace(run, &padded);
    }
    if reserve {
        name.push_str("reserve");
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bare_integer_is_valid_board_token() {
        assert!(validate_board_token("12").is_ok());
        assert!(validate_board_token("0").is_ok());
    }

    #[test]
    fn range_is_valid_board_token() {
        assert!(validate_board_token("1-10").is_ok());
    }

    #[test]
    fn reversed_bounds_are_accepted() {
        // Open product decision: the reference accepts these.
        assert!(validate_board_token("10-1").is_ok());
        assert_eq!(parse_board_range("10-1").unwrap(), "10-1");
    }

    #[test]
    fn junk_board_token_rejected_with_token() {
        let err = validate_board_token("abc").unwrap_err();
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn empty_board_token_rejected() {
        assert!(validate_board_token("").is_err());
        assert!(parse_board_range("1-10,,21-30").is_err());
    }

    #[test]
    fn expansion_shorthand() {
        assert_eq!(parse_board_range("3x7").unwrap(), "1-7,8-14,15-21");
    }

    #[test]
    fn expansion_mixed_with_literals() {
        assert_eq!(
            parse_board_range("1-10,2x4,33").unwrap(),
            "1-10,1-4,5-8,33"
        );
    }

    #[test]
    fn expansion_is_not_valid_inside_stored_specs() {
        assert!(expand_board_spec("3x7", 3).is_err());
    }

    #[test]
    fn expand_cycles_short_specs() {
        let expanded = expand_board_spec("1-10,11-20", 5).unwrap();
        assert_eq!(expanded, vec!["1-10", "11-20", "1-10", "11-20", "1-10"]);
    }

    #[test]
    fn expand_truncates_long_specs() {
        let expanded = expand_board_spec("1-8,9-16,17-24", 2).unwrap();
        assert_eq!(expanded, vec!["1-8", "9-16"]);
    }

    #[test]
    fn expand_trims_whitespace() {
        let expanded = expand_board_spec("1-10, 11-20", 2).unwrap();
        assert_eq!(expanded, vec!["1-10", "11-20"]);
    }

    #[test]
    fn empty_selection_selects_all() {
        assert_eq!(parse_selection_range(None, 10).unwrap(), 0..10);
        assert_eq!(parse_selection_range(Some(""), 10).unwrap(), 0..10);
    }

    #[test]
    fn single_selection_is_half_open_singleton() {
        assert_eq!(parse_selection_range(Some("3"), 10).unwrap(), 2..3);
    }

    #[test]
    fn range_selection_is_half_open() {
        assert_eq!(parse_selection_range(Some("2-4"), 10).unwrap(), 1..4);
    }

    #[test]
    fn selection_zero_is_out_of_range() {
        let err = parse_selection_range(Some("0"), 10).unwrap_err();
        assert!(matches!(err, RangeError::OutOfRange { value: 0 }));
    }

    #[test]
    fn selection_end_beyond_count_is_out_of_range() {
        let err = parse_selection_range(Some("2-11"), 10).unwrap_err();
        assert!(matches!(err, RangeError::OutOfRange { value: 11 }));
    }

    #[test]
    fn selection_at_count_boundary_is_accepted() {
        assert_eq!(parse_selection_range(Some("10"), 10).unwrap(), 9..10);
        assert_eq!(parse_selection_range(Some("1-10"), 10).unwrap(), 0..10);
    }

    #[test]
    fn malformed_selection_names_input() {
        let err = parse_selection_range(Some("a-b"), 10).unwrap_err();
        assert!(err.to_string().contains("'a-b'"));
    }

    #[test]
    fn output_name_zero_pads_to_run_width() {
        assert_eq!(output_file_name("game-##", 3, false), "game-03");
    }

    #[test]
    fn output_name_reserve_suffix() {
        assert_eq!(output_file_name("game-##", 3, true), "game-03reserve");
    }

    #[test]
    fn output_name_single_hash() {
        assert_eq!(output_file_name("sess#", 7, false), "sess7");
        assert_eq!(output_file_name("sess#", 12, false), "sess12");
    }

    #[test]
    fn output_name_without_hash_is_unchanged() {
        assert_eq!(output_file_name("finals", 3, false), "finals");
    }

    #[test]
    fn output_name_mixed_run_widths_substitute_longest_first() {
        assert_eq!(output_file_name("###-#", 5, false), "005-5");
    }

    proptest! {
        #[test]
        fn valid_tokens_pass_through_unchanged(a in 0u32..10_000, b in 0u32..10_000) {
            let token = format!("{a}-{b}");
            prop_assert_eq!(parse_board_range(&token).unwrap(), token);
        }

        #[test]
        fn bare_integers_pass_through_unchanged(n in 0u64..1_000_000) {
            let token = n.to_string();
            prop_assert_eq!(parse_board_range(&token).unwrap(), token);
        }

        #[test]
        fn expansion_covers_consecutive_boards(n in 1u64..20, m in 1u64..50) {
            let expanded = parse_board_range(&format!("{n}x{m}")).unwrap();
            let elements: Vec<&str> = expanded.split(',').collect();
            prop_assert_eq!(elements.len() as u64, n);
            let mut next_start = 1;
            for element in elements {
                let (lo, hi) = element.split_once('-').unwrap();
                let lo: u64 = lo.parse().unwrap();
                let hi: u64 = hi.parse().unwrap();
                prop_assert_eq!(lo, next_start);
                prop_assert_eq!(hi - lo + 1, m);
                next_start = hi + 1;
            }
        }

        #[test]
        fn alphabetic_tokens_are_rejected(token in "[a-z]{1,8}") {
            prop_assert!(parse_board_range(&token).is_err());
        }

        #[test]
        fn selection_never_exceeds_bounds(input in "[0-9]{1,3}", max in 1usize..500) {
            if let Ok(range) = parse_selection_range(Some(&input), max) {
                prop_assert!(range.end <= max);
            }
        }
    }
}
