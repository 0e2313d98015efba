use std::{
    num::{IntErrorKind, ParseIntError},
    ops::Range,
};

/// To be used as `The xx number ` + the explanation from here (does not have a dot).
pub(crate) const fn explain_number_error(error: &ParseIntError) -> &'static str {
    match error.kind() {
        IntErrorKind::Empty => "is empty",
        IntErrorKind::InvalidDigit => "contains an invalid character",
        IntErrorKind::NegOverflow => "is too small to fit in the internal representation",
        IntErrorKind::PosOverflow => "is too big to fit in the internal representation",
        IntErrorKind::Zero => "is zero, which is not allowed here",
        _ => "is not a valid number",
    }
}

/// Count the number of digits after the decimal point, but only if it did not use exponential notation
pub(crate) fn float_digits(text: &str) -> Option<u8> {
    if text.is_ascii() && !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit() || b == b'.')
    {
        text.as_bytes()
            .iter()
            .position(|b| *b == b'.')
            .map_or(Some(0), |pos| u8::try_from(text[pos + 1..].len()).ok())
    } else {
        None
    }
}

/// Round to the given number of decimal places, halves are rounded away from zero.
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10_f64.powi(digits);
    (value * factor).round() / factor
}

/// Shrink the range so that it does not start or end with whitespace.
pub(crate) fn trim_range(text: &str, range: Range<usize>) -> Range<usize> {
    let slice = &text[range.clone()];
    let start = range.start + (slice.len() - slice.trim_start().len());
    let end = range.end - (slice.len() - slice.trim_end().len());
    start..end.max(start)
}

/// Split the given range on any of the `separators`, but only outside of any round or square
/// brackets. Returns the trimmed, non empty, pieces.
pub(crate) fn split_outside_enclosures(
    text: &str,
    range: Range<usize>,
    separators: &[char],
) -> Vec<Range<usize>> {
    let mut depth = 0_usize;
    let mut start = range.start;
    let mut pieces = Vec::new();
    for (offset, c) in text[range.clone()].char_indices() {
        let index = range.start + offset;
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if depth == 0 && separators.contains(&c) => {
                pieces.push(trim_range(text, start..index));
                start = index + c.len_utf8();
            }
            _ => (),
        }
    }
    pieces.push(trim_range(text, start..range.end));
    pieces.retain(|piece| !piece.is_empty());
    pieces
}

/// Format a value with the given number of decimals, dropping trailing zeros but keeping at least `minimal` decimals
pub(crate) fn format_trimmed(value: f64, decimals: usize, minimal: usize) -> String {
    let mut text = format!("{value:.decimals$}");
    if let Some(dot) = text.find('.') {
        while text.len() > dot + 1 + minimal && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

#[allow(clippy::missing_panics_doc)]
#[test]
fn test_float_digits() {
    assert_eq!(float_digits("3.14"), Some(2));
    assert_eq!(float_digits("195.0866"), Some(4));
    assert_eq!(float_digits(".14"), Some(2));
    assert_eq!(float_digits("1"), Some(0));
    assert_eq!(float_digits("1."), Some(0));
    assert_eq!(float_digits("1E2"), None);
    assert_eq!(float_digits("NaN"), None);
    assert_eq!(float_digits(""), None);
}

#[allow(clippy::missing_panics_doc)]
#[test]
fn test_round_to() {
    assert!((round_to(177.102_239_466, 5) - 177.102_24).abs() < 1e-9);
    assert!((round_to(round_to(177.102_239_466, 5), 4) - 177.1022).abs() < 1e-9);
    assert!((round_to(0.000_21, 4) - 0.0002).abs() < 1e-9);
}

#[allow(clippy::missing_panics_doc)]
#[test]
fn test_split_outside_enclosures() {
    let text = "7.26 (dd, J = 8.0, 2.0 Hz, 1H), 7.10 – 7.30 (m, 3H), 3.80 (s, 3H)";
    let pieces: Vec<&str> = split_outside_enclosures(text, 0..text.len(), &[','])
        .into_iter()
        .map(|r| &text[r])
        .collect();
    assert_eq!(
        pieces,
        vec![
            "7.26 (dd, J = 8.0, 2.0 Hz, 1H)",
            "7.10 – 7.30 (m, 3H)",
            "3.80 (s, 3H)"
        ]
    );
    let text = "7.26 (s, 1H)，3.80 (d, J = 8.0，2.0 Hz, 3H)";
    let pieces: Vec<&str> = split_outside_enclosures(text, 0..text.len(), &[',', '，'])
        .into_iter()
        .map(|r| &text[r])
        .collect();
    assert_eq!(pieces, vec!["7.26 (s, 1H)", "3.80 (d, J = 8.0，2.0 Hz, 3H)"]);
}

#[allow(clippy::missing_panics_doc)]
#[test]
fn test_format_trimmed() {
    assert_eq!(format_trimmed(7.6, 2, 1), "7.6");
    assert_eq!(format_trimmed(7.65, 2, 1), "7.65");
    assert_eq!(format_trimmed(8.0, 2, 1), "8.0");
    assert_eq!(format_trimmed(177.1022, 4, 4), "177.1022");
}
