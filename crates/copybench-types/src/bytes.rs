//! Parsing and formatting of human-readable byte sizes
//!
//! Sizes use base-1024 units with the exact, case-sensitive unit tokens
//! `kB`, `MB`, and `GB`. The parser inverts what [`format_bytes`] emits for
//! those units; it makes no promise for arbitrary strings.

use crate::{Error, Result};

/// Number of bytes in one kilobyte (base 1024)
pub const KILOBYTE: u64 = 1024;

const UNITS: &[(&str, u64)] = &[
    ("kB", KILOBYTE),
    ("MB", KILOBYTE * KILOBYTE),
    ("GB", KILOBYTE * KILOBYTE * KILOBYTE),
];

/// Parse a human-readable byte size such as `"2.3 kB"` into a byte count.
///
/// The input must have the shape `<decimal> <unit>` with a unit from
/// {kB, MB, GB}. Anything else fails with [`Error::Parse`].
pub fn parse_bytes(input: &str) -> Result<u64> {
    let parse_error = || Error::Parse {
        input: input.to_string(),
    };

    let mut parts = input.split_whitespace();
    let (Some(number), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(parse_error());
    };

    let factor = UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, factor)| *factor)
        .ok_or_else(parse_error)?;

    let value: f64 = number.parse().map_err(|_| parse_error())?;
    if !value.is_finite() || value < 0.0 {
        return Err(parse_error());
    }

    Ok((value * factor as f64).round() as u64)
}

/// Format a byte count using the largest unit it fills at least once.
///
/// Values below 1 kB render as plain bytes (`"512 B"`). At most two decimal
/// places are kept and trailing zeros are trimmed, so exact unit multiples
/// round-trip through [`parse_bytes`].
pub fn format_bytes(bytes: u64) -> String {
    let Some((unit, factor)) = UNITS.iter().rev().find(|(_, factor)| bytes >= *factor) else {
        return format!("{} B", bytes);
    };

    let value = bytes as f64 / *factor as f64;
    let mut rendered = format!("{:.2}", value);
    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }

    format!("{} {}", rendered, unit)
}

/// Format a transfer rate as `<size>/s`, or `-` when the rate is not finite
/// (no runs were recorded, or the elapsed time was zero).
pub fn format_throughput(bytes_per_second: f64) -> String {
    if !bytes_per_second.is_finite() {
        return "-".to_string();
    }
    format!("{}/s", format_bytes(bytes_per_second as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(KILOBYTE)]
    #[case(KILOBYTE * 64)]
    #[case(KILOBYTE * KILOBYTE)]
    #[case(KILOBYTE * KILOBYTE * 100)]
    #[case(KILOBYTE * KILOBYTE * KILOBYTE)]
    #[case(KILOBYTE * KILOBYTE * KILOBYTE * 100)]
    fn formatter_output_round_trips(#[case] bytes: u64) {
        let formatted = format_bytes(bytes);
        assert_eq!(parse_bytes(&formatted).unwrap(), bytes);
    }

    #[rstest]
    #[case("1 kB", 1024)]
    #[case("2.3 kB", 2355)]
    #[case("1.5 MB", 1_572_864)]
    #[case("1 GB", 1_073_741_824)]
    fn parses_supported_units(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(parse_bytes(input).unwrap(), expected);
    }

    #[rstest]
    #[case("not a value")]
    #[case("2.3kB")]
    #[case("2.3 KB")]
    #[case("2.3 TB")]
    #[case("kB")]
    #[case("1 2 kB")]
    #[case("NaN kB")]
    #[case("-1 kB")]
    fn rejects_malformed_input(#[case] input: &str) {
        let error = parse_bytes(input).unwrap_err();
        let message = error.to_string();
        assert!(message.contains(input));
        assert!(message.contains("kB, MB, GB"));
    }

    #[test]
    fn formats_small_values_as_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1023), "1023 B");
    }

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(format_bytes(1536), "1.5 kB");
        assert_eq!(format_bytes(KILOBYTE * KILOBYTE), "1 MB");
    }

    #[test]
    fn throughput_handles_non_finite_rates() {
        assert_eq!(format_throughput(f64::NAN), "-");
        assert_eq!(format_throughput(f64::INFINITY), "-");
        assert_eq!(format_throughput(1024.0), "1 kB/s");
    }

    proptest! {
        // Two-decimal rendering loses at most ~0.5% plus integer rounding.
        #[test]
        fn round_trip_stays_within_one_percent(bytes in KILOBYTE..(KILOBYTE * KILOBYTE * KILOBYTE * 1024)) {
            let parsed = parse_bytes(&format_bytes(bytes)).unwrap();
            let tolerance = (bytes / 100).max(1);
            prop_assert!(parsed.abs_diff(bytes) <= tolerance);
        }
    }
}
