//! Time field parsing and formatting
//!
//! The trim fields are forgiving: anything that does not read as a number
//! degrades to zero instead of raising an error.

/// Parse `HH:MM:SS`, `MM:SS` or bare seconds into whole seconds
///
/// Each segment contributes its leading integer (`"12abc"` is 12, `"1.9"` is 1)
/// and a segment with no leading integer contributes 0. Empty text and
/// negative totals yield 0.
pub fn parse_time(time_str: &str) -> u64 {
    if time_str.is_empty() {
        return 0;
    }

    let parts: Vec<&str> = time_str.split(':').collect();
    let total = match parts.as_slice() {
        [hours, minutes, seconds] => leading_int(hours)
            .saturating_mul(3600)
            .saturating_add(leading_int(minutes).saturating_mul(60))
            .saturating_add(leading_int(seconds)),
        [minutes, seconds] => leading_int(minutes)
            .saturating_mul(60)
            .saturating_add(leading_int(seconds)),
        _ => leading_int(time_str),
    };

    total.max(0) as u64
}

/// Format seconds as zero-padded `HH:MM:SS`, truncating fractions
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Leading optionally-signed integer of `text`, or 0
fn leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }

    // Only overflow can fail here; saturate instead
    sign * digits.parse::<i64>().unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00:00");
        assert_eq!(format_time(3661.0), "01:01:01");
        assert_eq!(format_time(59.99), "00:00:59");
        assert_eq!(format_time(125.5), "00:02:05");
        assert_eq!(format_time(360_000.0), "100:00:00");
    }

    #[test]
    fn test_format_time_degenerate_input() {
        assert_eq!(format_time(-5.0), "00:00:00");
        assert_eq!(format_time(f64::NAN), "00:00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00:00");
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("01:01:01"), 3661);
        assert_eq!(parse_time("02:30"), 150);
        assert_eq!(parse_time("45"), 45);
        assert_eq!(parse_time("0:0:0"), 0);
    }

    #[test]
    fn test_parse_time_is_permissive() {
        assert_eq!(parse_time(""), 0);
        assert_eq!(parse_time("abc"), 0);
        assert_eq!(parse_time("1:xx:30"), 3630);
        assert_eq!(parse_time("12abc"), 12);
        assert_eq!(parse_time("1.9"), 1);
        assert_eq!(parse_time(" 7"), 7);
        assert_eq!(parse_time("-5"), 0);
        assert_eq!(parse_time("-1:00"), 0);
    }

    #[test]
    fn test_parse_time_saturates_huge_segments() {
        let max = i64::MAX as u64;
        assert_eq!(parse_time("99999999999999999999"), max);
        assert_eq!(parse_time("1:99999999999999999999"), max);
        assert_eq!(parse_time("99999999999999999999:00:01"), max);
        assert_eq!(parse_time("-99999999999999999999"), 0);
    }

    #[test]
    fn test_parse_time_extra_segments() {
        assert_eq!(parse_time("1:2:3:4"), 1);
    }

    #[test]
    fn test_format_then_parse_round_trips_whole_seconds() {
        for n in [0u64, 1, 59, 60, 61, 3599, 3600, 3661, 86_399, 86_400, 359_999] {
            let formatted = format_time(n as f64);
            assert_eq!(parse_time(&formatted), n, "{}", formatted);

            let parts: Vec<&str> = formatted.split(':').collect();
            let minutes_form = format!(
                "{}:{}",
                parts[0].parse::<u64>().unwrap() * 60 + parts[1].parse::<u64>().unwrap(),
                parts[2]
            );
            assert_eq!(parse_time(&minutes_form), n);
            assert_eq!(parse_time(&n.to_string()), n);
        }
    }
}
