use eyre::{Result, eyre};

/// Unit letters in ascending order of magnitude. Each step is a factor
/// of 1024, so "K" is 1024^1, "M" is 1024^2 and so on.
const UNIT_LETTERS: [char; 8] = ['K', 'M', 'G', 'T', 'P', 'E', 'Z', 'Y'];

/// Converts a human-readable size (e.g. "100M", "2.5T", "500gb") to bytes.
///
/// Accepts a decimal number followed by an optional unit letter and an
/// optional trailing "B", case-insensitive. Bare digits mean bytes.
pub fn parse_size(text: &str) -> Result<u64> {
    let normalized = text.trim().to_ascii_uppercase();
    let mut digits = normalized.as_str();
    let mut exponent = 0i32;

    if let Some(rest) = digits.strip_suffix('B') {
        digits = rest;
    }
    if let Some(last) = digits.chars().next_back()
        && let Some(pos) = UNIT_LETTERS.iter().position(|unit| *unit == last)
    {
        exponent = pos as i32 + 1;
        digits = &digits[..digits.len() - 1];
    }

    let number: f64 = digits.parse().map_err(|_| invalid(text))?;
    if !number.is_finite() || number < 0.0 {
        return Err(invalid(text));
    }
    Ok((number * 1024f64.powi(exponent)) as u64)
}

fn invalid(text: &str) -> eyre::Report {
    eyre!("invalid size '{text}': expected a number with an optional unit letter (K/M/G/T/P/E/Z/Y)")
}

/// Renders a byte count as a short human-readable string ("600.0GB").
/// Lossy by design, this is a display format, not a serialization one.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["", "K", "M", "G", "T", "P", "E", "Z"] {
        if value < 1024.0 {
            return format!("{value:.1}{unit}B");
        }
        value /= 1024.0;
    }
    format!("{value:.1}YB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_bytes() {
        assert_eq!(parse_size("123").unwrap(), 123);
        assert_eq!(parse_size("0").unwrap(), 0);
    }

    #[test]
    fn parses_unit_letters_as_binary_powers() {
        assert_eq!(parse_size("1K").unwrap(), 1024);
        assert_eq!(parse_size("1M").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("500G").unwrap(), 500 * 1024u64.pow(3));
        assert_eq!(parse_size("2T").unwrap(), 2 * 1024u64.pow(4));
        assert_eq!(parse_size("1Y").unwrap(), (1024f64.powi(8)) as u64);
    }

    #[test]
    fn parses_fractional_numbers_exactly() {
        assert_eq!(parse_size("2.5G").unwrap(), 2_684_354_560);
        assert_eq!(parse_size("0.5K").unwrap(), 512);
    }

    #[test]
    fn tolerates_case_suffix_b_and_whitespace() {
        assert_eq!(parse_size("10kb").unwrap(), 10 * 1024);
        assert_eq!(parse_size("1TB").unwrap(), 1024u64.pow(4));
        assert_eq!(parse_size(" 1M ").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("42B").unwrap(), 42);
    }

    #[test]
    fn rejects_text_outside_the_grammar() {
        for bad in ["", "abc", "10X", "K", "GB", "-1K", "nan", "inf", "1.2.3"] {
            assert!(parse_size(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn formats_zero_and_sub_kilobyte_values() {
        assert_eq!(format_size(0), "0.0B");
        assert_eq!(format_size(1023), "1023.0B");
    }

    #[test]
    fn formats_with_one_decimal_and_unit() {
        assert_eq!(format_size(1024), "1.0KB");
        assert_eq!(format_size(1536), "1.5KB");
        assert_eq!(format_size(600 * 1024u64.pow(3)), "600.0GB");
        assert_eq!(format_size(u64::MAX), "16.0EB");
    }

    #[test]
    fn numeric_part_stays_below_1024() {
        for bytes in [1, 1023, 1024, 1025, 1 << 20, (1 << 40) - 1, u64::MAX] {
            let rendered = format_size(bytes);
            let digits: String = rendered
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            assert!(digits.parse::<f64>().unwrap() < 1024.0, "{rendered}");
        }
    }
}
