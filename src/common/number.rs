//! Permissive numeric conversion for attribute values.
//!
//! Theme and style attributes arrive as raw strings. Values are never
//! rejected: parsing takes the longest numeric prefix, the way spreadsheet
//! applications read hand-edited parts, and falls back to a fixed value
//! when no prefix exists.
use fast_float2::parse_partial;

/// Parse the leading integer of `value`.
///
/// Leading whitespace and a single sign are accepted, trailing garbage is
/// ignored. Returns `0` when no digits are present or the value overflows.
///
/// # Examples
///
/// ```
/// use loquat::common::number::parse_int_lenient;
/// assert_eq!(parse_int_lenient("4"), 4);
/// assert_eq!(parse_int_lenient(" -12px"), -12);
/// assert_eq!(parse_int_lenient("abc"), 0);
/// ```
pub fn parse_int_lenient(value: &str) -> i32 {
    let bytes = value.trim_start().as_bytes();
    let (negative, unsigned) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let digits = unsigned
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return 0;
    }

    // Leading zeros are skipped; the sign was consumed above.
    match atoi_simd::parse::<i64, true, true>(&unsigned[..digits]) {
        Ok(magnitude) => {
            let signed = if negative { -magnitude } else { magnitude };
            i32::try_from(signed).unwrap_or(0)
        },
        Err(_) => 0,
    }
}

/// Parse the leading floating-point number of `value`.
///
/// Returns `None` when the value has no numeric prefix.
///
/// # Examples
///
/// ```
/// use loquat::common::number::parse_float_lenient;
/// assert_eq!(parse_float_lenient("-0.25"), Some(-0.25));
/// assert_eq!(parse_float_lenient("0.5x"), Some(0.5));
/// assert_eq!(parse_float_lenient("x"), None);
/// ```
pub fn parse_float_lenient(value: &str) -> Option<f64> {
    match parse_partial::<f64, _>(value.trim_start()) {
        Ok((num, consumed)) if consumed > 0 => Some(num),
        _ => None,
    }
}

/// Format a float with the shortest representation that round-trips,
/// dropping a trailing `.0` so whole numbers render as integers.
///
/// # Examples
///
/// ```
/// use loquat::common::number::format_float;
/// assert_eq!(format_float(1.0), "1");
/// assert_eq!(format_float(-0.249977111117893), "-0.249977111117893");
/// ```
pub fn format_float(value: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    let s = buffer.format(value);
    s.strip_suffix(".0").unwrap_or(s).to_string()
}

/// Format an integer attribute value.
#[inline]
pub fn format_int(value: i32) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(value).to_string()
}
