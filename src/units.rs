// Unit conversion and precision helpers

/// Bytes to megabytes as floating-point division. No rounding here;
/// callers decide how many digits to keep.
pub fn bytes_to_megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Drops digits beyond `decimals` places, truncating toward zero.
/// truncate(66.666, 2) == 66.66, never 66.67.
pub fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).trunc() / factor
}

/// Parses a human-readable size token ("482M", "2G", "1.5M", "100") into
/// exact bytes, truncating any fractional byte.
///
/// A trailing K/M/G/T selects the 1024-based multiplier. Any other trailing
/// letter degrades to multiplier 1 (raw bytes) with a warning; a token
/// ending in a digit is already a byte count. Returns None when the numeric
/// part does not parse.
pub fn parse_size_token(token: &str) -> Option<u64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let (number_part, multiplier) = match token.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => {
            let number = &token[..token.len() - c.len_utf8()];
            let multiplier = match c.to_ascii_uppercase() {
                'K' => 1024u64,
                'M' => 1024u64.pow(2),
                'G' => 1024u64.pow(3),
                'T' => 1024u64.pow(4),
                other => {
                    tracing::warn!(token, unit = %other, "unrecognized size unit, treating as bytes");
                    1
                }
            };
            (number, multiplier)
        }
        _ => (token, 1),
    };

    let value: f64 = number_part.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * multiplier as f64).trunc() as u64)
}
