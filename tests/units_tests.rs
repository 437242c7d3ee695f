// Unit conversion and truncation tests

use diskwatch::units::{bytes_to_megabytes, parse_size_token, truncate};

#[test]
fn test_truncate_drops_digits_never_rounds_up() {
    assert_eq!(truncate(66.666, 2), 66.66);
    assert_eq!(truncate(66.999, 2), 66.99);
    assert_eq!(truncate(66.6, 0), 66.0);
}

#[test]
fn test_truncate_toward_zero_for_negative_values() {
    assert_eq!(truncate(-66.666, 2), -66.66);
}

#[test]
fn test_bytes_to_megabytes_is_plain_division() {
    assert_eq!(bytes_to_megabytes(1024 * 1024), 1.0);
    assert_eq!(bytes_to_megabytes(3 * 1024 * 1024 / 2), 1.5);
    assert_eq!(bytes_to_megabytes(0), 0.0);
}

#[test]
fn test_size_token_whole_units() {
    assert_eq!(parse_size_token("2G"), Some(2 * 1024u64.pow(3)));
    assert_eq!(parse_size_token("482M"), Some(482 * 1024u64.pow(2)));
    assert_eq!(parse_size_token("16K"), Some(16 * 1024));
    assert_eq!(parse_size_token("1T"), Some(1024u64.pow(4)));
}

#[test]
fn test_size_token_fractional_value_truncates() {
    assert_eq!(parse_size_token("1.5M"), Some((1.5 * 1024.0 * 1024.0) as u64));
    assert_eq!(parse_size_token("2.7K"), Some((2.7f64 * 1024.0).trunc() as u64));
}

#[test]
fn test_size_token_lowercase_unit() {
    assert_eq!(parse_size_token("2g"), Some(2 * 1024u64.pow(3)));
}

#[test]
fn test_size_token_without_unit_is_raw_bytes() {
    assert_eq!(parse_size_token("100"), Some(100));
}

#[test]
fn test_size_token_unknown_unit_degrades_to_bytes() {
    assert_eq!(parse_size_token("7Z"), Some(7));
}

#[test]
fn test_size_token_garbage_is_none() {
    assert_eq!(parse_size_token("abc"), None);
    assert_eq!(parse_size_token(""), None);
    assert_eq!(parse_size_token("-3G"), None);
}
