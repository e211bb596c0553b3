const ZIPCODE_DIGITS: usize = 5;

/// Reduces raw input to at most five ASCII digits.
pub fn format_zipcode(raw: &str) -> String {
    super::leading_digits(raw, ZIPCODE_DIGITS)
}
