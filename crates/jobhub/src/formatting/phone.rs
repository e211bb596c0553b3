const PHONE_DIGITS: usize = 10;

/// Masks raw input as a progressive `xxx-xxx-xxxx` phone number.
///
/// Every non-digit is discarded and only the first ten digits are kept, so the
/// result can be fed back in on each keystroke without drifting.
pub fn format_phone_number(raw: &str) -> String {
    let digits = super::leading_digits(raw, PHONE_DIGITS);

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn short_inputs_pass_through() {
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("1"), "1");
        assert_eq!(format_phone_number("123"), "123");
    }

    #[test]
    fn masks_progressively() {
        assert_eq!(format_phone_number("1234"), "123-4");
        assert_eq!(format_phone_number("123456"), "123-456");
        assert_eq!(format_phone_number("1234567"), "123-456-7");
        assert_eq!(format_phone_number("1234567890"), "123-456-7890");
    }

    #[test]
    fn strips_punctuation_and_letters() {
        assert_eq!(format_phone_number("(123) 456-7890"), "123-456-7890");
        assert_eq!(format_phone_number("123.456.7890"), "123-456-7890");
        assert_eq!(format_phone_number("abc123def456ghi7890"), "123-456-7890");
        assert_eq!(format_phone_number("555-CALL-NOW"), "555");
        assert_eq!(format_phone_number("!@#$%^&*()"), "");
    }

    #[test]
    fn truncates_to_ten_digits() {
        assert_eq!(format_phone_number("12345678901"), "123-456-7890");
        assert_eq!(format_phone_number("123456789012345"), "123-456-7890");
    }

    proptest! {
        #[test]
        fn output_keeps_leading_digits(input in any::<String>()) {
            let formatted = format_phone_number(&input);
            prop_assert!(formatted.chars().all(|c| c.is_ascii_digit() || c == '-'));

            let stripped: String = formatted.chars().filter(|c| *c != '-').collect();
            let expected: String = input
                .chars()
                .filter(char::is_ascii_digit)
                .take(PHONE_DIGITS)
                .collect();
            prop_assert!(stripped.len() <= PHONE_DIGITS);
            prop_assert_eq!(stripped, expected);
        }
    }
}
