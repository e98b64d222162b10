//! Card network detection from the BIN/IIN prefix.

use crate::models::NetworkTag;

/// Minimum number of digits needed before a prefix is trusted.
const MIN_PREFIX_DIGITS: usize = 4;

/// Keep only the ASCII digits of `input`.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Classify a (possibly formatted) card number by its leading digits.
///
/// Ranges are checked in order and the first match wins:
/// `4` is Visa; `51`–`55` or `2221`–`2720` is Mastercard; `60`, `65` or
/// `353`–`359` is RuPay. Fewer than four digits is always unknown.
pub fn classify(input: &str) -> NetworkTag {
    let digits = digits_only(input);
    if digits.len() < MIN_PREFIX_DIGITS {
        return NetworkTag::Unknown;
    }

    let first1 = prefix(&digits, 1);
    let first2 = prefix(&digits, 2);
    let first3 = prefix(&digits, 3);
    let first4 = prefix(&digits, 4);

    if first1 == 4 {
        NetworkTag::Visa
    } else if (51..=55).contains(&first2) || (2221..=2720).contains(&first4) {
        NetworkTag::Mastercard
    } else if first2 == 60 || first2 == 65 || (353..=359).contains(&first3) {
        NetworkTag::Rupay
    } else {
        NetworkTag::Unknown
    }
}

/// Whether the digit count of `input` is valid for `tag`.
///
/// Visa accepts 13 to 19 digits, Mastercard and RuPay exactly 16.
/// Unknown networks never validate.
pub fn validate_length(input: &str, tag: NetworkTag) -> bool {
    let count = input.chars().filter(char::is_ascii_digit).count();
    match tag {
        NetworkTag::Visa => (13..=19).contains(&count),
        NetworkTag::Mastercard | NetworkTag::Rupay => count == 16,
        NetworkTag::Unknown => false,
    }
}

/// Group digits in blocks of four: `4111111111111111` → `4111 1111 1111 1111`.
pub fn format_card_number(input: &str) -> String {
    let digits = digits_only(input);
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 4);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && idx % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(ch);
    }
    formatted
}

// `digits` is ASCII and at least `len` long.
fn prefix(digits: &str, len: usize) -> u32 {
    digits
        .bytes()
        .take(len)
        .fold(0, |acc, byte| acc * 10 + u32::from(byte - b'0'))
}
