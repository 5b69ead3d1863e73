//! Recognition of numeric field text.
//!
//! Accepted forms: an optional sign, digits with an optional fraction (or a
//! bare fraction such as `.5`), an optional exponent, and the literal words
//! `Infinity` and `NaN` with an optional sign.

/// Parse `text` as a number, or `None` if it is not entirely numeric.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = match unsigned {
        "Infinity" => f64::INFINITY,
        "NaN" => f64::NAN,
        _ if is_decimal_literal(unsigned) => unsigned.parse::<f64>().ok()?,
        _ => return None,
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// `digits [ '.' digits* ] [ exponent ]` or `'.' digits+ [ exponent ]`.
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = count_digits(&bytes[i..]);
        i += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_digits = count_digits(&bytes[i..]);
        if exp_digits == 0 {
            return false;
        }
        i += exp_digits;
    }

    i == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
