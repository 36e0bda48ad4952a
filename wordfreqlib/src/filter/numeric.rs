//! Numeric stripping.
//!
//! A token is numeric when the whole token reads as an integer (optional
//! sign, ASCII digits) whose value is greater than zero, or when it is
//! exactly `"0"`. `"7"`, `"+5"` and `"007"` are numeric; `"00"`, `"-0"`,
//! `"-5"`, `"4.5"` and `"47abc"` are ordinary tokens.

/// Whether `token` is a positive integer or the literal `"0"`.
pub fn is_numeric(token: &str) -> bool {
    if token == "0" {
        return true;
    }
    let digits = match token.as_bytes().first() {
        Some(b'-') => return false,
        Some(b'+') => &token[1..],
        _ => token,
    };
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits.bytes().any(|b| b != b'0')
}

/// Remove every numeric token, keeping the order of the rest.
pub fn strip_numeric(tokens: &mut Vec<String>) -> usize {
    let before = tokens.len();
    tokens.retain(|token| !is_numeric(token));
    before - tokens.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_tokens() {
        for token in ["0", "47", "321", "007", "+5", "99999999999999999999999"] {
            assert!(is_numeric(token), "{} should be numeric", token);
        }
    }

    #[test]
    fn test_zero_valued_tokens_other_than_zero() {
        for token in ["00", "000", "-0", "+0"] {
            assert!(!is_numeric(token), "{} should not be numeric", token);
        }
    }

    #[test]
    fn test_leading_digits_are_not_numeric() {
        for token in ["47abc", "-5", "4.5", "", "+", "a1", "١٢"] {
            assert!(!is_numeric(token), "{} should not be numeric", token);
        }
    }

    #[test]
    fn test_strip_numeric() {
        let mut tokens: Vec<String> = "This is a test 321 string. This is 0 a second test string 47"
            .split(' ')
            .map(String::from)
            .collect();
        let removed = strip_numeric(&mut tokens);
        assert_eq!(removed, 3);
        assert_eq!(
            tokens.join(" "),
            "This is a test string. This is a second test string"
        );
    }

    #[test]
    fn test_strip_keeps_zero_padded_tokens() {
        let mut tokens: Vec<String> = ["00", "000", "+5", "7", "0", "word"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        strip_numeric(&mut tokens);
        assert_eq!(tokens, vec!["00", "000", "word"]);
    }
}
