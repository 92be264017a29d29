//! Amount extraction from transcribed speech.
//!
//! Resolution order:
//!
//! 1. The first run of ASCII digits in the text, parsed as base 10. Digits
//!    always win over number words ("pay 250 rupees" → 250).
//! 2. Otherwise a left fold over English number words: units, teens and
//!    tens add into `current`; "hundred" multiplies `current` (or yields 100
//!    when nothing is accumulated); "thousand" multiplies `current` (or 1),
//!    commits it into `total` and resets `current`.
//!
//! The result is `total + current`, and only strictly positive values are
//! reported. Zero and "nothing recognized" both come back as `None`.

/// A non-negative amount in major currency units.
pub type Amount = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberWord {
    Value(u64),
    Hundred,
    Thousand,
}

fn lookup(word: &str) -> Option<NumberWord> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        "hundred" => return Some(NumberWord::Hundred),
        "thousand" => return Some(NumberWord::Thousand),
        _ => return None,
    };
    Some(NumberWord::Value(value))
}

/// Extract a spoken amount from a transcript.
///
/// Returns `None` when no positive amount is found, including when the
/// digits or words describe a value that does not fit in [`Amount`].
pub fn parse_amount(text: &str) -> Option<Amount> {
    match first_digit_run(text) {
        Some(digits) => digits.parse::<Amount>().ok().filter(|amount| *amount > 0),
        None => fold_number_words(text).filter(|amount| *amount > 0),
    }
}

fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Strip everything except word characters (letters, digits, `_`).
fn normalize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

fn fold_number_words(text: &str) -> Option<Amount> {
    let lowered = text.to_lowercase();
    let mut total: Amount = 0;
    let mut current: Amount = 0;

    for token in lowered.split_whitespace() {
        let Some(word) = lookup(&normalize_token(token)) else {
            continue;
        };
        match word {
            NumberWord::Value(value) => {
                current = current.checked_add(value)?;
            }
            NumberWord::Hundred => {
                current = if current == 0 {
                    100
                } else {
                    current.checked_mul(100)?
                };
            }
            NumberWord::Thousand => {
                let group = if current == 0 { 1 } else { current };
                total = total.checked_add(group.checked_mul(1000)?)?;
                current = 0;
            }
        }
    }

    total.checked_add(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_win_over_words() {
        assert_eq!(parse_amount("pay 250 rupees"), Some(250));
        assert_eq!(parse_amount("two hundred or 75"), Some(75));
    }

    #[test]
    fn test_first_digit_run_only() {
        assert_eq!(parse_amount("send 40 then 60"), Some(40));
        assert_eq!(parse_amount("1,500 rupees"), Some(1));
        assert_eq!(parse_amount("Rs.300/-"), Some(300));
    }

    #[test]
    fn test_number_words() {
        assert_eq!(parse_amount("two hundred fifty"), Some(250));
        assert_eq!(parse_amount("two thousand five hundred"), Some(2500));
        assert_eq!(parse_amount("Forty-two"), None);
        assert_eq!(parse_amount("forty two"), Some(42));
        assert_eq!(parse_amount("nineteen"), Some(19));
    }

    #[test]
    fn test_left_fold_multiplication() {
        assert_eq!(parse_amount("twenty one hundred"), Some(2100));
        assert_eq!(parse_amount("one hundred thousand"), Some(100_000));
    }

    #[test]
    fn test_bare_magnitudes() {
        assert_eq!(parse_amount("hundred"), Some(100));
        assert_eq!(parse_amount("a thousand rupees"), Some(1000));
        assert_eq!(parse_amount("thousand and five"), Some(1005));
    }

    #[test]
    fn test_punctuation_and_case() {
        assert_eq!(parse_amount("Pay FIVE hundred, please."), Some(500));
        assert_eq!(parse_amount("\"Seventy!\""), Some(70));
    }

    #[test]
    fn test_nothing_recognized() {
        assert_eq!(parse_amount("hello world"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
    }

    #[test]
    fn test_zero_is_suppressed() {
        assert_eq!(parse_amount("zero"), None);
        assert_eq!(parse_amount("pay 0 rupees"), None);
        assert_eq!(parse_amount("000"), None);
    }

    #[test]
    fn test_overflow_yields_none() {
        assert_eq!(parse_amount("99999999999999999999999"), None);
        let words = "thousand ".repeat(8);
        assert_eq!(parse_amount(&words), Some(8000));
        let nested = format!("nine {}", "hundred ".repeat(10));
        assert_eq!(parse_amount(&nested), None);
    }
}
