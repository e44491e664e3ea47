//! Value-level cleaning rules.
//!
//! Every function here is idempotent on its own output: applying it to an
//! already-cleaned value returns the value unchanged.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static QUOTED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^,]*)'").expect("valid quoted token pattern"));

/// Title-cases a value: lowercase everything, then uppercase the first letter
/// of each word. A word starts after any non-alphanumeric character.
///
/// ```
/// use lendflow_transform::cleaning::title_case;
///
/// assert_eq!(title_case("  san FRANCISCO "), "San Francisco");
/// assert_eq!(title_case("john willey & sons"), "John Willey & Sons");
/// assert_eq!(title_case("3rd street"), "3rd Street");
/// ```
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.trim().chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = !ch.is_alphanumeric();
    }
    out
}

/// Title-cases each whitespace-delimited word and rejoins them with single
/// spaces.
///
/// ```
/// use lendflow_transform::cleaning::title_case_words;
///
/// assert_eq!(title_case_words(" example   Title  "), "Example Title");
/// ```
pub fn title_case_words(value: &str) -> String {
    value
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trims and uppercases a value.
pub fn upper_case(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Trims and lowercases a value.
pub fn lower_case(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Keeps only the characters accepted by `keep`.
pub fn retain_chars(value: &str, keep: impl Fn(char) -> bool) -> String {
    value.chars().filter(|ch| keep(*ch)).collect()
}

fn is_date_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == ' ' || ch == '-'
}

fn is_decimal_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

/// Extracts the first single-quoted token of a stringified list.
///
/// Only the first element is recovered; `"['A', 'B']"` yields `"A"`.
///
/// ```
/// use lendflow_transform::cleaning::first_quoted_token;
///
/// assert_eq!(first_quoted_token("['Frank Herbert']"), Some("Frank Herbert".to_string()));
/// assert_eq!(first_quoted_token("Frank Herbert"), None);
/// ```
pub fn first_quoted_token(value: &str) -> Option<String> {
    QUOTED_TOKEN
        .captures(value)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str().to_string())
}

/// Parses a `YYYY-MM-DD` date after dropping characters other than digits,
/// spaces and hyphens. Anything unparseable is `None`.
///
/// ```
/// use chrono::NaiveDate;
/// use lendflow_transform::cleaning::parse_lenient_date;
///
/// assert_eq!(parse_lenient_date(" 2022-02-01#"), NaiveDate::from_ymd_opt(2022, 2, 1));
/// assert_eq!(parse_lenient_date("%2018 05 05"), None);
/// ```
pub fn parse_lenient_date(value: &str) -> Option<NaiveDate> {
    let cleaned = retain_chars(value, is_date_char);
    NaiveDate::parse_from_str(cleaned.trim(), "%Y-%m-%d").ok()
}

/// Extracts a year from the leading four digits of a noisy date string.
///
/// ```
/// use lendflow_transform::cleaning::parse_year;
///
/// assert_eq!(parse_year(" 20180609"), Some(2018));
/// assert_eq!(parse_year("c.1999?"), Some(1999));
/// assert_eq!(parse_year("June 99"), None);
/// ```
pub fn parse_year(value: &str) -> Option<i32> {
    let cleaned = retain_chars(value, is_date_char);
    let digits = cleaned.trim().get(..4)?;
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parses a price, dropping everything but digits and the decimal point,
/// rounded to cents.
///
/// ```
/// use lendflow_transform::cleaning::parse_price;
///
/// assert_eq!(parse_price(" $12.499 "), Some(12.5));
/// assert_eq!(parse_price("free"), None);
/// ```
pub fn parse_price(value: &str) -> Option<f32> {
    let cleaned = retain_chars(value, is_decimal_char);
    let price: f64 = cleaned.parse().ok()?;
    Some(((price * 100.0).round() / 100.0) as f32)
}

/// Parses a whole number from its digits only (`"300 pages"` is 300).
pub fn parse_whole_number(value: &str) -> Option<i32> {
    retain_chars(value, |ch| ch.is_ascii_digit()).parse().ok()
}

/// Parses a zipcode through a float, truncating any fractional part
/// (`"94107.0"` is 94107).
pub fn parse_zipcode(value: &str) -> Option<i32> {
    let cleaned = retain_chars(value, is_decimal_char);
    let zipcode: f64 = cleaned.parse().ok()?;
    if !zipcode.is_finite() || zipcode < f64::from(i32::MIN) || zipcode > f64::from(i32::MAX) {
        return None;
    }
    Some(zipcode.trunc() as i32)
}

/// Keeps only ASCII letters and digits of a postal code.
///
/// ```
/// use lendflow_transform::cleaning::clean_postal_code;
///
/// assert_eq!(clean_postal_code(" SW1A 1AA "), "SW1A1AA");
/// assert_eq!(clean_postal_code("97201-1234"), "972011234");
/// ```
pub fn clean_postal_code(value: &str) -> String {
    retain_chars(value, |ch| ch.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_lowercases_inner_letters() {
        assert_eq!(title_case("MCDONALD"), "Mcdonald");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }

    #[test]
    fn test_title_case_words_empty() {
        assert_eq!(title_case_words("   "), "");
        assert_eq!(title_case_words(""), "");
    }

    #[test]
    fn test_upper_and_lower_case() {
        assert_eq!(upper_case(" or "), "OR");
        assert_eq!(lower_case(" Female "), "female");
    }

    #[test]
    fn test_first_quoted_token_takes_first_element() {
        assert_eq!(
            first_quoted_token("['Fiction', 'Drama']"),
            Some("Fiction".to_string())
        );
        assert_eq!(first_quoted_token("[]"), None);
    }

    #[test]
    fn test_parse_lenient_date_invalid_calendar_date() {
        assert_eq!(parse_lenient_date("2022-02-30"), None);
        assert_eq!(parse_lenient_date(""), None);
    }

    #[test]
    fn test_parse_year_too_short() {
        assert_eq!(parse_year("199"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn test_parse_price_rejects_multiple_points() {
        assert_eq!(parse_price("1.2.3"), None);
        assert_eq!(parse_price("USD 8"), Some(8.0));
    }

    #[test]
    fn test_parse_whole_number() {
        assert_eq!(parse_whole_number("300 pages"), Some(300));
        assert_eq!(parse_whole_number("n/a"), None);
    }

    #[test]
    fn test_parse_zipcode() {
        assert_eq!(parse_zipcode("94107.0"), Some(94107));
        assert_eq!(parse_zipcode(" 02134 "), Some(2134));
        assert_eq!(parse_zipcode("unknown"), None);
    }
}
