use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::NamingConfig;
use crate::spec::Category;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());
static ALPHABETICAL_INC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]+$").unwrap());

/// Check one raw value against its category under the given config.
///
/// Value-set categories compare case-insensitively; the raw text is
/// otherwise carried verbatim by callers.
pub fn validate_value(category: Category, config: &NamingConfig, raw: &str) -> bool {
    match category {
        Category::Name => NAME_RE.is_match(raw),
        Category::Type => in_set(config.type_values(), raw),
        Category::Symmetry => {
            in_set(config.symmetry_options.iter().map(String::as_str), raw)
        }
        Category::Zoning => in_set_owned(&config.zoning.allowed_values(), raw),
        Category::Orientation => in_set_owned(&config.orientation.allowed_values(), raw),
        Category::AlphabeticalInc => ALPHABETICAL_INC_RE.is_match(raw),
        Category::NumericalInc => {
            raw.len() == config.numeric_digits as usize
                && raw.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

/// Human description of what a category accepts, for problem messages.
pub fn describe_expected(category: Category, config: &NamingConfig) -> String {
    match category {
        Category::Name => "letters and digits".to_string(),
        Category::Type => format!("one of {}", join(config.type_values())),
        Category::Symmetry => format!(
            "one of {}",
            join(config.symmetry_options.iter().map(String::as_str))
        ),
        Category::Zoning => format!(
            "one of {}",
            join(config.zoning.allowed_values().iter().map(String::as_str))
        ),
        Category::Orientation => format!(
            "one of {}",
            join(
                config
                    .orientation
                    .allowed_values()
                    .iter()
                    .map(String::as_str)
            )
        ),
        Category::AlphabeticalInc => "uppercase letters".to_string(),
        Category::NumericalInc => format!("exactly {} digits", config.numeric_digits),
    }
}

/// Byte length of the longest valid value at the start of `text`,
/// or None when the category cannot consume anything there.
pub fn take_prefix(category: Category, config: &NamingConfig, text: &str) -> Option<usize> {
    match category {
        Category::Name => None,
        Category::Type => longest_prefix(config.type_values(), text),
        Category::Symmetry => {
            longest_prefix(config.symmetry_options.iter().map(String::as_str), text)
        }
        Category::Zoning => {
            longest_prefix_owned(&config.zoning.allowed_values(), text)
        }
        Category::Orientation => {
            longest_prefix_owned(&config.orientation.allowed_values(), text)
        }
        Category::AlphabeticalInc => {
            let n = text.bytes().take_while(|b| b.is_ascii_uppercase()).count();
            (n > 0).then_some(n)
        }
        Category::NumericalInc => {
            let width = config.numeric_digits as usize;
            let head = text.get(..width)?;
            head.bytes().all(|b| b.is_ascii_digit()).then_some(width)
        }
    }
}

/// Byte length of the longest valid value at the end of `text`.
pub fn take_suffix(category: Category, config: &NamingConfig, text: &str) -> Option<usize> {
    match category {
        Category::Name => None,
        Category::Type => longest_suffix(config.type_values(), text),
        Category::Symmetry => {
            longest_suffix(config.symmetry_options.iter().map(String::as_str), text)
        }
        Category::Zoning => {
            longest_suffix_owned(&config.zoning.allowed_values(), text)
        }
        Category::Orientation => {
            longest_suffix_owned(&config.orientation.allowed_values(), text)
        }
        Category::AlphabeticalInc => {
            let n = text
                .bytes()
                .rev()
                .take_while(|b| b.is_ascii_uppercase())
                .count();
            (n > 0).then_some(n)
        }
        Category::NumericalInc => {
            let width = config.numeric_digits as usize;
            let start = text.len().checked_sub(width)?;
            let tail = text.get(start..)?;
            tail.bytes().all(|b| b.is_ascii_digit()).then_some(width)
        }
    }
}

fn in_set<'a>(mut values: impl Iterator<Item = &'a str>, raw: &str) -> bool {
    values.any(|v| v.eq_ignore_ascii_case(raw))
}

fn in_set_owned(values: &[String], raw: &str) -> bool {
    values.iter().any(|v| v.eq_ignore_ascii_case(raw))
}

/// Longest value that is a case-insensitive prefix of `text`; ties
/// keep the earliest configured value.
fn longest_prefix<'a>(values: impl Iterator<Item = &'a str>, text: &str) -> Option<usize> {
    let mut best: Option<usize> = None;
    for v in values {
        if v.is_empty() {
            continue;
        }
        if let Some(head) = text.get(..v.len()) {
            if head.eq_ignore_ascii_case(v) && best.is_none_or(|b| v.len() > b) {
                best = Some(v.len());
            }
        }
    }
    best
}

fn longest_prefix_owned(values: &[String], text: &str) -> Option<usize> {
    longest_prefix(values.iter().map(String::as_str), text)
}

fn longest_suffix<'a>(values: impl Iterator<Item = &'a str>, text: &str) -> Option<usize> {
    let mut best: Option<usize> = None;
    for v in values {
        if v.is_empty() {
            continue;
        }
        let Some(start) = text.len().checked_sub(v.len()) else {
            continue;
        };
        if let Some(tail) = text.get(start..) {
            if tail.eq_ignore_ascii_case(v) && best.is_none_or(|b| v.len() > b) {
                best = Some(v.len());
            }
        }
    }
    best
}

fn longest_suffix_owned(values: &[String], text: &str) -> Option<usize> {
    longest_suffix(values.iter().map(String::as_str), text)
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}
