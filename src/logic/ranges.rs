use crate::models::IdealRange;
use regex_lite::Regex;
use std::sync::OnceLock;

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("static pattern"))
}

/// All runs of ASCII digits in `text`, in the order they appear.
pub fn integers(text: &str) -> Vec<f64> {
    integer_pattern()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// First integer becomes `min`, second becomes `max`. The pair is not
/// reordered, so text listing the upper bound first yields an inverted
/// range. Fewer than two integers gives `default`.
pub fn parse_range(text: &str, default: IdealRange) -> IdealRange {
    let numbers = integers(text);
    match numbers.as_slice() {
        [min, max, ..] => IdealRange::new(*min, *max),
        _ => default,
    }
}

pub fn temperature_range(text: &str) -> IdealRange {
    parse_range(text, IdealRange::DEFAULT_TEMPERATURE)
}

pub fn humidity_range(text: &str) -> IdealRange {
    parse_range(text, IdealRange::DEFAULT_HUMIDITY)
}
