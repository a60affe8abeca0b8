//! Publication date normalization.
//!
//! A profile pattern first captures the working date string out of the raw
//! element HTML. The working string is then run through a fixed list of date
//! shapes; the first shape that recognizes it decides the outcome.
//!
//! ### Shapes (in order)
//! - `iso`: starts with `YYYY-MM-DD`, accepted as-is.
//! - `month_day_year`: a capitalized month word, a day number (ordinal suffixes
//!   and punctuation tolerated) and a four-digit year, e.g. `November 27th 2020`.
//!
//! Month words resolve by substring containment against the month table, so
//! `Nov` finds `November`. The first table entry containing the token wins.

use std::sync::LazyLock;

use broadsheet_core::Error;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ISO_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("invalid regex"));
static MONTH_DAY_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]+) ([0-9]+).*?([0-9]{4})").expect("invalid regex"));

/// English month names in calendar order.
pub const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Ordered table of twelve month names, January first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MonthNames(Vec<String>);

impl MonthNames {
    /// The English table.
    pub fn english() -> Self {
        Self(ENGLISH_MONTHS.iter().map(|m| m.to_string()).collect())
    }

    /// Build a table from exactly twelve non-empty names.
    pub fn new(names: Vec<String>) -> Result<Self, String> {
        if names.len() != 12 {
            return Err(format!("month_names must list 12 months, got {}", names.len()));
        }
        if let Some(pos) = names.iter().position(|n| n.trim().is_empty()) {
            return Err(format!("month_names entry {} is empty", pos + 1));
        }
        Ok(Self(names))
    }

    /// 1-based month number of the first name containing `token`.
    ///
    /// Matching is case-sensitive.
    pub fn month_number(&self, token: &str) -> Option<u32> {
        self.0
            .iter()
            .position(|name| name.contains(token))
            .map(|i| i as u32 + 1)
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::english()
    }
}

impl TryFrom<Vec<String>> for MonthNames {
    type Error = String;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<MonthNames> for Vec<String> {
    fn from(months: MonthNames) -> Self {
        months.0
    }
}

/// A recognizer for one date shape.
///
/// Returns `None` when the shape does not apply, so the next one is tried.
type DateShape = fn(&str, &MonthNames) -> Option<Result<String, Error>>;

const DATE_SHAPES: &[(&str, DateShape)] = &[("iso", parse_iso_prefix), ("month_day_year", parse_month_day_year)];

/// Capture the working date string with the profile's pattern.
///
/// # Errors
///
/// Returns `Error::Extraction("published_time_regex")` if the pattern does not
/// match or has no first group.
pub fn capture_working_date<'a>(raw: &'a str, pattern: &Regex) -> Result<&'a str, Error> {
    pattern
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .ok_or_else(|| Error::Extraction("published_time_regex".into()))
}

/// Normalize an already captured working date string to `YYYY-MM-DD`.
///
/// # Errors
///
/// - `Error::DateFormat` if a shape matched but the date is not on the calendar
/// - `Error::UnrecognizedDateFormat` if no shape matched
pub fn normalize_working_date(working: &str, months: &MonthNames) -> Result<String, Error> {
    for (name, shape) in DATE_SHAPES {
        if let Some(result) = shape(working, months) {
            tracing::trace!(shape = name, working, "date shape matched");
            return result;
        }
    }

    Err(Error::UnrecognizedDateFormat(working.to_string()))
}

/// Capture and normalize a publication date in one step.
pub fn normalize_date(raw: &str, pattern: &Regex, months: &MonthNames) -> Result<String, Error> {
    let working = capture_working_date(raw, pattern)?;
    normalize_working_date(working, months)
}

/// `YYYY-MM-DD` prefix, taken without calendar validation.
fn parse_iso_prefix(working: &str, _months: &MonthNames) -> Option<Result<String, Error>> {
    ISO_PREFIX.find(working).map(|m| Ok(m.as_str().to_string()))
}

/// `<Month> <day>... <year>`, e.g. `Nov 3, 2020` or `November 27th 2020`.
fn parse_month_day_year(working: &str, months: &MonthNames) -> Option<Result<String, Error>> {
    let caps = MONTH_DAY_YEAR.captures(working)?;
    let month = months.month_number(&caps[1])?;
    let (day, year) = (&caps[2], &caps[3]);

    let assembled = format!("{year}-{month}-{day}");
    let date = match (year.parse::<i32>(), day.parse::<u32>()) {
        (Ok(y), Ok(d)) => NaiveDate::from_ymd_opt(y, month, d),
        _ => None,
    };

    Some(
        date.map(|d| d.format("%Y-%m-%d").to_string())
            .ok_or_else(|| Error::DateFormat(format!("{assembled} is not a valid calendar date"))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(p: &str) -> Regex {
        Regex::new(p).unwrap()
    }

    #[test]
    fn test_iso_passthrough() {
        let result = normalize_date("2021-05-03", &pattern("(.+)"), &MonthNames::english());
        assert_eq!(result.unwrap(), "2021-05-03");
    }

    #[test]
    fn test_iso_prefix_of_timestamp() {
        let raw = r#"<time datetime="2020-11-27T10:15:00Z">Nov 27</time>"#;
        let result = normalize_date(raw, &pattern(r#"datetime="(.*?)""#), &MonthNames::english());
        assert_eq!(result.unwrap(), "2020-11-27");
    }

    #[test]
    fn test_month_day_year_reformat() {
        let result = normalize_date("Published: November 27th 2020", &pattern("Published: (.+)"), &MonthNames::english());
        assert_eq!(result.unwrap(), "2020-11-27");
    }

    #[test]
    fn test_month_day_year_abbreviated_with_comma() {
        let months = MonthNames::english();
        assert_eq!(normalize_working_date("Nov 3, 2020", &months).unwrap(), "2020-11-03");
        assert_eq!(normalize_working_date("Updated Sept 9 2019 4:00 PM", &months).unwrap(), "2019-09-09");
    }

    #[test]
    fn test_month_substring_first_match_wins() {
        let months = MonthNames::english();
        assert_eq!(months.month_number("Jun"), Some(6));
        assert_eq!(months.month_number("Ju"), Some(6));
        assert_eq!(months.month_number("Ma"), Some(3));
        assert_eq!(months.month_number("May"), Some(5));
        assert_eq!(months.month_number("nov"), None);
        assert_eq!(months.month_number("Smarch"), None);
    }

    #[test]
    fn test_invalid_calendar_date() {
        let result = normalize_working_date("April 31st 2021", &MonthNames::english());
        assert!(matches!(result, Err(Error::DateFormat(_))));

        let result = normalize_working_date("February 29 2021", &MonthNames::english());
        assert!(matches!(result, Err(Error::DateFormat(_))));
    }

    #[test]
    fn test_leap_day_accepted() {
        assert_eq!(normalize_working_date("February 29 2020", &MonthNames::english()).unwrap(), "2020-02-29");
    }

    #[test]
    fn test_unrecognized_format() {
        let result = normalize_working_date("yesterday afternoon", &MonthNames::english());
        assert!(matches!(result, Err(Error::UnrecognizedDateFormat(s)) if s == "yesterday afternoon"));
    }

    #[test]
    fn test_unknown_month_word_is_unrecognized() {
        let result = normalize_working_date("Page 2 of 2020", &MonthNames::english());
        assert!(matches!(result, Err(Error::UnrecognizedDateFormat(_))));
    }

    #[test]
    fn test_pattern_miss_is_extraction_error() {
        let result = normalize_date("<span>no date</span>", &pattern(r#"datetime="(.*?)""#), &MonthNames::english());
        assert!(matches!(result, Err(Error::Extraction(field)) if field == "published_time_regex"));
    }

    #[test]
    fn test_custom_month_table() {
        let months = MonthNames::new(
            [
                "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September", "Oktober", "November",
                "Dezember",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
        )
        .unwrap();
        assert_eq!(normalize_working_date("Oktober 3 2022", &months).unwrap(), "2022-10-03");
    }

    #[test]
    fn test_month_table_length_checked() {
        assert!(MonthNames::new(vec!["January".into()]).is_err());

        let mut names: Vec<String> = ENGLISH_MONTHS.iter().map(|m| m.to_string()).collect();
        names[4] = " ".into();
        assert!(MonthNames::new(names).is_err());
    }

    #[test]
    fn test_shape_order() {
        let names: Vec<&str> = DATE_SHAPES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["iso", "month_day_year"]);
        assert!(parse_iso_prefix("November 27th 2020", &MonthNames::english()).is_none());
        assert!(parse_month_day_year("2020-11-27", &MonthNames::english()).is_none());
    }
}
