// Field extraction over cleaned OCR lines.
//
// Each field has an ordered list of strategies (`line -> Option<value>`).
// The first strategy to produce a value wins and the fields never look at
// each other's results.
use crate::models::{ExtractedDetails, Gender};
use crate::processing::date::normalize_date;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

type Strategy = fn(&str) -> Option<String>;

lazy_static! {
    static ref LABELED_NAME: Regex =
        Regex::new(r"(?i)\b(?:full name|name|नाम|फुल नेम)\b\s*[:;]?\s*([a-z][a-z\s]*)").unwrap();
    static ref BARE_NAME: Regex = Regex::new(r"^([A-Z][a-z]+(?: [A-Z][a-z]+){1,2})$").unwrap();

    static ref DAY_FIRST_DATE: Regex =
        Regex::new(r"\b([0-9]{1,2}[/\-.][0-9]{1,2}[/\-.][0-9]{2,4})\b").unwrap();
    static ref YEAR_FIRST_DATE: Regex =
        Regex::new(r"\b([0-9]{4}[/\-.][0-9]{1,2}[/\-.][0-9]{1,2})\b").unwrap();

    static ref LABELED_GENDER: Regex = Regex::new(
        r"(?i)(?:gender|लिंग|जेंडर)\s*[:;]?\s*(male|female|transgender|m|f|t|पुरुष|महिला|स्त्री|ट्रांसजेंडर)\b"
    )
    .unwrap();
    static ref BARE_GENDER: Regex = Regex::new(
        r"(?i)\b(male|female|transgender|m|f|t|पुरुष|महिला|स्त्री|ट्रांसजेंडर)\b"
    )
    .unwrap();
}

// Lines mentioning any of these belong to the DOB or gender fields.
const NAME_SKIP_KEYWORDS: [&str; 4] = ["dob", "date", "birth", "gender"];

const NAME_STRATEGIES: [Strategy; 2] = [labeled_name, bare_name];
const DOB_STRATEGIES: [Strategy; 2] = [day_first_date, year_first_date];
const GENDER_STRATEGIES: [Strategy; 2] = [labeled_gender, bare_gender];

pub struct FieldExtractor;

impl FieldExtractor {
    pub fn extract(lines: &[String]) -> ExtractedDetails {
        let details = ExtractedDetails {
            name: Self::extract_name(lines),
            dob: Self::extract_dob(lines),
            gender: Self::extract_gender(lines),
        };
        debug!("Extracted details: {:?}", details);
        details
    }

    /// Line by line: every strategy is tried on a line before moving on.
    /// Lines carrying a DOB or gender keyword are never used for the name.
    pub fn extract_name(lines: &[String]) -> Option<String> {
        lines
            .iter()
            .filter(|line| !mentions_other_field(line))
            .find_map(|line| NAME_STRATEGIES.iter().find_map(|strategy| strategy(line.as_str())))
    }

    /// Pattern by pattern: a day-first date anywhere beats a year-first one.
    pub fn extract_dob(lines: &[String]) -> Option<String> {
        first_by_strategy(lines, &DOB_STRATEGIES).map(|raw| normalize_date(&raw))
    }

    /// Pattern by pattern: a labeled value anywhere beats a bare keyword.
    pub fn extract_gender(lines: &[String]) -> Option<Gender> {
        first_by_strategy(lines, &GENDER_STRATEGIES).map(|token| Gender::from_token(&token))
    }
}

fn first_by_strategy(lines: &[String], strategies: &[Strategy]) -> Option<String> {
    strategies
        .iter()
        .find_map(|strategy| lines.iter().find_map(|line| strategy(line.as_str())))
}

fn mentions_other_field(line: &str) -> bool {
    let lower = line.to_lowercase();
    NAME_SKIP_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

fn capture(pattern: &Regex, line: &str) -> Option<String> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn labeled_name(line: &str) -> Option<String> {
    capture(&LABELED_NAME, line).filter(|name| is_plausible_name(name))
}

// At least two words and 4-50 characters.
fn is_plausible_name(name: &str) -> bool {
    let length = name.chars().count();
    name.split_whitespace().count() >= 2 && (4..=50).contains(&length)
}

fn bare_name(line: &str) -> Option<String> {
    capture(&BARE_NAME, line)
}

fn day_first_date(line: &str) -> Option<String> {
    capture(&DAY_FIRST_DATE, line)
}

fn year_first_date(line: &str) -> Option<String> {
    capture(&YEAR_FIRST_DATE, line)
}

fn labeled_gender(line: &str) -> Option<String> {
    capture(&LABELED_GENDER, line)
}

fn bare_gender(line: &str) -> Option<String> {
    capture(&BARE_GENDER, line)
}
