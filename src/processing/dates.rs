// Date recognition for certificate OCR text.
// Each supported layout is a small matcher; the recognizer runs them in
// priority order over every line and keeps dates inside the accepted years.

use crate::models::{ExtractionRules, RecognizedDate};
use crate::processing::ocr_lines;
use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use log::trace;
use regex::{Captures, Regex};

lazy_static! {
    // 01/03/2023, 1.3.23, 01-03-2023
    static ref DAY_FIRST_PATTERN: Regex =
        Regex::new(r"(?:^|[^0-9])([0-9]{1,2})[./-]([0-9]{1,2})[./-]([0-9]{4}|[0-9]{2})").unwrap();
    // 2023-03-01, 2023.3.1
    static ref YEAR_FIRST_PATTERN: Regex =
        Regex::new(r"(?:^|[^0-9])([0-9]{4})[./-]([0-9]{1,2})[./-]([0-9]{1,2})").unwrap();
    // 1 March 2023, 01 Mar 2023, 1st Sept. 2023
    static ref MONTH_NAME_PATTERN: Regex = Regex::new(
        r"(?i)(?:^|[^0-9])([0-9]{1,2})(?:st|nd|rd|th)?\s+((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]{0,6})\.?,?\s+([0-9]{4}|[0-9]{2})"
    )
    .unwrap();
    static ref CONTINUES_AS_DATE: Regex = Regex::new(r"^[./-][0-9]").unwrap();
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// A date-shaped substring that forms a real calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCandidate<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
    pub date: NaiveDate,
}

pub type DateMatcher = for<'a> fn(&'a str) -> Vec<DateCandidate<'a>>;

/// Matchers in priority order. When two match the same text the earlier one wins.
pub const DATE_MATCHERS: [(&str, DateMatcher); 3] = [
    ("day-first", match_day_first),
    ("year-first", match_year_first),
    ("month-name", match_month_name),
];

pub fn match_day_first(line: &str) -> Vec<DateCandidate<'_>> {
    scan_pattern(&DAY_FIRST_PATTERN, line, |caps| {
        let day = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let year = expand_year(&caps[3])?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

pub fn match_year_first(line: &str) -> Vec<DateCandidate<'_>> {
    scan_pattern(&YEAR_FIRST_PATTERN, line, |caps| {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

pub fn match_month_name(line: &str) -> Vec<DateCandidate<'_>> {
    scan_pattern(&MONTH_NAME_PATTERN, line, |caps| {
        let day = caps[1].parse().ok()?;
        let month = month_from_name(&caps[2])?;
        let year = expand_year(&caps[3])?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// Resolve a month token by its first three letters (`Sept` -> 9).
pub fn month_from_name(token: &str) -> Option<u32> {
    let prefix: String = token.chars().take(3).collect::<String>().to_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|abbr| *abbr == prefix)
        .map(|index| index as u32 + 1)
}

/// Two-digit years belong to the 2000s.
fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    if raw.len() == 2 {
        Some(2000 + year)
    } else {
        Some(year)
    }
}

fn scan_pattern<'a, F>(pattern: &Regex, line: &'a str, build: F) -> Vec<DateCandidate<'a>>
where
    F: Fn(&Captures) -> Option<NaiveDate>,
{
    pattern
        .captures_iter(line)
        .filter_map(|caps| {
            let start = caps.get(1)?.start();
            let end = caps.get(0)?.end();
            let text = &line[start..end];
            // 01/03/20234 is not a date followed by a digit
            let rest = &line[end..];
            if rest.starts_with(|c: char| c.is_ascii_digit()) {
                trace!("Skipping '{}': run of digits continues", text);
                return None;
            }
            // "5 March 01/03/2023": the year is the start of another date
            if CONTINUES_AS_DATE.is_match(rest) {
                trace!("Skipping '{}': followed by another date part", text);
                return None;
            }
            match build(&caps) {
                Some(date) => Some(DateCandidate { start, end, text, date }),
                None => {
                    trace!("Skipping '{}': not a calendar date", text);
                    None
                }
            }
        })
        .collect()
}

/// Finds dates in OCR text and normalizes them to calendar dates.
#[derive(Debug, Clone)]
pub struct DateRecognizer {
    min_year: i32,
    max_year: i32,
}

impl Default for DateRecognizer {
    fn default() -> Self {
        Self::new(&ExtractionRules::default())
    }
}

impl DateRecognizer {
    pub fn new(rules: &ExtractionRules) -> Self {
        DateRecognizer {
            min_year: rules.min_year,
            max_year: rules.max_year,
        }
    }

    pub fn accepts_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    /// Lazily yields every accepted date, in line order then left to right.
    ///
    /// The iterator borrows `text` and holds no other state, so calling this
    /// again on the same text yields the same sequence.
    pub fn recognize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = RecognizedDate> + 'a {
        ocr_lines(text).flat_map(move |line| self.recognize_line(line))
    }

    /// All accepted dates on a single (already trimmed) line.
    pub fn recognize_line(&self, line: &str) -> Vec<RecognizedDate> {
        let mut candidates: Vec<(usize, DateCandidate<'_>)> = DATE_MATCHERS
            .iter()
            .enumerate()
            .flat_map(|(priority, (_, matcher))| {
                matcher(line).into_iter().map(move |candidate| (priority, candidate))
            })
            .collect();
        candidates.sort_by_key(|(priority, candidate)| (candidate.start, *priority));

        let mut dates = Vec::new();
        let mut covered_until = 0;
        for (priority, candidate) in candidates {
            if candidate.start < covered_until {
                trace!(
                    "Skipping {} match '{}': overlaps an earlier date",
                    DATE_MATCHERS[priority].0,
                    candidate.text
                );
                continue;
            }
            let year = candidate.date.year();
            if !self.accepts_year(year) {
                trace!("Skipping '{}': year {} out of range", candidate.text, year);
                continue;
            }
            covered_until = candidate.end;
            dates.push(RecognizedDate {
                original_text: candidate.text.to_string(),
                date: candidate.date,
                source_line: line.to_string(),
            });
        }
        dates
    }
}
