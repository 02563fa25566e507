// Field-specific extraction functions for FieldExtractor
use super::FieldExtractor;
use crate::models::{ConfidenceLevel, ExtractedField, RecognizedDate};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref CAPITALIZED_WORD: Regex = Regex::new(r"^\p{Lu}\p{Ll}+$").unwrap();
    // A line holding nothing but a short name, e.g. "Jane Doe"
    static ref BARE_NAME: Regex = Regex::new(r"^\p{Lu}\p{Ll}+(?:\s+\p{Lu}\p{Ll}+){1,2}$").unwrap();
}

impl FieldExtractor {
    /// The longest line containing any title keyword.
    pub fn extract_title(&self, lines: &[&str]) -> ExtractedField<String> {
        let mut best: Option<&str> = None;
        for &line in lines {
            let lower = line.to_lowercase();
            if !self.title_keywords.iter().any(|keyword| lower.contains(keyword.as_str())) {
                continue;
            }
            let longer = best.map_or(true, |current| line.chars().count() > current.chars().count());
            if longer {
                best = Some(line);
            }
        }
        match best {
            Some(title) => {
                debug!("Title line: '{}'", title);
                ExtractedField::found(title.to_string(), ConfidenceLevel::High)
            }
            None => ExtractedField::missing(),
        }
    }

    /// Holder name from a labelled or bare name line, else the fallback.
    pub fn extract_name(&self, lines: &[&str], fallback_name: Option<&str>) -> ExtractedField<String> {
        for &line in lines {
            if let Some(name) = self.name_candidates(line).into_iter().find(|c| Self::is_valid_name(c)) {
                debug!("Holder name '{}' found in line '{}'", name, line);
                return ExtractedField::found(name.to_string(), ConfidenceLevel::High);
            }
        }
        match fallback_name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => {
                debug!("No name in text, using fallback '{}'", name);
                ExtractedField::found(name.to_string(), ConfidenceLevel::Medium)
            }
            None => ExtractedField::missing(),
        }
    }

    /// Labelled candidate first, then the whole line if it is a bare name.
    fn name_candidates<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let mut candidates = Vec::new();
        if let Some(pattern) = &self.labelled_name_pattern {
            if let Some(name) = pattern.captures(line).and_then(|caps| caps.get(1)) {
                // "John McDonald" must not shrink to "John Mc"
                if line[name.end()..].starts_with(char::is_alphabetic) {
                    debug!("Skipping labelled name '{}': cut off inside a word", name.as_str());
                } else {
                    candidates.push(name.as_str());
                }
            }
        }
        if BARE_NAME.is_match(line) {
            candidates.push(line);
        }
        candidates
    }

    /// Two to four words, each an uppercase letter followed by lowercase ones.
    pub fn is_valid_name(candidate: &str) -> bool {
        let words: Vec<&str> = candidate.split_whitespace().collect();
        (2..=4).contains(&words.len()) && words.iter().all(|word| CAPITALIZED_WORD.is_match(word))
    }

    /// Pick valid-from and expiry out of the recognized dates.
    ///
    /// Labelled lines win with high confidence; later labelled lines overwrite
    /// earlier ones. Without an expiry label the first and last dates are used.
    pub fn assign_dates(
        &self,
        dates: &[RecognizedDate],
    ) -> (ExtractedField<NaiveDate>, ExtractedField<NaiveDate>) {
        let mut valid_from = ExtractedField::missing();
        let mut expiry_date = ExtractedField::missing();

        for recognized in dates {
            let line = recognized.source_line.to_lowercase();
            if self.expiry_phrases.iter().any(|p| line.contains(p.as_str())) {
                expiry_date = ExtractedField::found(recognized.date, ConfidenceLevel::High);
            }
            if self.issue_phrases.iter().any(|p| line.contains(p.as_str())) {
                valid_from = ExtractedField::found(recognized.date, ConfidenceLevel::High);
            }
        }

        if expiry_date.is_missing() {
            match dates {
                [] => {}
                [only] => {
                    debug!("Single unlabelled date {} taken as expiry", only.date);
                    expiry_date = ExtractedField::found(only.date, ConfidenceLevel::Medium);
                }
                [first, .., last] => {
                    debug!(
                        "No expiry label; using first date {} and last date {}",
                        first.date, last.date
                    );
                    valid_from = ExtractedField::found(first.date, ConfidenceLevel::Medium);
                    expiry_date = ExtractedField::found(last.date, ConfidenceLevel::Medium);
                }
            }
        }

        (valid_from, expiry_date)
    }
}
