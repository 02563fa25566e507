use crate::models::{ExtractionResult, ExtractionRules, RecognizedDate};
use crate::utils::CertScanError;
use log::debug;
use regex::Regex;

/// Infers holder name, qualification title and validity dates from OCR lines.
///
/// Built once from [`ExtractionRules`]; extraction itself is infallible and
/// keeps no state between calls.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    pub(crate) title_keywords: Vec<String>,
    pub(crate) expiry_phrases: Vec<String>,
    pub(crate) issue_phrases: Vec<String>,
    pub(crate) labelled_name_pattern: Option<Regex>,
}

impl FieldExtractor {
    pub fn new(rules: &ExtractionRules) -> Result<Self, CertScanError> {
        rules.validate()?;
        let lowered = |words: &[String]| words.iter().map(|w| w.to_lowercase()).collect::<Vec<_>>();
        Ok(FieldExtractor {
            title_keywords: lowered(&rules.title_keywords),
            expiry_phrases: lowered(&rules.expiry_phrases),
            issue_phrases: lowered(&rules.issue_phrases),
            labelled_name_pattern: Self::build_name_pattern(&rules.name_labels)?,
        })
    }

    /// `Name: John Smith` style pattern; labels match case-insensitively as
    /// whole words, the name itself must be 2-4 capitalized words.
    fn build_name_pattern(labels: &[String]) -> Result<Option<Regex>, CertScanError> {
        if labels.is_empty() {
            return Ok(None);
        }
        let escaped: Vec<String> = labels.iter().map(|l| regex::escape(l.trim())).collect();
        let label = format!(r"\b(?:{})\b", escaped.join("|"));
        // "Cardholder Name: ..." reads as one label
        let pattern = format!(
            r"(?i:{label}(?:[:\s]+{label})*)[:\s]+(\p{{Lu}}\p{{Ll}}+(?:[ \t]+\p{{Lu}}\p{{Ll}}+){{1,3}})",
            label = label
        );
        Regex::new(&pattern)
            .map(Some)
            .map_err(|e| CertScanError::InvalidRules(format!("bad name label: {}", e)))
    }

    /// Assemble the full result from the text's lines and its recognized dates.
    pub fn extract(
        &self,
        lines: &[&str],
        dates: &[RecognizedDate],
        fallback_name: Option<&str>,
    ) -> ExtractionResult {
        let qualification_title = self.extract_title(lines);
        let employee_name = self.extract_name(lines, fallback_name);
        let (valid_from, expiry_date) = self.assign_dates(dates);

        debug!(
            "Extracted certificate fields from {} lines and {} dates: name={}, title={}, valid_from={}, expiry={}",
            lines.len(),
            dates.len(),
            employee_name.confidence(),
            qualification_title.confidence(),
            valid_from.confidence(),
            expiry_date.confidence()
        );

        ExtractionResult {
            employee_name,
            qualification_title,
            valid_from,
            expiry_date,
        }
    }
}
