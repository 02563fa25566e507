use crate::utils::CertScanError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Vocabulary and limits that drive certificate field extraction.
///
/// The defaults are tuned for English construction-industry certificates.
/// Every field can be overridden from a JSON rules file; fields absent from
/// the file keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionRules {
    /// Lines containing any of these (case-insensitive) are title candidates.
    pub title_keywords: Vec<String>,
    /// Labels that may precede a holder name, e.g. `Name: Jane Doe`.
    pub name_labels: Vec<String>,
    /// Phrases marking a line's date as the expiry date.
    pub expiry_phrases: Vec<String>,
    /// Phrases marking a line's date as the issue / valid-from date.
    pub issue_phrases: Vec<String>,
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        ExtractionRules {
            title_keywords: owned(&[
                "CSCS",
                "CPCS",
                "NPORS",
                "IPAF",
                "PASMA",
                "SMSTS",
                "SSSTS",
                "CISRS",
                "ECS",
                "JIB",
                "NVQ",
                "Certificate",
                "Certification",
                "Licence",
                "License",
                "Card",
                "Safety",
                "First Aid",
                "Training",
                "Qualification",
                "Diploma",
            ]),
            name_labels: owned(&["Name", "Holder", "Cardholder", "Employee"]),
            expiry_phrases: owned(&["expir", "valid to", "valid until"]),
            issue_phrases: owned(&["issue", "valid from", "date of issue"]),
            min_year: 1990,
            max_year: 2050,
        }
    }
}

impl ExtractionRules {
    pub fn from_json_str(json: &str) -> Result<Self, CertScanError> {
        let rules: ExtractionRules =
            serde_json::from_str(json).map_err(|e| CertScanError::RulesParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CertScanError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            CertScanError::IoError(format!("Failed to read rules file {}: {}", path.display(), e))
        })?;
        let rules: ExtractionRules =
            serde_json::from_str(&contents).map_err(|e| CertScanError::RulesParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), CertScanError> {
        if self.min_year > self.max_year {
            return Err(CertScanError::InvalidRules(format!(
                "min_year {} is after max_year {}",
                self.min_year, self.max_year
            )));
        }
        let has_blank = |words: &[String]| words.iter().any(|w| w.trim().is_empty());
        if has_blank(&self.title_keywords)
            || has_blank(&self.name_labels)
            || has_blank(&self.expiry_phrases)
            || has_blank(&self.issue_phrases)
        {
            // A blank phrase would match every line.
            return Err(CertScanError::InvalidRules(
                "keyword lists must not contain blank entries".to_string(),
            ));
        }
        Ok(())
    }
}
