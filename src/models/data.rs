use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A date found in OCR text, with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedDate {
    pub original_text: String,
    pub date: NaiveDate,
    pub source_line: String,
}

/// Trust tag attached to every extracted field.
///
/// `High` means an explicit keyword or label matched, `Medium` that the value
/// was inferred from position or supplied as a fallback, `Low` that nothing
/// was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value paired with its confidence. A missing value is always `Low`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedField<T> {
    value: Option<T>,
    confidence: ConfidenceLevel,
}

impl<T> ExtractedField<T> {
    pub fn found(value: T, confidence: ConfidenceLevel) -> Self {
        ExtractedField {
            value: Some(value),
            confidence,
        }
    }

    pub fn missing() -> Self {
        ExtractedField {
            value: None,
            confidence: ConfidenceLevel::Low,
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }
}

impl<T> Default for ExtractedField<T> {
    fn default() -> Self {
        Self::missing()
    }
}

/// Per-category confidence summary of an [`ExtractionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfidence {
    pub name: ConfidenceLevel,
    pub title: ConfidenceLevel,
    pub valid_from: ConfidenceLevel,
    pub expiry: ConfidenceLevel,
}

/// Structured certificate data pre-filled into the confirmation form.
///
/// This is a suggestion for human review, never the system of record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub employee_name: ExtractedField<String>,
    pub qualification_title: ExtractedField<String>,
    pub valid_from: ExtractedField<NaiveDate>,
    pub expiry_date: ExtractedField<NaiveDate>,
}

impl ExtractionResult {
    pub fn confidence(&self) -> FieldConfidence {
        FieldConfidence {
            name: self.employee_name.confidence(),
            title: self.qualification_title.confidence(),
            valid_from: self.valid_from.confidence(),
            expiry: self.expiry_date.confidence(),
        }
    }
}
