use crate::models::*;
use crate::processing::*;
use crate::utils::CertScanError;
use log::debug;

/// Turns OCR text from a photographed certificate into reviewable fields.
pub struct CertificateScanner {
    recognizer: DateRecognizer,
    extractor: FieldExtractor,
}

impl CertificateScanner {
    /// Scanner with the built-in English vocabulary.
    pub fn new() -> Self {
        let rules = ExtractionRules::default();
        // The built-in vocabulary has no blank entries, its year window is
        // ordered and labels are regex-escaped, so this cannot fail.
        CertificateScanner {
            recognizer: DateRecognizer::new(&rules),
            extractor: FieldExtractor::new(&rules).expect("built-in extraction rules compile"),
        }
    }

    pub fn with_rules(rules: &ExtractionRules) -> Result<Self, CertScanError> {
        Ok(CertificateScanner {
            recognizer: DateRecognizer::new(rules),
            extractor: FieldExtractor::new(rules)?,
        })
    }

    // Main extraction function: dates first, then the fields that use them
    pub fn scan(&self, text: &str, fallback_name: Option<&str>) -> ExtractionResult {
        let lines: Vec<&str> = ocr_lines(text).collect();
        let dates: Vec<RecognizedDate> = self.recognizer.recognize(text).collect();
        debug!("Scanning {} lines, {} dates recognized", lines.len(), dates.len());
        self.extractor.extract(&lines, &dates, fallback_name)
    }

    pub fn recognize_dates<'a>(&'a self, text: &'a str) -> impl Iterator<Item = RecognizedDate> + 'a {
        self.recognizer.recognize(text)
    }
}

impl Default for CertificateScanner {
    fn default() -> Self {
        Self::new()
    }
}
