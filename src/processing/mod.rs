pub mod dates;
pub mod extractors;
pub mod field_extractor;

pub use dates::DateRecognizer;
pub use field_extractor::FieldExtractor;

/// Non-empty, trimmed lines of OCR text.
pub fn ocr_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}
