use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised at the fallible edges of the crate.
///
/// Text extraction itself never fails; these cover loading rules, confirming
/// a scanned qualification and the command-line front end.
#[derive(Debug, Error)]
pub enum CertScanError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to parse rules file '{path}': {message}")]
    RulesParseError { path: String, message: String },

    #[error("Invalid extraction rules: {0}")]
    InvalidRules(String),

    #[error("Please fill in all fields: {0} is missing")]
    MissingField(&'static str),

    #[error("Expiry date must be after valid from date ({expiry_date} <= {valid_from})")]
    ExpiryNotAfterValidFrom {
        valid_from: NaiveDate,
        expiry_date: NaiveDate,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl From<std::io::Error> for CertScanError {
    fn from(err: std::io::Error) -> Self {
        CertScanError::IoError(err.to_string())
    }
}
