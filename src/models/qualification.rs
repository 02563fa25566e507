use crate::models::ExtractionResult;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_NOTIFICATION_DAYS: u32 = 30;

/// Editable form a reviewer confirms before a qualification is recorded.
///
/// Every field may be changed by the reviewer; see
/// [`FormValidator::confirm`](crate::validation::FormValidator::confirm).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationForm {
    pub title: String,
    pub valid_from: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub notification_days: u32,
}

impl QualificationForm {
    /// Empty form for manual entry: valid from today, expiring a year later.
    pub fn blank(today: NaiveDate) -> Self {
        QualificationForm {
            title: String::new(),
            valid_from: Some(today),
            expiry_date: today.checked_add_months(Months::new(12)),
            notification_days: DEFAULT_NOTIFICATION_DAYS,
        }
    }
}

impl From<&ExtractionResult> for QualificationForm {
    fn from(result: &ExtractionResult) -> Self {
        QualificationForm {
            title: result.qualification_title.value().cloned().unwrap_or_default(),
            valid_from: result.valid_from.value().copied(),
            expiry_date: result.expiry_date.value().copied(),
            notification_days: DEFAULT_NOTIFICATION_DAYS,
        }
    }
}

/// A confirmed qualification record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualification {
    pub title: String,
    pub valid_from: NaiveDate,
    pub expiry_date: NaiveDate,
    pub notification_days: u32,
}

impl Qualification {
    /// Whole days from `today` until expiry; negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    pub fn status_on(&self, today: NaiveDate) -> QualificationStatus {
        let days = self.days_until_expiry(today);
        if days < 0 {
            QualificationStatus::Expired
        } else if days <= i64::from(self.notification_days) {
            QualificationStatus::Expiring
        } else {
            QualificationStatus::Valid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualificationStatus {
    Valid,
    Expiring,
    Expired,
}

impl QualificationStatus {
    pub fn display_text(&self) -> &'static str {
        match self {
            QualificationStatus::Valid => "Valid",
            QualificationStatus::Expiring => "Expiring Soon",
            QualificationStatus::Expired => "Expired",
        }
    }
}

impl fmt::Display for QualificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_text())
    }
}
