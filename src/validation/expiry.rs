use crate::models::{Qualification, QualificationStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Expired qualifications stop producing notices after this many days.
pub const RECENTLY_EXPIRED_DAYS: i64 = 7;

/// A reminder that a qualification is about to expire or just has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryNotice {
    pub holder: String,
    pub qualification_title: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum NoticeKind {
    ExpiringSoon { days: i64 },
    Expired { days_ago: i64 },
}

impl ExpiryNotice {
    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::ExpiringSoon { .. } => "Qualification Expiring Soon",
            NoticeKind::Expired { .. } => "Qualification Expired",
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            NoticeKind::ExpiringSoon { days } => format!(
                "{}'s {} expires in {} days",
                self.holder, self.qualification_title, days
            ),
            NoticeKind::Expired { days_ago } => format!(
                "{}'s {} expired {} days ago",
                self.holder, self.qualification_title, days_ago
            ),
        }
    }
}

pub struct ExpiryValidator;

impl ExpiryValidator {
    /// The notice due for one qualification on `today`, if any.
    pub fn notice(holder: &str, qualification: &Qualification, today: NaiveDate) -> Option<ExpiryNotice> {
        let days = qualification.days_until_expiry(today);
        let kind = match qualification.status_on(today) {
            QualificationStatus::Expiring if days > 0 => NoticeKind::ExpiringSoon { days },
            QualificationStatus::Expired if days >= -RECENTLY_EXPIRED_DAYS => {
                NoticeKind::Expired { days_ago: -days }
            }
            _ => return None,
        };
        Some(ExpiryNotice {
            holder: holder.to_string(),
            qualification_title: qualification.title.clone(),
            kind,
        })
    }

    /// All notices due for one holder's qualifications.
    pub fn due_notices(holder: &str, qualifications: &[Qualification], today: NaiveDate) -> Vec<ExpiryNotice> {
        qualifications
            .iter()
            .filter_map(|q| Self::notice(holder, q, today))
            .collect()
    }
}
