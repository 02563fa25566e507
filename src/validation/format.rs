use crate::models::{Qualification, QualificationForm};
use crate::utils::CertScanError;

pub struct FormValidator;

impl FormValidator {
    /// Turn a reviewed form into a qualification record.
    ///
    /// All fields are required and the expiry date must come strictly after
    /// the valid-from date.
    pub fn confirm(form: QualificationForm) -> Result<Qualification, CertScanError> {
        let title = form.title.trim();
        if title.is_empty() {
            return Err(CertScanError::MissingField("title"));
        }
        let valid_from = form.valid_from.ok_or(CertScanError::MissingField("valid from date"))?;
        let expiry_date = form.expiry_date.ok_or(CertScanError::MissingField("expiry date"))?;

        if expiry_date <= valid_from {
            return Err(CertScanError::ExpiryNotAfterValidFrom {
                valid_from,
                expiry_date,
            });
        }

        Ok(Qualification {
            title: title.to_string(),
            valid_from,
            expiry_date,
            notification_days: form.notification_days,
        })
    }
}
