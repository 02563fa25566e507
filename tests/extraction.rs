//! End-to-end tests for certificate text extraction.
//!
//! Covers the date recognizer properties, field inference on realistic OCR
//! output and the confirmation of a scan into a qualification record.

use certscan::models::{ConfidenceLevel, ExtractionResult, QualificationForm, QualificationStatus};
use certscan::processing::DateRecognizer;
use certscan::validation::{ExpiryValidator, FormValidator, NoticeKind};
use certscan::CertificateScanner;
use chrono::NaiveDate;
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn scan(text: &str) -> ExtractionResult {
    CertificateScanner::new().scan(text, None)
}

// =============================================================================
// Date recognizer
// =============================================================================

proptest! {
    #[test]
    fn day_first_dates_in_window_are_found(
        year in 1990i32..=2050,
        month in 1u32..=12,
        day in 1u32..=28,
        prefix in "[A-Za-z :]{0,12}",
        suffix in "[A-Za-z ]{0,12}",
        separator in prop::sample::select(vec!['/', '.', '-']),
    ) {
        let text = format!("{}{:02}{sep}{:02}{sep}{}{}", prefix, day, month, year, suffix, sep = separator);
        let found: Vec<_> = DateRecognizer::default().recognize(&text).collect();
        prop_assert_eq!(found.len(), 1);
        prop_assert_eq!(found[0].date, date(year, month, day));
    }

    #[test]
    fn two_digit_years_are_in_the_2000s(year in 0i32..=50, month in 1u32..=12, day in 1u32..=28) {
        let text = format!("Expires {}/{}/{:02}", day, month, year);
        let found: Vec<_> = DateRecognizer::default().recognize(&text).collect();
        prop_assert_eq!(found.len(), 1);
        prop_assert_eq!(found[0].date, date(2000 + year, month, day));
    }

    #[test]
    fn years_outside_window_are_dropped(
        year in prop_oneof![1000i32..1990, 2051i32..=9999],
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let text = format!("Valid until {:02}/{:02}/{}", day, month, year);
        prop_assert_eq!(DateRecognizer::default().recognize(&text).count(), 0);
    }

    #[test]
    fn scanning_is_idempotent(text in "[A-Za-z0-9 :/.\\-\n]{0,120}") {
        let scanner = CertificateScanner::new();
        prop_assert_eq!(scanner.scan(&text, Some("Jo Bloggs")), scanner.scan(&text, Some("Jo Bloggs")));
    }

    #[test]
    fn empty_fields_are_always_low(text in "[A-Za-z0-9 :/.\\-\n]{0,120}") {
        let result = scan(&text);
        if result.employee_name.is_missing() {
            prop_assert_eq!(result.employee_name.confidence(), ConfidenceLevel::Low);
        }
        if result.qualification_title.is_missing() {
            prop_assert_eq!(result.qualification_title.confidence(), ConfidenceLevel::Low);
        }
        if result.valid_from.is_missing() {
            prop_assert_eq!(result.valid_from.confidence(), ConfidenceLevel::Low);
        }
        if result.expiry_date.is_missing() {
            prop_assert_eq!(result.expiry_date.confidence(), ConfidenceLevel::Low);
        }
    }
}

#[test]
fn test_invalid_calendar_dates_are_dropped() {
    let recognizer = DateRecognizer::default();
    assert_eq!(recognizer.recognize("Expires 31/02/2024").count(), 0);
    assert_eq!(recognizer.recognize("Expires 30/02/2024").count(), 0);
    assert_eq!(recognizer.recognize("Expires 29/02/2023").count(), 0);
    assert_eq!(recognizer.recognize("Expires 29/02/2024").count(), 1);
}

#[test]
fn test_invalid_dates_dropped_in_every_format() {
    let recognizer = DateRecognizer::default();
    // year-first
    assert_eq!(recognizer.recognize("Issued 2024-02-30").count(), 0);
    assert_eq!(recognizer.recognize("Issued 2023.13.01").count(), 0);
    assert_eq!(recognizer.recognize("Issued 1985-01-01").count(), 0);
    assert_eq!(recognizer.recognize("Issued 2051-01-01").count(), 0);
    assert_eq!(recognizer.recognize("Issued 2024-02-29").count(), 1);
    // month-name
    assert_eq!(recognizer.recognize("Expires 31 Apr 2024").count(), 0);
    assert_eq!(recognizer.recognize("Expires 29 Feb 2023").count(), 0);
    assert_eq!(recognizer.recognize("Expires 1 Jan 1985").count(), 0);
    assert_eq!(recognizer.recognize("Expires 1 Jan 2051").count(), 0);
    assert_eq!(recognizer.recognize("Expires 30 Apr 2024").count(), 1);
}

#[test]
fn test_month_name_does_not_hide_numeric_date() {
    let dates: Vec<_> = DateRecognizer::default()
        .recognize("Valid 5 March 01/03/2023")
        .map(|d| d.date)
        .collect();
    assert_eq!(dates, vec![date(2023, 3, 1)]);
}

#[test]
fn test_name_with_inner_capital_falls_back() {
    let result = CertificateScanner::new().scan("CSCS Card\nName: John McDonald", Some("John McDonald"));
    assert_eq!(result.employee_name.value().unwrap(), "John McDonald");
    assert_eq!(result.employee_name.confidence(), ConfidenceLevel::Medium);
}

#[test]
fn test_mixed_formats_across_lines() {
    let text = "Issued 2021-07-15\nRenewed 3 Aug 2023\nExpiry 15.07.2026";
    let dates: Vec<_> = DateRecognizer::default().recognize(text).map(|d| d.date).collect();
    assert_eq!(dates, vec![date(2021, 7, 15), date(2023, 8, 3), date(2026, 7, 15)]);
}

// =============================================================================
// Field extraction
// =============================================================================

#[test]
fn test_labelled_name_is_high() {
    let result = scan("Name: John Michael Smith");
    assert_eq!(result.employee_name.value().unwrap(), "John Michael Smith");
    assert_eq!(result.employee_name.confidence(), ConfidenceLevel::High);
}

#[test]
fn test_longer_keyword_line_is_title() {
    let result = scan("Card\nCSCS Card\nJohn Smith");
    assert_eq!(result.qualification_title.value().unwrap(), "CSCS Card");
    assert_eq!(result.qualification_title.confidence(), ConfidenceLevel::High);
}

#[test]
fn test_labelled_issue_and_expiry() {
    let result = scan("Date of Issue: 01/03/2023\nExpires: 01/03/2026");
    assert_eq!(result.valid_from.value(), Some(&date(2023, 3, 1)));
    assert_eq!(result.valid_from.confidence(), ConfidenceLevel::High);
    assert_eq!(result.expiry_date.value(), Some(&date(2026, 3, 1)));
    assert_eq!(result.expiry_date.confidence(), ConfidenceLevel::High);
}

#[test]
fn test_unlabelled_pair_is_medium() {
    let result = scan("01/03/2023\n01/03/2026");
    assert_eq!(result.valid_from.value(), Some(&date(2023, 3, 1)));
    assert_eq!(result.valid_from.confidence(), ConfidenceLevel::Medium);
    assert_eq!(result.expiry_date.value(), Some(&date(2026, 3, 1)));
    assert_eq!(result.expiry_date.confidence(), ConfidenceLevel::Medium);
}

#[test]
fn test_single_unlabelled_date_is_expiry() {
    let result = scan("CSCS Card\n01/03/2026");
    assert!(result.valid_from.is_missing());
    assert_eq!(result.valid_from.confidence(), ConfidenceLevel::Low);
    assert_eq!(result.expiry_date.value(), Some(&date(2026, 3, 1)));
    assert_eq!(result.expiry_date.confidence(), ConfidenceLevel::Medium);
}

#[test]
fn test_no_dates_leaves_both_low() {
    let result = scan("CSCS Card\nJohn Smith");
    assert!(result.valid_from.is_missing());
    assert!(result.expiry_date.is_missing());
    assert_eq!(result.confidence().valid_from, ConfidenceLevel::Low);
    assert_eq!(result.confidence().expiry, ConfidenceLevel::Low);
}

#[test]
fn test_multiple_expiry_labels_keep_last() {
    // Later labelled lines overwrite earlier ones, even if the earlier date is later.
    let result = scan("Expires 01/01/2030\nValid to 01/01/2027");
    assert_eq!(result.expiry_date.value(), Some(&date(2027, 1, 1)));
    assert_eq!(result.expiry_date.confidence(), ConfidenceLevel::High);
}

#[test]
fn test_fallback_name_used_when_text_has_none() {
    let result = CertificateScanner::new().scan("IPAF LICENCE\nPAL CARD 3A", Some("Sarah Johnson"));
    assert_eq!(result.employee_name.value().unwrap(), "Sarah Johnson");
    assert_eq!(result.employee_name.confidence(), ConfidenceLevel::Medium);
}

#[test]
fn test_noisy_ocr_card() {
    let text = "
        ~~ CONSTRUCTION SKILLS ~~
        CSCS  Blue Skilled Worker Card
        Holder Name: Priya Kaur Sandhu
        Reg. No. 0O1234567
        Card valid from 15 Jan 2024
        Card valid until 14 Jan 2029
        www.cscs.uk.com
    ";
    let result = CertificateScanner::new().scan(text, Some("Fallback Person"));
    assert_eq!(result.employee_name.value().unwrap(), "Priya Kaur Sandhu");
    assert_eq!(result.qualification_title.value().unwrap(), "CSCS  Blue Skilled Worker Card");
    assert_eq!(result.valid_from.value(), Some(&date(2024, 1, 15)));
    assert_eq!(result.valid_from.confidence(), ConfidenceLevel::High);
    assert_eq!(result.expiry_date.value(), Some(&date(2029, 1, 14)));
    assert_eq!(result.expiry_date.confidence(), ConfidenceLevel::High);
}

// =============================================================================
// Confirmation and status
// =============================================================================

#[test]
fn test_scan_confirm_and_status() {
    let result = scan("IPAF Operator Licence\nName: Tom Baker\nIssued: 01/11/2021\nExpiry: 01/11/2026");
    let form = QualificationForm::from(&result);
    let qualification = FormValidator::confirm(form).unwrap();
    let today = date(2026, 10, 19);

    assert_eq!(qualification.title, "IPAF Operator Licence");
    assert_eq!(qualification.status_on(today), QualificationStatus::Expiring);

    let notice = ExpiryValidator::notice("Tom Baker", &qualification, today).unwrap();
    assert_eq!(notice.kind, NoticeKind::ExpiringSoon { days: 13 });
}

#[test]
fn test_reviewer_must_fix_reversed_dates() {
    let result = scan("Safety Passport\nExpires 01/01/2020\nIssued 01/01/2025");
    let mut form = QualificationForm::from(&result);
    assert!(FormValidator::confirm(form.clone()).is_err());

    form.valid_from = Some(date(2020, 1, 1));
    form.expiry_date = Some(date(2025, 1, 1));
    let qualification = FormValidator::confirm(form).unwrap();
    assert_eq!(qualification.status_on(date(2026, 10, 19)), QualificationStatus::Expired);
}
