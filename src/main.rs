// Certificate scanning front end
// Reads OCR text, extracts the certificate fields and reports them for review

use certscan::{
    models::{ExtractedField, ExtractionResult, ExtractionRules, QualificationForm, DEFAULT_NOTIFICATION_DAYS},
    utils::CertScanError,
    validation::{ExpiryValidator, FormValidator},
    CertificateScanner,
};
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{info, warn};
use std::fmt::Display;
use std::io::Read;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "certscan", version, about = "Extract certificate details from OCR text")]
struct Args {
    /// File holding the OCR text; stdin when omitted
    input: Option<PathBuf>,

    /// Currently selected employee, used when no name is found in the text
    #[arg(short, long)]
    employee: Option<String>,

    /// JSON file overriding the extraction vocabulary
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Print the extraction result as JSON
    #[arg(long)]
    json: bool,

    /// Evaluate expiry status as of this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Days before expiry at which a qualification counts as expiring
    #[arg(long, default_value_t = DEFAULT_NOTIFICATION_DAYS)]
    notification_days: u32,
}

fn parse_date(value: &str) -> Result<NaiveDate, CertScanError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| CertScanError::InvalidDate(format!("{}: {}", value, e)))
}

fn read_input(input: Option<&PathBuf>) -> Result<String, CertScanError> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| CertScanError::IoError(format!("Failed to read {}: {}", path.display(), e))),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn describe<T: Display>(field: &ExtractedField<T>) -> String {
    match field.value() {
        Some(value) => format!("{} ({})", value, field.confidence()),
        None => format!("- ({})", field.confidence()),
    }
}

// Function to print the extraction report for human review
fn print_report(result: &ExtractionResult, args: &Args) {
    println!("\n===============================================");
    println!("       CERTIFICATE SCAN - PLEASE CONFIRM");
    println!("===============================================\n");

    println!("EXTRACTED FIELDS:");
    println!("  Employee Name: {}", describe(&result.employee_name));
    println!("  Qualification: {}", describe(&result.qualification_title));
    println!("  Valid From:    {}", describe(&result.valid_from));
    println!("  Expiry Date:   {}", describe(&result.expiry_date));

    let mut form = QualificationForm::from(result);
    form.notification_days = args.notification_days;
    if form.title.is_empty() || form.valid_from.is_none() || form.expiry_date.is_none() {
        println!("\nSome fields could not be determined; complete them by hand.");
        return;
    }

    match FormValidator::confirm(form) {
        Ok(qualification) => {
            let today = args.today.unwrap_or_else(|| Local::now().date_naive());
            let days = qualification.days_until_expiry(today);
            println!("\nSTATUS AS OF {}:", today);
            println!("  {}", qualification.status_on(today));
            if days >= 0 {
                println!("  {} days remaining", days);
            } else {
                println!("  Expired {} days ago", -days);
            }
            let holder = result
                .employee_name
                .value()
                .map(String::as_str)
                .unwrap_or("Unknown holder");
            if let Some(notice) = ExpiryValidator::notice(holder, &qualification, today) {
                println!("\n{}: {}", notice.title(), notice.message());
            }
        }
        Err(err) => {
            warn!("Scanned dates do not form a valid qualification: {}", err);
            println!("\nCHECK DATES: {}", err);
        }
    }
}

fn run(args: &Args) -> Result<(), CertScanError> {
    let scanner = match &args.rules {
        Some(path) => {
            info!("Loading extraction rules from {}", path.display());
            CertificateScanner::with_rules(&ExtractionRules::from_json_file(path)?)?
        }
        None => CertificateScanner::new(),
    };

    let text = read_input(args.input.as_ref())?;
    let result = scanner.scan(&text, args.employee.as_deref());

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| CertScanError::IoError(format!("Failed to encode result: {}", e)))?;
        println!("{}", json);
    } else {
        print_report(&result, args);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("Error scanning certificate: {}", err);
        process::exit(1);
    }
}
