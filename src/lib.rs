pub mod models;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod certificate_scanner;

pub use certificate_scanner::CertificateScanner;
