pub mod error;

pub use error::CertScanError;
