pub mod data;
pub mod qualification;
pub mod rules;

pub use data::*;
pub use qualification::*;
pub use rules::ExtractionRules;
