pub mod expiry;
pub mod format;

pub use expiry::{ExpiryNotice, ExpiryValidator, NoticeKind};
pub use format::FormValidator;
