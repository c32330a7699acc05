//! Helpers for reporting where a service lives: resolve the machine's
//! public IP, announce the listening address, and hand back minimal JSON
//! status replies.

// === Core modules ===
pub mod error;
pub mod public_ip;
pub mod response;

pub use error::LookupError;
pub use public_ip::{IP_LOOKUP_ENDPOINT, PublicIpReporter, PublicIpReporterBuilder, get_public_ip};
pub use response::JsonStatus;
#[allow(deprecated)]
pub use response::LegacyStatus;
