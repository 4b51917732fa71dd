//! Domain Entities
//!
//! Plain data owned by a bring-up run.

mod outcome;
mod registration;
mod session;
mod target;

pub use outcome::{
    tally, Endpoint, PushOutcome, ReachabilitySummary, VerificationResult,
};
pub use registration::{RegistrationRecord, DEFAULT_CONFIG_PATH, DEFAULT_REMOTE_PORT};
pub use session::Session;
pub use target::{parse_address_list, Credentials, Role, Target};
