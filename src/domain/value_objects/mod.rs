//! Value Objects
//!
//! Immutable policy types with no identity of their own.

mod cancel;
mod host_key_policy;
mod retry_policy;

pub use cancel::CancelToken;
pub use host_key_policy::HostKeyPolicy;
pub use retry_policy::{RetryPolicy, DEFAULT_INTERVAL, DEFAULT_MAX_ATTEMPTS};
