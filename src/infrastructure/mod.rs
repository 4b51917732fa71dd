//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `http` - Management API over HTTPS (reqwest)
//! - `ssh` - Remote shell through the system ssh client
//! - `ping` - ICMP reachability probe
//! - `registry` - Monitoring domain registry
//! - `process` - Local provisioning step runner
//! - `events/` - Event sink implementations

pub mod events;
pub mod http;
pub mod ping;
pub mod process;
pub mod registry;
pub mod ssh;

// Re-export for convenience
pub use events::JsonEventSink;
pub use http::{HttpManagementApi, HttpOptions};
pub use ping::PingProbe;
pub use process::CommandStepRunner;
pub use registry::LoggingDomainRegistry;
pub use ssh::{SshOptions, SshShell};
