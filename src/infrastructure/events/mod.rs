//! Event Sink Implementations
//!
//! Concrete `FleetEventSink`s that live in the library:
//! - JsonEventSink: NDJSON output for CI/automation
//!
//! The interactive console sink lives with the binary's UI code.

mod json;

pub use json::JsonEventSink;
