//! Common test utilities for fleetup integration tests.
//!
//! This module provides:
//! - `TestEnv`: isolated working and home directories plus CLI runners
//! - `clear_proxy_env`: keeps loopback mock servers reachable

#![allow(dead_code)]

pub mod env;

pub use env::*;
