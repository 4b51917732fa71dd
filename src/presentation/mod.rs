//! Presentation Layer
//!
//! This layer handles creating use cases with infrastructure dependencies
//! and translating merged configuration into run inputs.
//!
//! ## Usage
//!
//! ```ignore
//! use fleetup::presentation::factory;
//!
//! let plan = factory::build_plan(&config, RegistrationPolicy::Warn)?;
//! let use_case = factory::create_bring_up_use_case(&config)?;
//! let report = use_case.execute(&plan, events, &cancel)?;
//! ```

pub mod factory;

pub use factory::{build_plan, build_verification, create_bring_up_use_case};
