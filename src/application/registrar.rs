//! Monitoring domain registration

use std::sync::Arc;

use crate::domain::entities::Session;
use crate::domain::ports::{DomainRegistry, FleetEvent, FleetEventSink};
use crate::error::{FleetError, FleetResult};

/// What a registration failure does to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationPolicy {
    /// Report and keep going; pushes may still work against an existing domain
    #[default]
    Warn,
    /// Abort the run
    Fatal,
}

pub struct DomainRegistrar<'a, R: DomainRegistry + ?Sized> {
    registry: &'a R,
    events: Arc<dyn FleetEventSink>,
}

impl<'a, R: DomainRegistry + ?Sized> DomainRegistrar<'a, R> {
    pub fn new(registry: &'a R, events: Arc<dyn FleetEventSink>) -> Self {
        Self { registry, events }
    }

    /// Register `group`/`subgroup` using the session token.
    ///
    /// An unusable token surfaces as an authentication failure; a registry
    /// failure as `FleetError::Registration`. Applying the policy is the
    /// caller's job.
    pub fn register_domain(&self, session: &Session, group: &str, subgroup: &str) -> FleetResult<()> {
        let token = session.require_token()?;

        match self.registry.register(group, subgroup, token) {
            Ok(()) => {
                self.events.on_event(FleetEvent::Registered {
                    group: group.to_string(),
                    subgroup: subgroup.to_string(),
                });
                Ok(())
            }
            Err(err) => {
                self.events.on_event(FleetEvent::RegistrationFailed {
                    group: group.to_string(),
                    subgroup: subgroup.to_string(),
                    error: err.to_string(),
                });
                Err(FleetError::Registration(err))
            }
        }
    }
}
