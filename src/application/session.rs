//! Session acquisition
//!
//! A failed login is a configuration problem, not a transient one, so
//! there is no retry here.

use std::sync::Arc;

use tracing::warn;

use crate::domain::entities::Session;
use crate::domain::ports::{FleetEvent, FleetEventSink, ManagementApi};
use crate::error::{FleetError, FleetResult};

pub struct SessionClient<'a, A: ManagementApi + ?Sized> {
    api: &'a A,
    events: Arc<dyn FleetEventSink>,
}

impl<'a, A: ManagementApi + ?Sized> SessionClient<'a, A> {
    pub fn new(api: &'a A, events: Arc<dyn FleetEventSink>) -> Self {
        Self { api, events }
    }

    pub fn authenticate(&self, username: &str, password: &str) -> FleetResult<Session> {
        let token = self
            .api
            .login(username, password)
            .map_err(|err| FleetError::Authentication {
                message: err.to_string(),
            })?;

        if token.is_none() {
            warn!(endpoint = self.api.endpoint(), "login succeeded without a token field");
        }

        self.events.on_event(FleetEvent::Authenticated {
            username: username.to_string(),
        });
        Ok(Session::new(token))
    }
}
