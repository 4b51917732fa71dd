//! Fleet configuration fan-out
//!
//! Controller first, then production hosts through the worker pool. One
//! outcome per target, in input order, whatever happens to the others.

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::{tally, PushOutcome, RegistrationRecord, Target};
use crate::domain::ports::{FleetEvent, FleetEventSink, RemoteShell};
use crate::domain::value_objects::CancelToken;

use super::pusher::RemoteConfigPusher;
use super::worker_pool::WorkerPool;

pub struct FleetOrchestrator<'a, S: RemoteShell + ?Sized> {
    pusher: RemoteConfigPusher<'a, S>,
    pool: &'a WorkerPool,
    events: Arc<dyn FleetEventSink>,
}

impl<'a, S: RemoteShell + ?Sized> FleetOrchestrator<'a, S> {
    pub fn new(
        pusher: RemoteConfigPusher<'a, S>,
        pool: &'a WorkerPool,
        events: Arc<dyn FleetEventSink>,
    ) -> Self {
        Self {
            pusher,
            pool,
            events,
        }
    }

    /// Push `record` to the controller, then every production host.
    ///
    /// Once `cancel` trips, hosts that have not started get a cancelled
    /// outcome; pushes already in flight finish.
    pub fn configure_fleet(
        &self,
        controller: &Target,
        production: &[Target],
        record: &RegistrationRecord,
        cancel: &CancelToken,
    ) -> Vec<PushOutcome> {
        let mut outcomes = Vec::with_capacity(production.len() + 1);
        outcomes.push(self.push_unless_cancelled(controller, record, cancel));

        info!(
            hosts = production.len(),
            workers = self.pool.workers(),
            "configuring production hosts"
        );
        outcomes.extend(
            self.pool
                .map(production, |target| self.push_unless_cancelled(target, record, cancel)),
        );

        let (succeeded, failed) = tally(&outcomes);
        self.events
            .on_event(FleetEvent::FleetConfigured { succeeded, failed });
        outcomes
    }

    fn push_unless_cancelled(
        &self,
        target: &Target,
        record: &RegistrationRecord,
        cancel: &CancelToken,
    ) -> PushOutcome {
        if cancel.is_cancelled() {
            return PushOutcome::cancelled(target.clone());
        }
        self.pusher.push_config(target, record)
    }
}
