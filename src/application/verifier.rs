//! Fleet-wide reachability sweep

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{Endpoint, ReachabilitySummary, VerificationResult};
use crate::domain::ports::{FleetEvent, FleetEventSink, ReachabilityProbe};

use super::worker_pool::WorkerPool;

pub struct ConnectivityVerifier<'a, P: ReachabilityProbe + ?Sized> {
    probe: &'a P,
    pool: &'a WorkerPool,
    events: Arc<dyn FleetEventSink>,
}

impl<'a, P: ReachabilityProbe + ?Sized> ConnectivityVerifier<'a, P> {
    pub fn new(probe: &'a P, pool: &'a WorkerPool, events: Arc<dyn FleetEventSink>) -> Self {
        Self {
            probe,
            pool,
            events,
        }
    }

    /// Probe every endpoint and summarize, keeping input order.
    ///
    /// A probe that errors counts as unreachable.
    pub fn verify_fleet(&self, endpoints: &[Endpoint]) -> ReachabilitySummary {
        self.events.on_event(FleetEvent::VerificationStarted {
            total: endpoints.len(),
        });

        let results = self.pool.map(endpoints, |endpoint| {
            let reachable = match self.probe.probe(&endpoint.address) {
                Ok(reachable) => reachable,
                Err(err) => {
                    debug!(address = %endpoint.address, error = %err, "probe errored");
                    false
                }
            };
            if self.events.wants_detailed_events() {
                self.events.on_event(FleetEvent::ProbeCompleted {
                    description: endpoint.description.clone(),
                    address: endpoint.address.clone(),
                    reachable,
                });
            }
            VerificationResult {
                target_description: endpoint.description.clone(),
                address: endpoint.address.clone(),
                reachable,
            }
        });

        let summary = ReachabilitySummary::from_results(results);
        self.events.on_event(FleetEvent::VerificationCompleted {
            reachable: summary.reachable_count,
            total: summary.total,
        });
        summary
    }
}
