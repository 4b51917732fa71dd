//! Bring-Up Use Case
//!
//! Orchestrates the full flow:
//! 1. Wait for the management endpoint
//! 2. Log in
//! 3. Register the monitoring domain
//! 4. Push the registration to controller and production hosts
//! 5. Sweep every endpoint for reachability
//!
//! Steps 1-3 are strictly ordered and only they (plus cancellation) can
//! abort the run. Steps 4-5 always produce a report.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::entities::{
    tally, Endpoint, PushOutcome, ReachabilitySummary, RegistrationRecord, Target,
};
use crate::domain::ports::{
    DomainRegistry, FleetEvent, FleetEventSink, ManagementApi, ReachabilityProbe, RemoteShell,
};
use crate::domain::value_objects::{CancelToken, RetryPolicy};
use crate::error::{FleetError, FleetResult};

use super::orchestrator::FleetOrchestrator;
use super::pusher::{PushOptions, RemoteConfigPusher};
use super::readiness::{ReadinessOutcome, ReadinessPoller};
use super::registrar::{DomainRegistrar, RegistrationPolicy};
use super::session::SessionClient;
use super::verifier::ConnectivityVerifier;
use super::worker_pool::WorkerPool;

pub const DEFAULT_PUSH_WORKERS: usize = 4;
pub const DEFAULT_VERIFY_WORKERS: usize = 16;

/// Inputs for one run, built once and read-only afterwards
#[derive(Debug, Clone)]
pub struct BringUpPlan {
    pub controller: Target,
    pub production: Vec<Target>,
    pub verification: Vec<Endpoint>,
    pub group: String,
    pub subgroup: String,
    pub fm_username: String,
    pub fm_password: String,
    /// Address written into `remoteIP`
    pub remote_address: String,
    pub remote_port: u16,
    pub readiness: RetryPolicy,
    pub registration_policy: RegistrationPolicy,
}

/// Tuning that does not change what the run does
#[derive(Debug, Clone)]
pub struct BringUpSettings {
    pub push: PushOptions,
    pub push_workers: usize,
    pub verify_workers: usize,
}

impl Default for BringUpSettings {
    fn default() -> Self {
        Self {
            push: PushOptions::default(),
            push_workers: DEFAULT_PUSH_WORKERS,
            verify_workers: DEFAULT_VERIFY_WORKERS,
        }
    }
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct BringUpReport {
    pub session_issued_at: DateTime<Utc>,
    /// Set when registration failed under the warn policy
    pub registration_error: Option<String>,
    pub outcomes: Vec<PushOutcome>,
    pub summary: ReachabilitySummary,
    /// Operator aborted during the push phase; verification was skipped
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl BringUpReport {
    pub fn push_counts(&self) -> (usize, usize) {
        tally(&self.outcomes)
    }

    /// Every push succeeded, registration was clean and all endpoints answered
    pub fn fleet_healthy(&self) -> bool {
        !self.cancelled
            && self.registration_error.is_none()
            && self.push_counts().1 == 0
            && self.summary.all_reachable()
    }
}

/// Bring-up use case, parameterized by its ports
pub struct BringUpUseCase<A, R, S, P>
where
    A: ManagementApi,
    R: DomainRegistry,
    S: RemoteShell,
    P: ReachabilityProbe,
{
    api: A,
    registry: R,
    shell: S,
    probe: P,
    settings: BringUpSettings,
}

impl<A, R, S, P> BringUpUseCase<A, R, S, P>
where
    A: ManagementApi,
    R: DomainRegistry,
    S: RemoteShell,
    P: ReachabilityProbe,
{
    pub fn new(api: A, registry: R, shell: S, probe: P, settings: BringUpSettings) -> Self {
        Self {
            api,
            registry,
            shell,
            probe,
            settings,
        }
    }

    pub fn execute(
        &self,
        plan: &BringUpPlan,
        events: Arc<dyn FleetEventSink>,
        cancel: &CancelToken,
    ) -> FleetResult<BringUpReport> {
        let started = Instant::now();

        match ReadinessPoller::new(&self.api, events.clone()).poll(&plan.readiness, cancel) {
            ReadinessOutcome::Ready { .. } => {}
            ReadinessOutcome::Cancelled => return Err(cancelled(&events, "readiness")),
            ReadinessOutcome::Exhausted { attempts } => {
                return Err(FleetError::NotReady {
                    endpoint: self.api.endpoint().to_string(),
                    attempts,
                })
            }
        }

        let session = SessionClient::new(&self.api, events.clone())
            .authenticate(&plan.fm_username, &plan.fm_password)?;
        let token = session.require_token()?;

        let registration_error = match DomainRegistrar::new(&self.registry, events.clone())
            .register_domain(&session, &plan.group, &plan.subgroup)
        {
            Ok(()) => None,
            Err(err @ FleetError::Registration(_))
                if plan.registration_policy == RegistrationPolicy::Warn =>
            {
                warn!(error = %err, "continuing without confirmed registration");
                Some(err.to_string())
            }
            Err(err) => return Err(err),
        };

        let record = RegistrationRecord::new(
            plan.group.as_str(),
            plan.subgroup.as_str(),
            token,
            plan.remote_address.as_str(),
            plan.remote_port,
        )?;

        if cancel.is_cancelled() {
            return Err(cancelled(&events, "registration"));
        }

        let push_pool = WorkerPool::new("push", self.settings.push_workers)?;
        let pusher =
            RemoteConfigPusher::new(&self.shell, events.clone(), self.settings.push.clone());
        let outcomes = FleetOrchestrator::new(pusher, &push_pool, events.clone())
            .configure_fleet(&plan.controller, &plan.production, &record, cancel);

        let (summary, was_cancelled) = if cancel.is_cancelled() {
            events.on_event(FleetEvent::Cancelled {
                phase: "configuration".to_string(),
            });
            (ReachabilitySummary::default(), true)
        } else {
            let verify_pool = WorkerPool::new("verify", self.settings.verify_workers)?;
            let summary = ConnectivityVerifier::new(&self.probe, &verify_pool, events.clone())
                .verify_fleet(&plan.verification);
            (summary, false)
        };

        Ok(BringUpReport {
            session_issued_at: session.issued_at(),
            registration_error,
            outcomes,
            summary,
            cancelled: was_cancelled,
            elapsed: started.elapsed(),
        })
    }

    /// Only the verification sweep, for an already configured fleet
    pub fn verify_only(
        &self,
        endpoints: &[Endpoint],
        events: Arc<dyn FleetEventSink>,
    ) -> FleetResult<ReachabilitySummary> {
        let pool = WorkerPool::new("verify", self.settings.verify_workers)?;
        Ok(ConnectivityVerifier::new(&self.probe, &pool, events).verify_fleet(endpoints))
    }
}

fn cancelled(events: &Arc<dyn FleetEventSink>, phase: &'static str) -> FleetError {
    events.on_event(FleetEvent::Cancelled {
        phase: phase.to_string(),
    });
    FleetError::Cancelled { phase }
}
