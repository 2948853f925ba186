use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::ControllerConfig;
use crate::domain::controller::ControllerContext;
use crate::domain::flow::flow::Flow;
use crate::domain::flow::flow_store::FlowId;
use crate::domain::pathfinder;
use crate::domain::transport::transport::{RuleSpec, SwitchTransport};
use crate::domain::utils::id::EndpointAddr;
use crate::error::Result;

/// Why an admission request was turned down. Rejections are normal operational
/// outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No bandwidth-feasible path between the endpoint switches.
    NoPath,

    /// At least one endpoint has never been observed on any switch.
    UnknownEndpoint,
}

/// Outcome of one admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    Admitted(FlowId),
    Rejected(RejectReason),
}

/// What a committed admission still owes once the context lock is dropped: rule
/// installation and the expiry timer.
#[derive(Debug)]
enum AdmissionOutcome {
    Committed { flow_id: FlowId, duration: Duration, rules: Vec<RuleSpec> },
    Rejected(RejectReason),
}

/// Orchestrates the life of a flow: admission (feasibility check + capacity commit +
/// rule installation), deferred expiry and teardown with capacity restoration.
///
/// The check-then-commit of an admission happens under one acquisition of the shared
/// controller mutex, so two concurrent admissions can never both observe the same
/// pre-reservation capacity. Rule installation is issued after the in-memory commit,
/// outside the lock; the transport never gets called while state is held.
#[derive(Debug, Clone)]
pub struct FlowManager {
    context: Arc<Mutex<ControllerContext>>,
    transport: Arc<dyn SwitchTransport>,
    config: ControllerConfig,
}

impl FlowManager {
    pub fn new(context: Arc<Mutex<ControllerContext>>, transport: Arc<dyn SwitchTransport>, config: ControllerConfig) -> Self {
        Self { context, transport, config }
    }

    /// Admits a flow of `bandwidth` units between two endpoints for `duration`.
    ///
    /// # Returns
    /// Returns the admission decision. `Err` only surfaces a defect
    /// (`Error::InsufficientCapacity` past the feasibility check, see `error.rs`);
    /// every operational outcome is a `Rejected` variant.
    pub fn admit(&self, src: &EndpointAddr, dst: &EndpointAddr, bandwidth: i64, duration: Duration) -> Result<AdmissionDecision> {
        let outcome = {
            let mut ctx = self.context.lock().expect("Mutex poisoned");
            self.admit_locked(&mut ctx, src, dst, bandwidth, duration)?
        };

        self.finish_admission(outcome)
    }

    /// Implicit admission for an observed packet: admits with the configured default
    /// bandwidth and duration, unless a flow for this endpoint pair is already live.
    ///
    /// # Returns
    /// Returns `Ok(None)` when an existing flow made the request moot.
    pub fn admit_observed_pair(&self, src: &EndpointAddr, dst: &EndpointAddr) -> Result<Option<AdmissionDecision>> {
        let outcome = {
            let mut ctx = self.context.lock().expect("Mutex poisoned");

            if ctx.flows.get_by_pair(src, dst).is_some() {
                log::debug!("FlowAlreadyAdmitted: {} -> {} is covered by a live flow, packet needs no new admission", src, dst);
                return Ok(None);
            }

            self.admit_locked(&mut ctx, src, dst, self.config.default_bandwidth, self.config.default_duration())?
        };

        self.finish_admission(outcome).map(Some)
    }

    /// The serialized part of an admission: endpoint resolution, path search and the
    /// all-or-nothing capacity commit, all under the caller-held context lock.
    fn admit_locked(
        &self,
        ctx: &mut ControllerContext,
        src: &EndpointAddr,
        dst: &EndpointAddr,
        bandwidth: i64,
        duration: Duration,
    ) -> Result<AdmissionOutcome> {
        let Some(src_location) = ctx.locations.locate(src).cloned() else {
            log::debug!("UnresolvedEndpoint: {} has not been observed yet, request dropped", src);
            return Ok(AdmissionOutcome::Rejected(RejectReason::UnknownEndpoint));
        };

        let Some(dst_location) = ctx.locations.locate(dst).cloned() else {
            log::debug!("UnresolvedEndpoint: {} has not been observed yet, request dropped", dst);
            return Ok(AdmissionOutcome::Rejected(RejectReason::UnknownEndpoint));
        };

        let Some(path) = pathfinder::find_path(&ctx.topology, &src_location.switch, &dst_location.switch, bandwidth) else {
            log::warn!("NoPathFound: no feasible route {} -> {} with {} bandwidth units", src, dst, bandwidth);
            return Ok(AdmissionOutcome::Rejected(RejectReason::NoPath));
        };

        // Collect the egress ports first. The path was computed from this very graph
        // under the same lock, so every hop must still be present.
        let mut rules = Vec::with_capacity(path.len().saturating_sub(1));

        for (u, v) in path.iter().zip(path.iter().skip(1)) {
            let link = ctx.topology.link(u, v).expect("path hop must exist in the graph it was computed from");

            rules.push(RuleSpec {
                switch: u.clone(),
                match_src: src.clone(),
                match_dst: dst.clone(),
                output_port: link.port,
                idle_timeout_secs: self.config.rule_idle_timeout_secs,
                hard_timeout_secs: self.config.rule_hard_timeout_secs,
            });
        }

        // The feasibility filter already vetted every hop, so this sequence commits
        // end-to-end or surfaces a concurrency defect via `?`.
        for (u, v) in path.iter().zip(path.iter().skip(1)) {
            ctx.topology.reserve(u, v, bandwidth)?;
        }

        let flow = Flow { src: src.clone(), dst: dst.clone(), bandwidth, path, started_at: Utc::now(), duration };
        let hop_count = flow.hop_count();
        let flow_id = ctx.flows.insert(flow);

        log::info!("FlowAdmitted: {} -> {} with {} bandwidth units over {} hops for {:?}", src, dst, bandwidth, hop_count, duration);

        Ok(AdmissionOutcome::Committed { flow_id, duration, rules })
    }

    /// Post-commit work that must not hold the lock: rule installation and the
    /// expiry timer.
    fn finish_admission(&self, outcome: AdmissionOutcome) -> Result<AdmissionDecision> {
        let (flow_id, duration, rules) = match outcome {
            AdmissionOutcome::Rejected(reason) => return Ok(AdmissionDecision::Rejected(reason)),
            AdmissionOutcome::Committed { flow_id, duration, rules } => (flow_id, duration, rules),
        };

        for rule in &rules {
            if let Err(e) = self.transport.install_rule(rule) {
                // Reported upward, not retried; the in-memory admission stands.
                log::warn!("RuleInstallFailed: {} (flow remains admitted)", e);
            }
        }

        self.schedule_expiry(flow_id, duration);

        Ok(AdmissionDecision::Admitted(flow_id))
    }

    /// Schedules the deferred teardown of `flow_id`. The handle is kept in the
    /// context so an explicit teardown can cancel the timer; a timer that fires
    /// after an explicit teardown finds the flow gone and does nothing.
    ///
    /// Spawn and registration happen under one lock acquisition: teardown needs the
    /// same lock before it can touch `expiry_tasks`, so the timer can never complete
    /// and leave its own handle behind as a stale entry. A flow already torn down
    /// between commit and this call gets no timer at all.
    fn schedule_expiry(&self, flow_id: FlowId, duration: Duration) {
        let mut ctx = self.context.lock().expect("Mutex poisoned");

        if ctx.flows.get(flow_id).is_none() {
            log::debug!("ExpirySkipped: flow was torn down before its timer could be scheduled");
            return;
        }

        let manager = self.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            log::debug!("FlowExpired: scheduled teardown firing after {:?}", duration);
            manager.teardown(flow_id);
        });

        ctx.expiry_tasks.insert(flow_id, handle);
    }

    /// Tears a flow down: removes the record and restores capacity on every link of
    /// the path that was captured at admission.
    ///
    /// Idempotent by construction. The expiry timer and an explicit removal may
    /// both call this, in any order or concurrently, and capacity is restored
    /// exactly once.
    pub fn teardown(&self, flow_id: FlowId) {
        let mut ctx = self.context.lock().expect("Mutex poisoned");

        if let Some(handle) = ctx.expiry_tasks.remove(&flow_id) {
            handle.abort();
        }

        let Some(flow) = ctx.flows.remove(flow_id) else {
            log::debug!("TeardownSkipped: flow already torn down or unknown");
            return;
        };

        for (u, v) in flow.hops() {
            ctx.topology.release(u, v, flow.bandwidth);
        }

        log::info!("FlowRemoved: {} -> {} released {} bandwidth units over {} hops", flow.src, flow.dst, flow.bandwidth, flow.hop_count());
    }
}
