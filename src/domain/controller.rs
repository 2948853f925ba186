use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::ControllerConfig;
use crate::domain::event::NetworkEvent;
use crate::domain::flow::flow_manager::FlowManager;
use crate::domain::flow::flow_store::{FlowId, FlowStore};
use crate::domain::location::LocationLearner;
use crate::domain::topology::topology::TopologyGraph;
use crate::domain::transport::transport::SwitchTransport;
use crate::domain::utils::id::{EndpointAddr, SwitchId};

/// The complete mutable state of the controller: topology, learned endpoint
/// locations, admitted flows and the timers that will expire them.
///
/// One explicitly owned context object, scoped to the controller, replaces any
/// ambient global state. Every write goes through the single mutex wrapping it, so
/// check-then-commit sequences (capacity decisions in particular) are atomic with
/// respect to all other writers.
#[derive(Debug, Default)]
pub struct ControllerContext {
    pub topology: TopologyGraph,
    pub locations: LocationLearner,
    pub flows: FlowStore,

    /// Pending expiry timers, removable for explicit cancellation.
    pub expiry_tasks: HashMap<FlowId, JoinHandle<()>>,
}

/// The control-plane core: consumes transport/discovery notifications, keeps the
/// topology and location state current and delegates flow admission and teardown to
/// the [`FlowManager`].
#[derive(Debug)]
pub struct NetworkController {
    context: Arc<Mutex<ControllerContext>>,
    manager: FlowManager,
    config: ControllerConfig,
}

impl NetworkController {
    pub fn new(config: ControllerConfig, transport: Arc<dyn SwitchTransport>) -> Self {
        let context = Arc::new(Mutex::new(ControllerContext::default()));
        let manager = FlowManager::new(context.clone(), transport, config.clone());

        Self { context, manager, config }
    }

    pub fn flow_manager(&self) -> &FlowManager {
        &self.manager
    }

    /// Shared handle to the controller state, for diagnostics and tests.
    pub fn context(&self) -> &Arc<Mutex<ControllerContext>> {
        &self.context
    }

    /// Consumes events from the transport layer until every sender is dropped.
    ///
    /// A single consumer task is the serialization boundary for all event-driven
    /// mutation; expiry timers go through the same context mutex.
    pub async fn run(&self, mut events: mpsc::Receiver<NetworkEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event);
        }

        log::info!("EventLoopStopped: all event senders dropped.");
    }

    pub fn handle_event(&self, event: NetworkEvent) {
        match event {
            NetworkEvent::SwitchConnected { switch } => self.on_switch_connected(switch),
            NetworkEvent::LinkUp { switch_a, port_a, switch_b, port_b } => self.on_link_up(switch_a, port_a, switch_b, port_b),
            NetworkEvent::LinkDown { switch_a, switch_b } => self.on_link_down(switch_a, switch_b),
            NetworkEvent::PacketObserved { switch, in_port, src, dst, payload } => self.on_packet_observed(switch, in_port, src, dst, payload),
        }
    }

    fn on_switch_connected(&self, switch: SwitchId) {
        let mut ctx = self.context.lock().expect("Mutex poisoned");

        if ctx.topology.add_switch(switch.clone()) {
            log::info!("SwitchUp: {} has come up.", switch);
        } else {
            log::debug!("SwitchUp: {} reconnected, already known.", switch);
        }
    }

    fn on_link_up(&self, switch_a: SwitchId, port_a: u16, switch_b: SwitchId, port_b: u16) {
        let mut ctx = self.context.lock().expect("Mutex poisoned");

        ctx.topology.add_link(switch_a.clone(), switch_b.clone(), port_a, port_b, self.config.link_weight, self.config.link_capacity);

        log::info!("LinkAdded: {}[{}] <-> {}[{}] with {} capacity units per direction", switch_a, port_a, switch_b, port_b, self.config.link_capacity);
    }

    fn on_link_down(&self, switch_a: SwitchId, switch_b: SwitchId) {
        let mut ctx = self.context.lock().expect("Mutex poisoned");

        if ctx.topology.remove_link(&switch_a, &switch_b) {
            log::info!("LinkRemoved: {} <-> {}", switch_a, switch_b);
        } else {
            log::debug!("LinkRemoved: {} <-> {} was not in the topology, nothing to do", switch_a, switch_b);
        }
    }

    /// Learns the packet's source location, then treats the packet as an implicit
    /// admission request. Packets whose endpoints do not both resolve are dropped
    /// without error.
    fn on_packet_observed(&self, switch: SwitchId, in_port: u16, src: EndpointAddr, dst: EndpointAddr, payload: Vec<u8>) {
        log::debug!("PacketObserved: {} -> {} at {}[{}], {} payload bytes", src, dst, switch, in_port, payload.len());

        {
            let mut ctx = self.context.lock().expect("Mutex poisoned");
            ctx.locations.observe(src.clone(), switch, in_port);
        }

        match self.manager.admit_observed_pair(&src, &dst) {
            Ok(_) => {}
            Err(e) => log::error!("AdmissionDefect: implicit admission for {} -> {} failed: {}", src, dst, e),
        }
    }
}
