use std::sync::Arc;
use tokio::sync::mpsc;

use sdn_flow_controller::domain::event::NetworkEvent;
use sdn_flow_controller::domain::transport::transport::{LoggingTransport, SwitchTransport};
use sdn_flow_controller::domain::utils::id::{EndpointAddr, SwitchId};
use sdn_flow_controller::logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    log::info!("Logger initialized. Starting NetworkController.");

    let config_path = std::env::args().nth(1);
    let transport: Arc<dyn SwitchTransport> = Arc::new(LoggingTransport);

    let controller = sdn_flow_controller::build_controller(config_path.as_deref(), transport)?;

    // Without a real OpenFlow front-end wired up, drive the core with a synthetic
    // event feed so the whole pipeline (discovery -> learning -> admission) runs.
    let (events_tx, events_rx) = mpsc::channel(64);

    for event in demo_events() {
        events_tx.send(event).await?;
    }
    drop(events_tx);

    controller.run(events_rx).await;

    let ctx = controller.context().lock().expect("Mutex poisoned");
    log::info!(
        "ControllerSummary: {} switches, {} directed links, {} learned endpoints, {} admitted flows.",
        ctx.topology.switch_count(),
        ctx.topology.link_count(),
        ctx.locations.len(),
        ctx.flows.len()
    );

    Ok(())
}

/// A small synthetic feed shaped like the lab network the controller was exercised
/// against: four switches in a ring, a fifth cross-connected to three of them, one
/// host behind each ring switch.
fn demo_events() -> Vec<NetworkEvent> {
    let s = |name: &str| SwitchId::new(name);
    let h = |name: &str| EndpointAddr::new(name);

    let mut events: Vec<NetworkEvent> = (1..=5).map(|i| NetworkEvent::SwitchConnected { switch: s(&format!("s{}", i)) }).collect();

    let links = [("s1", 1, "s2", 1), ("s2", 2, "s3", 1), ("s3", 2, "s4", 1), ("s4", 2, "s1", 2), ("s5", 1, "s1", 3), ("s5", 2, "s2", 3), ("s5", 3, "s4", 3)];

    for (a, port_a, b, port_b) in links {
        events.push(NetworkEvent::LinkUp { switch_a: s(a), port_a, switch_b: s(b), port_b });
    }

    // h1 speaks first: destination unknown, packet dropped after learning h1's location.
    events.push(NetworkEvent::PacketObserved { switch: s("s1"), in_port: 10, src: h("h1"), dst: h("h3"), payload: vec![0u8; 64] });

    // The reply teaches the controller where h3 lives; both directions get flows.
    events.push(NetworkEvent::PacketObserved { switch: s("s3"), in_port: 10, src: h("h3"), dst: h("h1"), payload: vec![0u8; 64] });
    events.push(NetworkEvent::PacketObserved { switch: s("s1"), in_port: 10, src: h("h1"), dst: h("h3"), payload: vec![0u8; 64] });

    events
}
