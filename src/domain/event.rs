use crate::domain::utils::id::{EndpointAddr, SwitchId};

/// Notifications delivered by the switch transport and discovery layer. These are
/// the only inputs that mutate controller state; they are consumed by a single
/// event-loop task, which is what serializes all writers.
#[derive(Debug, Clone)]
pub enum NetworkEvent {
    /// A forwarding device announced itself.
    SwitchConnected { switch: SwitchId },

    /// Discovery reported a usable link between two switches. Ports are the local
    /// egress ports of each direction.
    LinkUp { switch_a: SwitchId, port_a: u16, switch_b: SwitchId, port_b: u16 },

    /// Discovery reported the link between two switches gone. Both directions go
    /// down together.
    LinkDown { switch_a: SwitchId, switch_b: SwitchId },

    /// A data packet reached the controller. Drives location learning and, when both
    /// endpoints resolve, implicit flow admission.
    PacketObserved { switch: SwitchId, in_port: u16, src: EndpointAddr, dst: EndpointAddr, payload: Vec<u8> },
}
