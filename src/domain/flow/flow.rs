use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::domain::utils::id::{EndpointAddr, SwitchId};

/// One admitted end-to-end bandwidth reservation.
///
/// The path is a property of the flow, captured at admission time and never
/// recomputed: teardown releases capacity against exactly the links the rules were
/// installed on, even if the topology has changed since.
#[derive(Debug, Clone)]
pub struct Flow {
    pub src: EndpointAddr,
    pub dst: EndpointAddr,

    /// Bandwidth units reserved on every link of the path.
    pub bandwidth: i64,

    /// Ordered switch sequence from the source switch to the destination switch,
    /// inclusive. Length >= 1; a single-node path carries no reservations.
    pub path: Vec<SwitchId>,

    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl Flow {
    /// The directed inter-switch hops of the path, in path order.
    pub fn hops(&self) -> impl Iterator<Item = (&SwitchId, &SwitchId)> {
        self.path.iter().zip(self.path.iter().skip(1))
    }

    pub fn hop_count(&self) -> usize {
        self.path.len() - 1
    }
}
