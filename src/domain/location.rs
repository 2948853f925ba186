use std::collections::HashMap;

use crate::domain::utils::id::{EndpointAddr, SwitchId};

/// Where an endpoint was last seen: the switch and ingress port its traffic arrived on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLocation {
    pub switch: SwitchId,
    pub port: u16,
}

/// Learns endpoint locations from observed traffic.
///
/// Every inbound packet observation upserts the binding for the packet's source
/// address; a later observation for the same address simply overwrites the earlier
/// one. Bindings are never proactively expired.
#[derive(Debug, Default)]
pub struct LocationLearner {
    bindings: HashMap<EndpointAddr, HostLocation>,
}

impl LocationLearner {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Records that `address` is reachable through (`switch`, `port`). Unconditional upsert.
    pub fn observe(&mut self, address: EndpointAddr, switch: SwitchId, port: u16) {
        let location = HostLocation { switch, port };

        if let Some(previous) = self.bindings.insert(address.clone(), location.clone()) {
            if previous != location {
                log::debug!("EndpointMoved: {} relocated from {}[{}] to {}[{}]", address, previous.switch, previous.port, location.switch, location.port);
            }
        } else {
            log::debug!("EndpointLearned: {} at {}[{}]", address, location.switch, location.port);
        }
    }

    /// Last observed location of `address`. `None` is a normal outcome: the caller
    /// drops or defers the request, it is not an error.
    pub fn locate(&self, address: &EndpointAddr) -> Option<&HostLocation> {
        self.bindings.get(address)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(a: &str) -> EndpointAddr {
        EndpointAddr::new(a)
    }

    fn switch(s: &str) -> SwitchId {
        SwitchId::new(s)
    }

    #[test]
    fn locate_unknown_address_is_none() {
        let learner = LocationLearner::new();

        assert_eq!(learner.locate(&addr("10.0.0.1")), None);
    }

    #[test]
    fn observe_then_locate() {
        let mut learner = LocationLearner::new();

        learner.observe(addr("10.0.0.1"), switch("s1"), 3);

        let location = learner.locate(&addr("10.0.0.1")).expect("binding should exist");
        assert_eq!(location.switch, switch("s1"));
        assert_eq!(location.port, 3);
    }

    #[test]
    fn later_observation_overwrites_earlier_binding() {
        let mut learner = LocationLearner::new();

        learner.observe(addr("10.0.0.1"), switch("s1"), 3);
        learner.observe(addr("10.0.0.1"), switch("s4"), 1);

        let location = learner.locate(&addr("10.0.0.1")).expect("binding should exist");
        assert_eq!(location, &HostLocation { switch: switch("s4"), port: 1 });
        assert_eq!(learner.len(), 1);
    }
}
