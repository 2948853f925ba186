use std::collections::{HashMap, HashSet};

use crate::domain::topology::link::Link;
use crate::domain::utils::id::SwitchId;
use crate::error::{Error, Result};

/// The live switch-level topology: the set of known switches plus the adjacency map
/// of directed, capacity-carrying links between them.
///
/// All mutation goes through link-up/link-down handling and through
/// `reserve`/`release` during flow admission and teardown. The graph itself carries
/// no lock; the controller serializes every writer behind a single mutex.
#[derive(Debug, Default)]
pub struct TopologyGraph {
    /// Switches that have announced themselves or appeared as a link endpoint.
    switches: HashSet<SwitchId>,

    /// Maps a switch to its outgoing links, keyed by the remote switch.
    adjacency: HashMap<SwitchId, HashMap<SwitchId, Link>>,
}

impl TopologyGraph {
    pub fn new() -> Self {
        Self { switches: HashSet::new(), adjacency: HashMap::new() }
    }

    /// Registers a switch. Idempotent.
    ///
    /// # Returns
    /// Returns `true` if the switch was not known before.
    pub fn add_switch(&mut self, switch: SwitchId) -> bool {
        self.switches.insert(switch)
    }

    pub fn contains_switch(&self, switch: &SwitchId) -> bool {
        self.switches.contains(switch)
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    /// Number of directed links currently in the graph (an antiparallel pair counts as two).
    pub fn link_count(&self) -> usize {
        self.adjacency.values().map(|links| links.len()).sum()
    }

    /// Inserts the antiparallel link pair between `a` and `b`. Idempotent in the
    /// last-writer-wins sense: re-adding an existing pair overwrites port, weight and
    /// capacity of both directions. Both endpoints become known switches.
    pub fn add_link(&mut self, a: SwitchId, b: SwitchId, port_a: u16, port_b: u16, weight: i64, capacity: i64) {
        self.switches.insert(a.clone());
        self.switches.insert(b.clone());

        self.adjacency.entry(a.clone()).or_default().insert(b.clone(), Link::new(port_a, weight, capacity));
        self.adjacency.entry(b).or_default().insert(a, Link::new(port_b, weight, capacity));
    }

    /// Removes both directions of the link pair between `a` and `b`.
    ///
    /// # Returns
    /// Returns `true` if at least one direction was present. Removing an unknown
    /// pair is a no-op, not an error.
    pub fn remove_link(&mut self, a: &SwitchId, b: &SwitchId) -> bool {
        let forward = self.adjacency.get_mut(a).and_then(|links| links.remove(b)).is_some();
        let backward = self.adjacency.get_mut(b).and_then(|links| links.remove(a)).is_some();

        return forward || backward;
    }

    /// Outgoing links of `node`, paired with the remote switch. Empty when `node` is
    /// unknown or has no links.
    pub fn neighbors(&self, node: &SwitchId) -> impl Iterator<Item = (&SwitchId, &Link)> {
        self.adjacency.get(node).into_iter().flatten()
    }

    /// The single directed link `a -> b`, if present.
    pub fn link(&self, a: &SwitchId, b: &SwitchId) -> Option<&Link> {
        self.adjacency.get(a)?.get(b)
    }

    /// Decrements the capacity of the single directed link `a -> b`.
    ///
    /// Admission pre-checks feasibility end-to-end before committing any edge, so
    /// under serialized writers this cannot fail mid-path. A failure here is a defect
    /// signal, not an operational outcome.
    pub fn reserve(&mut self, a: &SwitchId, b: &SwitchId, amount: i64) -> Result<()> {
        let Some(link) = self.adjacency.get_mut(a).and_then(|links| links.get_mut(b)) else {
            return Err(Error::UnknownLink { from: a.clone(), to: b.clone() });
        };

        if !link.has_headroom(amount) {
            return Err(Error::InsufficientCapacity { from: a.clone(), to: b.clone(), requested: amount, available: link.capacity });
        }

        link.capacity -= amount;
        log::debug!("CapacityReserved: {} -> {} minus {} units, {} left", a, b, amount, link.capacity);

        Ok(())
    }

    /// Restores capacity on the single directed link `a -> b`.
    ///
    /// Release is commutative and tolerant: the link may have gone down while the
    /// flow was still admitted, in which case there is nothing to restore. The
    /// capacity never exceeds the provisioned maximum; hitting the clamp means some
    /// flow was released twice and is logged as a defect.
    pub fn release(&mut self, a: &SwitchId, b: &SwitchId, amount: i64) {
        let Some(link) = self.adjacency.get_mut(a).and_then(|links| links.get_mut(b)) else {
            log::debug!("ReleaseSkipped: link {} -> {} is no longer in the topology", a, b);
            return;
        };

        let restored = link.capacity + amount;

        if restored > link.max_capacity {
            log::warn!("CapacityOverRelease: link {} -> {} would exceed its provisioned {} units, clamping", a, b, link.max_capacity);
            link.capacity = link.max_capacity;
        } else {
            link.capacity = restored;
        }

        log::debug!("CapacityReleased: {} -> {} plus {} units, {} available", a, b, amount, link.capacity);
    }
}
