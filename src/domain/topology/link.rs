/// A directed edge of the switch-level topology.
///
/// Links always exist in antiparallel pairs (a -> b and b -> a), each direction with
/// its own egress port and routing weight. The pair is maintained by
/// [`TopologyGraph`](crate::domain::topology::topology::TopologyGraph); a `Link` on
/// its own is only ever one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Egress port on the source switch of this direction.
    pub port: u16,

    /// Routing cost used by the path finder.
    pub weight: i64,

    /// Remaining admissible bandwidth. Invariant: `0 <= capacity <= max_capacity`.
    pub capacity: i64,

    /// Bandwidth the link was provisioned with.
    pub max_capacity: i64,
}

impl Link {
    pub fn new(port: u16, weight: i64, capacity: i64) -> Self {
        Self { port, weight, capacity, max_capacity: capacity }
    }

    /// Whether this direction can still carry `amount` more bandwidth units.
    pub fn has_headroom(&self, amount: i64) -> bool {
        self.capacity >= amount
    }
}
