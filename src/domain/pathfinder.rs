use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::domain::topology::topology::TopologyGraph;
use crate::domain::utils::id::SwitchId;

/// Computes the minimum-total-weight path from `src` to `dst`, restricted to links
/// whose residual capacity can carry `required_bandwidth`.
///
/// Links without enough headroom are excluded from relaxation entirely; insufficient
/// capacity is a hard filter, not a cost penalty. Ties in cost are broken by heap
/// discovery order and are not specified to be deterministic across runs.
///
/// # Returns
/// Returns the path as an ordered sequence of switch ids from `src` to `dst`
/// inclusive. `src == dst` yields the trivial single-node path. Returns `None` when
/// either endpoint is unknown to the graph or `dst` is unreachable under the
/// bandwidth constraint.
pub fn find_path(graph: &TopologyGraph, src: &SwitchId, dst: &SwitchId, required_bandwidth: i64) -> Option<Vec<SwitchId>> {
    if !graph.contains_switch(src) || !graph.contains_switch(dst) {
        log::debug!("NoPathFound: {} => {} (unknown endpoint switch)", src, dst);
        return None;
    }

    if src == dst {
        return Some(vec![src.clone()]);
    }

    let mut distances: HashMap<SwitchId, i64> = HashMap::new();
    let mut previous_nodes: HashMap<SwitchId, SwitchId> = HashMap::new();
    let mut settled: HashSet<SwitchId> = HashSet::new();
    let mut heap: BinaryHeap<Reverse<(i64, SwitchId)>> = BinaryHeap::new();

    distances.insert(src.clone(), 0);
    heap.push(Reverse((0, src.clone())));

    while let Some(Reverse((current_distance, current_node))) = heap.pop() {
        if current_node == *dst {
            break;
        }

        // A node popped a second time carries a stale, larger distance. Once settled
        // with its final distance it is never re-relaxed.
        if !settled.insert(current_node.clone()) {
            continue;
        }

        for (neighbor, link) in graph.neighbors(&current_node) {
            if !link.has_headroom(required_bandwidth) {
                continue;
            }

            if settled.contains(neighbor) {
                continue;
            }

            let candidate = current_distance + link.weight;

            if distances.get(neighbor).is_none_or(|&known| candidate < known) {
                distances.insert(neighbor.clone(), candidate);
                previous_nodes.insert(neighbor.clone(), current_node.clone());
                heap.push(Reverse((candidate, neighbor.clone())));
            }
        }
    }

    if !previous_nodes.contains_key(dst) {
        log::debug!("NoPathFound: {} => {} with {} bandwidth units required", src, dst, required_bandwidth);
        return None;
    }

    let mut path = vec![dst.clone()];
    let mut cursor = dst;

    while let Some(predecessor) = previous_nodes.get(cursor) {
        path.push(predecessor.clone());
        cursor = predecessor;
    }

    path.reverse();

    log::debug!("PathFound: {} => {} over {} hops", src, dst, path.len() - 1);

    Some(path)
}
