use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;

use crate::domain::flow::flow::Flow;
use crate::domain::utils::id::EndpointAddr;

new_key_type! {
    pub struct FlowId;
}

/// Storage for admitted flows.
///
/// Besides the slotmap itself a secondary index maps the directed endpoint pair
/// (src, dst) to the flow currently admitted for it. The index is what suppresses a
/// second implicit admission while a flow for the pair is still live.
///
/// Unlike the topology this store carries no lock of its own; it lives inside the
/// controller context behind the single controller mutex.
#[derive(Debug, Default)]
pub struct FlowStore {
    /// Flow storage.
    slots: SlotMap<FlowId, Flow>,

    /// Index lookup FlowId using the directed endpoint pair of the flow.
    pair_index: HashMap<(EndpointAddr, EndpointAddr), FlowId>,
}

impl FlowStore {
    pub fn new() -> Self {
        Self { slots: SlotMap::with_key(), pair_index: HashMap::new() }
    }

    /// Adds a Flow to the FlowStore.
    ///
    /// # Returns
    /// Returns the FlowId (internal key for the FlowStore). The pair index always
    /// points at the most recently inserted flow for the pair.
    pub fn insert(&mut self, flow: Flow) -> FlowId {
        let pair = (flow.src.clone(), flow.dst.clone());
        let key = self.slots.insert(flow);

        self.pair_index.insert(pair, key);

        return key;
    }

    /// Removes and returns the flow behind `key`.
    ///
    /// # Returns
    /// Returns `Some(Flow)` if the flow was still present, `None` if it was already
    /// removed (removal is idempotent). The pair index entry is only dropped when it
    /// still points at this flow.
    pub fn remove(&mut self, key: FlowId) -> Option<Flow> {
        let flow = self.slots.remove(key)?;

        let pair = (flow.src.clone(), flow.dst.clone());
        if self.pair_index.get(&pair) == Some(&key) {
            self.pair_index.remove(&pair);
        }

        Some(flow)
    }

    pub fn get(&self, key: FlowId) -> Option<&Flow> {
        self.slots.get(key)
    }

    /// The live flow admitted for the directed endpoint pair, if any.
    pub fn get_by_pair(&self, src: &EndpointAddr, dst: &EndpointAddr) -> Option<FlowId> {
        self.pair_index.get(&(src.clone(), dst.clone())).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
