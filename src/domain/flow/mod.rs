pub mod flow;
pub mod flow_manager;
pub mod flow_store;
