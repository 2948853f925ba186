pub mod controller;
pub mod event;
pub mod flow;
pub mod location;
pub mod pathfinder;
pub mod topology;
pub mod transport;
pub mod utils;
