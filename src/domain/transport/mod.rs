pub mod transport;
pub mod transport_mock;
