use std::sync::Arc;

use crate::config::ControllerConfig;
use crate::domain::controller::NetworkController;
use crate::domain::transport::transport::SwitchTransport;
use crate::error::Result;

pub mod config;
pub mod domain;
pub mod error;
pub mod logger;

/// Builds a [`NetworkController`] over the given switch transport.
///
/// When `config_path` is given the controller config is loaded from that JSON file,
/// otherwise the built-in defaults are used.
pub fn build_controller(config_path: Option<&str>, transport: Arc<dyn SwitchTransport>) -> Result<NetworkController> {
    let config = match config_path {
        Some(path) => {
            let config = ControllerConfig::from_file(path)?;
            log::info!("Controller config loaded from '{}'.", path);
            config
        }
        None => ControllerConfig::default(),
    };

    Ok(NetworkController::new(config, transport))
}
