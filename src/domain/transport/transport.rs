use crate::domain::utils::id::{EndpointAddr, SwitchId};
use crate::error::Result;

/// One forwarding rule to be programmed on a switch: match the endpoint pair, output
/// on the given port. The timeouts bound the rule's lifetime on the device itself,
/// independent of the controller's own flow timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub switch: SwitchId,
    pub match_src: EndpointAddr,
    pub match_dst: EndpointAddr,
    pub output_port: u16,
    pub idle_timeout_secs: u32,
    pub hard_timeout_secs: u32,
}

/// Boundary to the switch transport layer (the OpenFlow connection handling that is
/// out of scope here). The controller core only ever emits rule installations; the
/// transport owns encoding and delivery.
pub trait SwitchTransport: std::fmt::Debug + Send + Sync {
    /// Programs one forwarding rule. Failures are reported upward but are not
    /// retried by the core, and they do not roll back the admission bookkeeping.
    fn install_rule(&self, rule: &RuleSpec) -> Result<()>;
}

/// Transport stand-in that only logs the rules it is asked to install. Used by the
/// bootstrap demo when no real switch connection layer is wired up.
#[derive(Debug, Default)]
pub struct LoggingTransport;

impl SwitchTransport for LoggingTransport {
    fn install_rule(&self, rule: &RuleSpec) -> Result<()> {
        log::info!(
            "RuleInstalled: switch {} match {} -> {} output port {} (idle {}s, hard {}s)",
            rule.switch,
            rule.match_src,
            rule.match_dst,
            rule.output_port,
            rule.idle_timeout_secs,
            rule.hard_timeout_secs
        );

        Ok(())
    }
}
