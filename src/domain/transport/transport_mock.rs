use std::collections::HashSet;
use std::sync::Mutex;

use crate::domain::transport::transport::{RuleSpec, SwitchTransport};
use crate::domain::utils::id::SwitchId;
use crate::error::{Error, Result};

/// Test double for the switch transport: records every rule it is asked to install
/// and can be told to fail for selected switches.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    rules: Mutex<Vec<RuleSpec>>,
    failing_switches: Mutex<HashSet<SwitchId>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rules installed so far, in installation order.
    pub fn installed(&self) -> Vec<RuleSpec> {
        self.rules.lock().expect("Mutex poisoned").clone()
    }

    pub fn installed_count(&self) -> usize {
        self.rules.lock().expect("Mutex poisoned").len()
    }

    /// Makes every subsequent installation on `switch` fail.
    pub fn fail_on(&self, switch: SwitchId) {
        self.failing_switches.lock().expect("Mutex poisoned").insert(switch);
    }
}

impl SwitchTransport for RecordingTransport {
    fn install_rule(&self, rule: &RuleSpec) -> Result<()> {
        if self.failing_switches.lock().expect("Mutex poisoned").contains(&rule.switch) {
            return Err(Error::RuleInstallation { switch: rule.switch.clone(), reason: "transport failure injected by test".to_string() });
        }

        self.rules.lock().expect("Mutex poisoned").push(rule.clone());

        Ok(())
    }
}
