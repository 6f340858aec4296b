use std::env;

use crate::types::{AUTOMATION_WINDOW_SECS, LAUNCH_NAME, SUCCESS_MESSAGE};

pub const ENV_AUTOMATION_WINDOW: &str = "KEYPAD_GATE_AUTOMATION_WINDOW";
pub const ENV_LAUNCH_NAME: &str = "KEYPAD_GATE_LAUNCH_NAME";

/// Runtime knobs for a gate session, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Seconds that must pass between stage 1 and stage 5 (strictly more than this).
    pub automation_window_secs: u64,
    /// `argv[0]` the process must be launched as.
    pub launch_name: String,
    /// Shown once the last stage accepts.
    pub success_message: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            automation_window_secs: AUTOMATION_WINDOW_SECS,
            launch_name: LAUNCH_NAME.to_owned(),
            success_message: SUCCESS_MESSAGE.to_owned(),
        }
    }
}

impl GateConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns. Unparseable values keep the default.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_AUTOMATION_WINDOW) {
            match raw.trim().parse() {
                Ok(secs) => config.automation_window_secs = secs,
                Err(err) => tracing::warn!(%raw, %err, "ignoring {ENV_AUTOMATION_WINDOW}"),
            }
        }
        if let Some(name) = lookup(ENV_LAUNCH_NAME).filter(|n| !n.is_empty()) {
            config.launch_name = name;
        }
        config
    }
}
