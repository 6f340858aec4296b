use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("inspector detected: breakpoint stalled for {stalled_secs}s")]
    InspectorDetected { stalled_secs: u64 },

    #[error("guard tampered: probe rendering does not match the build digest")]
    GuardTampered,

    #[error("validator mismatch at stage {stage}")]
    ValidatorMismatch { stage: u8 },

    #[error("invalid module: {0}")]
    InvalidModule(&'static str),

    #[error("unsupported opcode 0x{0:02x}")]
    UnsupportedOpcode(u8),

    #[error("missing function export: {0}")]
    MissingExport(String),

    #[error("arity mismatch: expected {expected} got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("trap executed")]
    TrapExecuted,

    #[error("automation suspected: {elapsed}s elapsed, more than {window}s required")]
    AutomationSuspected { elapsed: u64, window: u64 },

    #[error("launch contract violated: {0}")]
    LaunchContractViolated(String),
}

impl GateError {
    /// Errors raised by the sandbox while loading or running a module.
    #[must_use]
    pub const fn is_sandbox_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidModule(_)
                | Self::UnsupportedOpcode(_)
                | Self::MissingExport(_)
                | Self::ArityMismatch { .. }
                | Self::TrapExecuted
        )
    }
}
