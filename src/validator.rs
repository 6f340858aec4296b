use crate::{codec::{decode_with_oracle, ObfuscatedPayload}, errors::GateError, host::HostBridge, sandbox::StagingBuffer};

/// How a stage decides whether an input is its digit.
#[derive(Debug, Clone)]
pub enum Validator {
    /// Predicate compiled into the core.
    Inline(fn(i32) -> bool),
    /// Module read in place by the sandbox.
    Staged { module: &'static [u8], export: &'static str },
    /// Module held in core memory, copied into a staging buffer first.
    Native { module: &'static [u8], export: &'static str },
    /// Module stored obscured, decoded once before loading.
    Obscured { payload: ObfuscatedPayload, export: &'static str },
    /// Module whose every byte is first run through a second, throwaway module.
    OracleDecoded {
        oracle: &'static [u8],
        oracle_export: &'static str,
        payload: &'static [u8],
        export: &'static str,
    },
}

impl Validator {
    /// Does `input` match this stage's digit? A module predicate matches only by returning 1.
    ///
    /// # Errors
    ///
    /// Propagates sandbox faults (`InvalidModule`, `TrapExecuted`, ...) unchanged;
    /// the chain treats them as a mismatch.
    pub fn evaluate<H: HostBridge + ?Sized>(&self, host: &H, input: i32) -> Result<bool, GateError> {
        let result = match self {
            Self::Inline(predicate) => return Ok(predicate(input)),
            Self::Staged { module, export } => host.run_module(module)?.call(export, input)?,
            Self::Native { module, export } => {
                let staged = StagingBuffer::copy_from(module);
                host.run_module(staged.as_bytes())?.call(export, input)?
            }
            Self::Obscured { payload, export } => {
                let plain = payload.clone().into_plaintext();
                host.run_module(&plain)?.call(export, input)?
            }
            Self::OracleDecoded { oracle, oracle_export, payload, export } => {
                let oracle = host.run_module(oracle)?;
                let plain = decode_with_oracle(payload, &oracle, oracle_export)?;
                host.run_module(&plain)?.call(export, input)?
            }
        };
        Ok(result == 1)
    }
}
