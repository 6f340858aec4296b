use crate::{errors::GateError, interp, module::Module};

/// An instantiated validator module.
#[derive(Debug, Clone)]
pub struct Instance {
    module: Module,
}

impl Instance {
    /// Decode `bytes` and make the module callable.
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidModule` if the bytes do not decode.
    pub fn instantiate(bytes: &[u8]) -> Result<Self, GateError> {
        Ok(Self { module: Module::decode(bytes)? })
    }

    /// Call the single-argument function exported as `export`.
    ///
    /// # Errors
    ///
    /// Returns `GateError::MissingExport` for an unknown name, `GateError::TrapExecuted`
    /// if the function aborts, and `GateError::InvalidModule` if it produces no value.
    pub fn call(&self, export: &str, arg: i32) -> Result<i32, GateError> {
        let func = self.module.export_func(export)?;
        interp::invoke(&self.module, func, &[arg])?
            .ok_or(GateError::InvalidModule("predicate returned no value"))
    }

    #[must_use]
    pub const fn module(&self) -> &Module { &self.module }
}

/// Sandbox-owned copy of a payload that lives in the core's own memory.
///
/// Payloads stored this way are never handed to the decoder by reference; they
/// are copied byte by byte into a fresh buffer first.
#[derive(Debug, Default)]
pub struct StagingBuffer {
    bytes: Vec<u8>,
}

impl StagingBuffer {
    #[must_use]
    pub fn copy_from(src: &[u8]) -> Self {
        Self { bytes: src.iter().copied().collect() }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }
}
