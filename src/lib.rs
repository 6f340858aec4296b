#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc
)]

//! Keypad Gate - sequential secret-verification gate
//!
//! A session accepts one keypad press at a time through a single observation
//! hook. Each of seven stages checks its digit with its own validator, most of
//! them small bytecode modules run in a built-in sandbox, and every transition
//! first re-runs an integrity guard that looks for an attached inspector and
//! for tampering with its own probe.

// Fixed choices:
// - Validator modules: WebAssembly 1.0 binary subset, i32 predicates only
// - Obfuscation: single-byte XOR (0xAA static, 0xBB through an oracle module)
// - Guard self-check: BLAKE3 digest of src/probe.rs baked in by build.rs
// - Automation window: strictly more than 1s between stage 1 and stage 5
//
// Failure at stage 5 is terminal; every other failure returns to stage 1.

// Core modules
pub mod types;
pub mod errors;
pub mod config;
pub mod module;
pub mod interp;
pub mod sandbox;
pub mod payloads;
pub mod codec;
pub mod validator;
pub mod stages;
pub mod probe;
pub mod host;
pub mod guard;
pub mod timer;
pub mod hook;
pub mod chain;
pub mod launch;
pub mod keypad;

// Re-export commonly used types and functions
pub use types::*;
pub use errors::GateError;
pub use config::GateConfig;
pub use codec::{xor_decode, xor_in_place, decode_with_oracle, ObfuscatedPayload};
pub use sandbox::Instance;
pub use validator::Validator;
pub use host::{HostBridge, StdHost};
pub use guard::{GuardVerdict, IntegrityGuard};
pub use timer::AutomationTimer;
pub use hook::{Hook, HookSlot};
pub use chain::Gate;
pub use launch::check_launch_contract;
pub use keypad::parse_press;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
