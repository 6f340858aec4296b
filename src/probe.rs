//! Breakpoint probe.
//!
//! `build.rs` hashes this file and the guard compares that digest against the
//! host's live rendering of it on every check. Any edit here changes the
//! digest at the next build.

use crate::host::HostBridge;

pub const PROBE_ID: &str = "breakpoint_probe";

const PROBE_SOURCE: &str = include_str!("probe.rs");

/// Seconds the host's pause primitive held the caller.
pub fn breakpoint_probe<H: HostBridge + ?Sized>(host: &mut H) -> u64 {
    let before = host.now();
    host.trigger_breakpoint();
    let after = host.now();
    after.abs_diff(before)
}

/// Shipped rendering of the routine called `identifier`, if it is one we render.
#[must_use]
pub fn rendering(identifier: &str) -> Option<&'static str> {
    (identifier == PROBE_ID).then_some(PROBE_SOURCE)
}
