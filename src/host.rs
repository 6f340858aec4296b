use std::borrow::Cow;
use std::io::{self, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use std::{fs, thread};

use crate::{errors::GateError, probe, sandbox::Instance};

/// Capabilities the gate consumes from its environment.
pub trait HostBridge {
    /// Wall clock in whole seconds.
    fn now(&self) -> u64;

    /// The host's interactive-pause primitive. Returns once resumed, or
    /// immediately when nothing is attached.
    fn trigger_breakpoint(&mut self);

    /// Literal rendering of a named routine, for the guard's self-check.
    fn read_own_source(&self, identifier: &str) -> Option<Cow<'static, str>>;

    /// Best-effort user-visible message.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; callers swallow it.
    fn notify(&mut self, message: &str) -> io::Result<()>;

    /// Instantiate a sandboxed module. Defaults to the built-in interpreter.
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidModule` if the bytes do not decode.
    fn run_module(&self, bytes: &[u8]) -> Result<Instance, GateError> {
        Instance::instantiate(bytes)
    }
}

/// Host for a native terminal session.
#[derive(Debug, Clone)]
pub struct StdHost {
    pause: Duration,
}

impl StdHost {
    #[must_use]
    pub const fn new(pause: Duration) -> Self { Self { pause } }
}

impl Default for StdHost {
    fn default() -> Self { Self::new(Duration::from_secs(1)) }
}

impl HostBridge for StdHost {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    // A traced process stalls here for one pause quantum, which is what the
    // guard's clock comparison picks up.
    fn trigger_breakpoint(&mut self) {
        if tracer_attached() {
            tracing::debug!(pause_ms = self.pause.as_millis(), "tracer attached, pausing");
            thread::sleep(self.pause);
        }
    }

    fn read_own_source(&self, identifier: &str) -> Option<Cow<'static, str>> {
        probe::rendering(identifier).map(Cow::Borrowed)
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{message}")?;
        out.flush()
    }
}

/// Whether `/proc/self/status` names a tracer. False wherever procfs is absent.
#[must_use]
pub fn tracer_attached() -> bool {
    fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| parse_tracer_pid(&status))
        .is_some_and(|pid| pid != 0)
}

fn parse_tracer_pid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracer_pid_parsing() {
        let status = "Name:\tkeypad\nState:\tR (running)\nTracerPid:\t4242\nUid:\t0\n";
        assert_eq!(parse_tracer_pid(status), Some(4242));
        assert_eq!(parse_tracer_pid("TracerPid:\t0\n"), Some(0));
        assert_eq!(parse_tracer_pid("Name:\tkeypad\n"), None);
    }

    #[test]
    fn std_host_renders_the_probe() {
        let host = StdHost::default();
        assert!(host.read_own_source(probe::PROBE_ID).is_some());
        assert!(host.read_own_source("main").is_none());
    }
}
