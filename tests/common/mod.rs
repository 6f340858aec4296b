#![allow(dead_code)]

use std::borrow::Cow;
use std::io;

use keypad_gate::{probe, HostBridge};

/// Host with a hand-driven clock and a debugger that stalls on demand.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub clock: u64,
    /// Breakpoints that pass cleanly before any stalling starts.
    pub grace: u32,
    /// Breakpoints that will stall before the inspector lets go.
    pub stalls: u32,
    pub stall_secs: u64,
    /// Replaces the probe rendering when set.
    pub forged_source: Option<String>,
    pub notices: Vec<String>,
    pub breakpoints: u32,
    pub fail_notify: bool,
}

impl ScriptedHost {
    pub fn at(clock: u64) -> Self {
        Self { clock, stall_secs: 1, ..Self::default() }
    }

    pub fn advance(&mut self, secs: u64) {
        self.clock += secs;
    }
}

impl HostBridge for ScriptedHost {
    fn now(&self) -> u64 {
        self.clock
    }

    fn trigger_breakpoint(&mut self) {
        self.breakpoints += 1;
        if self.grace > 0 {
            self.grace -= 1;
        } else if self.stalls > 0 {
            self.stalls -= 1;
            self.clock += self.stall_secs;
        }
    }

    fn read_own_source(&self, identifier: &str) -> Option<Cow<'static, str>> {
        match &self.forged_source {
            Some(forged) => Some(Cow::Owned(forged.clone())),
            None => probe::rendering(identifier).map(Cow::Borrowed),
        }
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        if self.fail_notify {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "display gone"));
        }
        self.notices.push(message.to_owned());
        Ok(())
    }
}

pub const CODE: [i32; 7] = [1, 9, 4, 7, 4, 8, 2];
