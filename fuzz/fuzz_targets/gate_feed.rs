#![no_main]

use std::borrow::Cow;
use std::io;

use keypad_gate::{probe, Gate, GateConfig, HookSlot, HostBridge, Hook};
use libfuzzer_sys::fuzz_target;

struct FuzzHost {
    clock: u64,
    notices: usize,
}

impl HostBridge for FuzzHost {
    fn now(&self) -> u64 { self.clock }

    fn trigger_breakpoint(&mut self) {}

    fn read_own_source(&self, identifier: &str) -> Option<Cow<'static, str>> {
        probe::rendering(identifier).map(Cow::Borrowed)
    }

    fn notify(&mut self, _message: &str) -> io::Result<()> {
        self.notices += 1;
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    // Each byte is a press; its high bits advance the clock first
    let mut gate = Gate::new(FuzzHost { clock: 0, notices: 0 }, &GateConfig::default());
    gate.boot();
    let observer: std::sync::Arc<HookSlot> = gate.observer();
    for &byte in data {
        gate.host_mut().clock += u64::from(byte >> 6);
        let hook = gate.handle(i32::from(byte & 0x0f));
        assert_eq!(hook, observer.load());
        assert!(gate.host().notices <= 1);
        assert!(hook != Hook::Disarmed);
    }
});
