//! The stage chain: one entry point, `handle`, dispatching on the installed hook.
//!
//! Transition rules while a stage hook is installed:
//!
//! - the integrity guard runs first; a violation neutralises the hook, resets
//!   to stage 1 and discards the input
//! - a match on stage 1 starts the automation timer
//! - a match on the last stage shows the success message and ends the chain
//! - any other match installs the next stage
//! - a mismatch on a resetting stage re-arms through the guard (stage 1, or
//!   disarmed if the guard objects)
//! - a mismatch on the trapping stage installs the trap, silently and for good

use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::{
    config::GateConfig,
    errors::GateError,
    guard::IntegrityGuard,
    hook::{Hook, HookSlot},
    host::HostBridge,
    payloads::TRAP_MODULE,
    stages::{default_chain, Stage},
    timer::AutomationTimer,
    types::{FailurePolicy, StageId, STAGE_COUNT},
};

const TRAP_EXPORT: &str = "_stage_one";

pub struct Gate<H: HostBridge> {
    host: H,
    hook: Arc<HookSlot>,
    guard: IntegrityGuard,
    timer: AutomationTimer,
    stages: [Stage; STAGE_COUNT as usize],
    success_message: String,
}

impl<H: HostBridge> Gate<H> {
    /// A gate with the default chain and guard. The hook starts disarmed; call `boot`.
    #[must_use]
    pub fn new(host: H, config: &GateConfig) -> Self {
        Self::with_guard(host, config, IntegrityGuard::default())
    }

    #[must_use]
    pub fn with_guard(host: H, config: &GateConfig, guard: IntegrityGuard) -> Self {
        Self {
            host,
            hook: Arc::new(HookSlot::default()),
            guard,
            timer: AutomationTimer::new(config.automation_window_secs),
            stages: default_chain(),
            success_message: config.success_message.clone(),
        }
    }

    /// Arm the gate for a fresh session. Returns the installed hook.
    pub fn boot(&mut self) -> Hook {
        self.rearm();
        self.hook()
    }

    /// Feed one input through the installed hook. Returns the hook installed afterwards.
    pub fn handle(&mut self, input: i32) -> Hook {
        match self.hook.load() {
            Hook::Stage(id) => self.advance(id, input),
            Hook::Trap => self.spring_trap(input),
            hook @ (Hook::Disarmed | Hook::Terminal) => {
                trace!(%hook, "input ignored");
            }
        }
        self.hook()
    }

    /// Remove the instrumentation for good, e.g. after a bad launch.
    pub fn teardown(&mut self) {
        self.timer.reset();
        let previous = self.hook.install(Hook::Disarmed);
        debug!(%previous, "hook torn down");
    }

    #[must_use]
    pub fn hook(&self) -> Hook { self.hook.load() }

    /// A read handle on the hook slot for external observers.
    #[must_use]
    pub fn observer(&self) -> Arc<HookSlot> { Arc::clone(&self.hook) }

    #[must_use]
    pub const fn first_success(&self) -> Option<u64> { self.timer.first_success() }

    #[must_use]
    pub const fn host(&self) -> &H { &self.host }

    pub fn host_mut(&mut self) -> &mut H { &mut self.host }

    fn advance(&mut self, id: StageId, input: i32) {
        if let Err(err) = self.guard.check(&mut self.host).into_result() {
            warn!(stage = id.get(), %err, "guard violation, input discarded");
            self.neutralise();
            self.reset_to_first();
            return;
        }

        match self.judge(id, input) {
            Ok(()) => self.pass(id),
            Err(err) => {
                debug!(stage = id.get(), %err, "stage failed");
                match self.stages[id.index()].on_failure {
                    FailurePolicy::Reset => self.rearm(),
                    FailurePolicy::Trap => self.enter_trap(input),
                }
            }
        }
    }

    fn judge(&self, id: StageId, input: i32) -> Result<(), GateError> {
        let stage = &self.stages[id.index()];
        if stage.timed {
            self.timer.check(self.host.now()).inspect_err(|err| {
                warn!(stage = id.get(), %err, "too fast, validator skipped");
            })?;
        }
        match stage.validator.evaluate(&self.host, input) {
            Ok(true) => Ok(()),
            Ok(false) => Err(GateError::ValidatorMismatch { stage: id.get() }),
            Err(err) if err.is_sandbox_fault() => {
                debug!(stage = id.get(), %err, "sandbox fault, failing closed");
                Err(GateError::ValidatorMismatch { stage: id.get() })
            }
            Err(err) => Err(err),
        }
    }

    fn pass(&mut self, id: StageId) {
        if id.is_first() {
            self.timer.record_first_success(self.host.now());
        }
        match id.next() {
            Some(next) => {
                self.hook.install(Hook::Stage(next));
                debug!(stage = id.get(), "stage passed");
            }
            None => {
                self.hook.install(Hook::Terminal);
                info!("all stages passed");
                if let Err(err) = self.host.notify(&self.success_message) {
                    debug!(%err, "notify failed");
                }
            }
        }
    }

    /// Guard, then stage 1. A guard that objects leaves the hook disarmed.
    fn rearm(&mut self) {
        self.timer.reset();
        let verdict = self.guard.check(&mut self.host);
        if verdict.is_clean() {
            self.hook.install(Hook::FIRST);
        } else {
            warn!(?verdict, "re-arm refused");
            self.neutralise();
        }
    }

    fn reset_to_first(&mut self) {
        self.timer.reset();
        self.hook.install(Hook::FIRST);
    }

    fn neutralise(&mut self) {
        let previous = self.hook.install(Hook::Disarmed);
        if previous.is_instrumented() {
            debug!(%previous, "hook neutralised");
        }
    }

    fn enter_trap(&mut self, input: i32) {
        self.hook.install(Hook::Trap);
        self.spring_trap(input);
    }

    fn spring_trap(&self, input: i32) {
        let outcome = self
            .host
            .run_module(TRAP_MODULE)
            .and_then(|trap| trap.call(TRAP_EXPORT, input));
        trace!(?outcome, "trap sprung");
    }
}
