use crate::{errors::GateError, host::HostBridge, probe};

include!(concat!(env!("OUT_DIR"), "/probe_digest.rs"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    Clean,
    InspectorDetected { stalled_secs: u64 },
    Tampered,
}

impl GuardVerdict {
    #[must_use]
    pub const fn is_clean(self) -> bool { matches!(self, Self::Clean) }

    /// # Errors
    ///
    /// Returns the matching `GateError` for any verdict other than `Clean`.
    pub fn into_result(self) -> Result<(), GateError> {
        match self {
            Self::Clean => Ok(()),
            Self::InspectorDetected { stalled_secs } => Err(GateError::InspectorDetected { stalled_secs }),
            Self::Tampered => Err(GateError::GuardTampered),
        }
    }
}

/// Inspector detection plus self-tamper detection, re-derived on every call.
#[derive(Debug, Clone)]
pub struct IntegrityGuard {
    expected: blake3::Hash,
}

impl Default for IntegrityGuard {
    fn default() -> Self { Self::with_digest(PROBE_DIGEST) }
}

impl IntegrityGuard {
    #[must_use]
    pub fn with_digest(digest: [u8; 32]) -> Self {
        Self { expected: blake3::Hash::from(digest) }
    }

    /// Time the breakpoint probe, then compare the probe's live rendering
    /// against the build digest. Both checks always run; an attached inspector
    /// is reported ahead of tampering.
    pub fn check<H: HostBridge + ?Sized>(&self, host: &mut H) -> GuardVerdict {
        let stalled_secs = probe::breakpoint_probe(host);
        let intact = self.probe_intact(host);

        if stalled_secs != 0 {
            tracing::warn!(stalled_secs, intact, "breakpoint stalled, inspector attached");
            GuardVerdict::InspectorDetected { stalled_secs }
        } else if !intact {
            tracing::warn!(probe = probe::PROBE_ID, "probe rendering does not match build digest");
            GuardVerdict::Tampered
        } else {
            GuardVerdict::Clean
        }
    }

    fn probe_intact<H: HostBridge + ?Sized>(&self, host: &H) -> bool {
        host.read_own_source(probe::PROBE_ID)
            .is_some_and(|src| blake3::hash(src.as_bytes()) == self.expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::io;

    struct FrozenClock {
        at: u64,
        stall: u64,
    }

    impl HostBridge for FrozenClock {
        fn now(&self) -> u64 { self.at }
        fn trigger_breakpoint(&mut self) { self.at += self.stall; }
        fn read_own_source(&self, identifier: &str) -> Option<Cow<'static, str>> {
            probe::rendering(identifier).map(Cow::Borrowed)
        }
        fn notify(&mut self, _message: &str) -> io::Result<()> { Ok(()) }
    }

    #[test]
    fn shipped_probe_matches_digest() {
        let rendering = probe::rendering(probe::PROBE_ID).unwrap();
        assert_eq!(blake3::hash(rendering.as_bytes()).as_bytes(), &PROBE_DIGEST);
    }

    #[test]
    fn clean_when_nothing_stalls() {
        let mut host = FrozenClock { at: 50, stall: 0 };
        assert_eq!(IntegrityGuard::default().check(&mut host), GuardVerdict::Clean);
    }

    #[test]
    fn wrong_digest_reads_as_tampering() {
        let guard = IntegrityGuard::with_digest([0u8; 32]);
        let mut host = FrozenClock { at: 50, stall: 0 };
        assert_eq!(guard.check(&mut host), GuardVerdict::Tampered);
    }

    #[test]
    fn stall_outranks_tampering() {
        let guard = IntegrityGuard::with_digest([0u8; 32]);
        let mut host = FrozenClock { at: 50, stall: 2 };
        assert_eq!(guard.check(&mut host), GuardVerdict::InspectorDetected { stalled_secs: 2 });
    }

    #[test]
    fn verdicts_map_onto_errors() {
        assert_eq!(GuardVerdict::Clean.into_result(), Ok(()));
        assert_eq!(GuardVerdict::Tampered.into_result(), Err(GateError::GuardTampered));
        assert_eq!(
            GuardVerdict::InspectorDetected { stalled_secs: 3 }.into_result(),
            Err(GateError::InspectorDetected { stalled_secs: 3 })
        );
    }
}
