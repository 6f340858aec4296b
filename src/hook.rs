//! The observation hook: the one slot through which input reaches the chain.
//!
//! The slot holds a single `u8` tag, so replacing the hook is one atomic swap
//! and a concurrent reader sees either the old hook or the new one, never a mix.

use core::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::types::{StageId, STAGE_COUNT};

const TAG_DISARMED: u8 = 0;
const TAG_TERMINAL: u8 = STAGE_COUNT + 1;
const TAG_TRAP: u8 = STAGE_COUNT + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Instrumentation removed; input goes nowhere.
    Disarmed,
    /// Input is routed to this stage's validator.
    Stage(StageId),
    /// The full code was accepted; input is ignored.
    Terminal,
    /// Input only ever reaches the trap module.
    Trap,
}

impl Hook {
    pub const FIRST: Self = Self::Stage(StageId::FIRST);

    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Disarmed => TAG_DISARMED,
            Self::Stage(id) => id.get(),
            Self::Terminal => TAG_TERMINAL,
            Self::Trap => TAG_TRAP,
        }
    }

    /// Unknown tags decode as `Disarmed`.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            TAG_TERMINAL => Self::Terminal,
            TAG_TRAP => Self::Trap,
            n => match StageId::new(n) {
                Some(id) => Self::Stage(id),
                None => Self::Disarmed,
            },
        }
    }

    /// Whether the hook forwards input to the chain.
    #[must_use]
    pub const fn is_instrumented(self) -> bool {
        matches!(self, Self::Stage(_))
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disarmed => f.write_str("disarmed"),
            Self::Stage(id) => write!(f, "{id}"),
            Self::Terminal => f.write_str("terminal"),
            Self::Trap => f.write_str("trap"),
        }
    }
}

/// Process-wide hook slot. The gate is the only writer; observers hold an `Arc` and read.
#[derive(Debug)]
pub struct HookSlot {
    tag: AtomicU8,
}

impl Default for HookSlot {
    fn default() -> Self { Self::new(Hook::Disarmed) }
}

impl HookSlot {
    #[must_use]
    pub const fn new(hook: Hook) -> Self {
        Self { tag: AtomicU8::new(hook.tag()) }
    }

    #[must_use]
    pub fn load(&self) -> Hook {
        Hook::from_tag(self.tag.load(Ordering::Acquire))
    }

    /// Replace the hook, returning the one it displaced.
    pub fn install(&self, hook: Hook) -> Hook {
        Hook::from_tag(self.tag.swap(hook.tag(), Ordering::AcqRel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn tags_are_distinct_and_reversible() {
        let mut hooks = vec![Hook::Disarmed, Hook::Terminal, Hook::Trap];
        hooks.extend((1..=STAGE_COUNT).filter_map(StageId::new).map(Hook::Stage));
        for h in &hooks {
            assert_eq!(Hook::from_tag(h.tag()), *h);
        }
        let mut tags: Vec<u8> = hooks.iter().map(|h| h.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), hooks.len());
        assert_eq!(Hook::from_tag(200), Hook::Disarmed);
    }

    #[test]
    fn install_returns_previous() {
        let slot = HookSlot::default();
        assert_eq!(slot.install(Hook::FIRST), Hook::Disarmed);
        assert_eq!(slot.install(Hook::Trap), Hook::FIRST);
        assert_eq!(slot.load(), Hook::Trap);
    }

    #[test]
    fn readers_only_see_installed_hooks() {
        let slot = Arc::new(HookSlot::new(Hook::FIRST));
        let reader = {
            let slot = Arc::clone(&slot);
            thread::spawn(move || {
                (0..10_000).all(|_| matches!(slot.load(), Hook::Stage(_) | Hook::Terminal))
            })
        };
        for n in 1..=STAGE_COUNT {
            if let Some(id) = StageId::new(n) {
                slot.install(Hook::Stage(id));
            }
        }
        slot.install(Hook::Terminal);
        assert!(reader.join().unwrap());
    }
}
