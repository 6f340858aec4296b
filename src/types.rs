use core::fmt;

pub const STAGE_COUNT: u8 = 7;                      // digits in the secret code
pub const STATIC_XOR_KEY: u8 = 0xAA;                // stage 4 payload key
pub const ORACLE_XOR_KEY: u8 = 0xBB;                // applied by the stage 5 oracle module
pub const AUTOMATION_WINDOW_SECS: u64 = 1;          // elapsed time must exceed this
pub const LAUNCH_NAME: &str = "./this.program";     // argv[0] the glue launches with
pub const SUCCESS_MESSAGE: &str =
    "Good job! You did it! Your prize is the satisfaction of a job well done. Congrats!";

/// Ordinal of a stage in the chain, always in `1..=STAGE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct StageId(u8);

impl StageId {
    pub const FIRST: Self = Self(1);
    pub const LAST: Self = Self(STAGE_COUNT);

    #[must_use]
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= STAGE_COUNT { Some(Self(n)) } else { None }
    }

    #[must_use]
    pub const fn get(self) -> u8 { self.0 }

    /// Zero-based position in the stage table.
    #[must_use]
    pub const fn index(self) -> usize { (self.0 - 1) as usize }

    #[must_use]
    pub const fn is_first(self) -> bool { self.0 == 1 }

    #[must_use]
    pub const fn is_last(self) -> bool { self.0 == STAGE_COUNT }

    /// The stage a success installs, or `None` past the last stage.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        if self.is_last() { None } else { Some(Self(self.0 + 1)) }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage{}", self.0)
    }
}

/// What a stage does when its validator rejects the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Re-arm the guard and return to stage 1.
    Reset,
    /// Install the trap hook; only a process restart recovers.
    Trap,
}
