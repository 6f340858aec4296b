use crate::errors::GateError;

/// Remembers when stage 1 was passed and judges whether the rest of the code
/// arrived at human speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomationTimer {
    first_success: Option<u64>,
    window_secs: u64,
}

impl AutomationTimer {
    #[must_use]
    pub const fn new(window_secs: u64) -> Self {
        Self { first_success: None, window_secs }
    }

    pub fn record_first_success(&mut self, now: u64) {
        self.first_success = Some(now);
    }

    pub fn reset(&mut self) {
        self.first_success = None;
    }

    #[must_use]
    pub const fn first_success(&self) -> Option<u64> { self.first_success }

    /// `now - first_success > window`. False if stage 1 was never passed.
    #[must_use]
    pub fn enough_elapsed(&self, now: u64) -> bool {
        self.check(now).is_ok()
    }

    /// # Errors
    ///
    /// Returns `GateError::AutomationSuspected` when the window has not yet passed.
    pub fn check(&self, now: u64) -> Result<(), GateError> {
        let elapsed = self.first_success.map_or(0, |t| now.saturating_sub(t));
        if self.first_success.is_some() && elapsed > self.window_secs {
            Ok(())
        } else {
            Err(GateError::AutomationSuspected { elapsed, window: self.window_secs })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_strict() {
        let mut t = AutomationTimer::new(1);
        t.record_first_success(100);
        assert!(!t.enough_elapsed(100));
        assert!(!t.enough_elapsed(101));
        assert!(t.enough_elapsed(102));
    }

    #[test]
    fn unset_or_reset_fails_closed() {
        let mut t = AutomationTimer::new(1);
        assert!(!t.enough_elapsed(u64::MAX));
        t.record_first_success(10);
        t.reset();
        assert_eq!(t.first_success(), None);
        assert_eq!(t.check(50), Err(GateError::AutomationSuspected { elapsed: 0, window: 1 }));
    }

    #[test]
    fn clock_going_backwards_is_not_elapsed_time() {
        let mut t = AutomationTimer::new(1);
        t.record_first_success(100);
        assert!(!t.enough_elapsed(40));
    }
}
