use core::ops::RangeInclusive;

/// The nine buttons on the keypad surface.
pub const BUTTONS: RangeInclusive<i32> = 1..=9;

/// Parse one press from a line of input. Anything but a single button value is ignored.
#[must_use]
pub fn parse_press(line: &str) -> Option<i32> {
    line.trim().parse().ok().filter(|v| BUTTONS.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses() {
        assert_eq!(parse_press("4\n"), Some(4));
        assert_eq!(parse_press("  9 "), Some(9));
        assert_eq!(parse_press("0"), None);
        assert_eq!(parse_press("10"), None);
        assert_eq!(parse_press("x"), None);
        assert_eq!(parse_press(""), None);
    }
}
