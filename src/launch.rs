use crate::errors::GateError;

/// The process must be launched as exactly `expected_name` with no further arguments.
///
/// # Errors
///
/// Returns `GateError::LaunchContractViolated` describing the first deviation.
pub fn check_launch_contract<I, S>(args: I, expected_name: &str) -> Result<(), GateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut args = args.into_iter();
    let Some(name) = args.next() else {
        return Err(GateError::LaunchContractViolated("no invocation name".into()));
    };
    if name.as_ref() != expected_name {
        return Err(GateError::LaunchContractViolated(format!(
            "invoked as {:?}, expected {expected_name:?}",
            name.as_ref()
        )));
    }
    let extra = args.count();
    if extra != 0 {
        return Err(GateError::LaunchContractViolated(format!("{extra} unexpected argument(s)")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LAUNCH_NAME;

    #[test]
    fn exact_invocation_passes() {
        assert!(check_launch_contract([LAUNCH_NAME], LAUNCH_NAME).is_ok());
    }

    #[test]
    fn deviations_are_rejected() {
        assert!(check_launch_contract(Vec::<String>::new(), LAUNCH_NAME).is_err());
        assert!(check_launch_contract(["keypad"], LAUNCH_NAME).is_err());
        assert_eq!(
            check_launch_contract([LAUNCH_NAME, "--solve"], LAUNCH_NAME),
            Err(GateError::LaunchContractViolated("1 unexpected argument(s)".into()))
        );
    }
}
