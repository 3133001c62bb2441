use std::process::ExitCode;

/// Exit status of a `bang-audit` run.
///
/// - `Success` (0): audit completed; violations do not fail the run unless requested
/// - `Failure` (1): `--fail-on-violations` was set and violations were found
/// - `Error` (2): invalid arguments or configuration
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Pick the status for a finished audit.
    pub fn from_audit(violation_count: usize, fail_on_violations: bool) -> Self {
        if fail_on_violations && violation_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
