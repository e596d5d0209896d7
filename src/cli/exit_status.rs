use std::process::ExitCode;

/// Exit status of a run.
///
/// - `Success` (0): The walk completed. Per-file failures were reported
///   but do not change the status.
/// - `Failure` (1): `--check` found orphaned keys or unreadable translations,
///   or `init` found an existing config.
/// - `Error` (2): The run aborted (no base keys) or hit an internal error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The walk completed.
    Success,
    /// The walk completed but the tree is not clean (check mode).
    Failure,
    /// The run aborted before processing any translation.
    Error,
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
