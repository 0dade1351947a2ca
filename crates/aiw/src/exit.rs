//! Process exit statuses

use std::process::ExitCode;

/// Outcome of a command, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Everything succeeded
    Success,
    /// A conversion failed, strict mode saw warnings, or lint found references
    Failure,
    /// Bad arguments or an unusable source
    Usage,
    /// The file system refused a read or write
    Environment,
}

impl Status {
    /// Numeric exit code
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Usage => 2,
            Self::Environment => 3,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}

/// Invalid usage that clap cannot detect
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct UsageError(pub String);

/// Exit status for an error that ended a command
///
/// Usage errors anywhere in the chain win over I/O errors; anything else is a general
/// failure.
#[must_use]
pub fn classify(err: &anyhow::Error) -> Status {
    if err.chain().any(|cause| cause.is::<UsageError>()) {
        Status::Usage
    } else if err.chain().any(|cause| cause.is::<std::io::Error>()) {
        Status::Environment
    } else {
        Status::Failure
    }
}
