//! Exit code definitions for sftp-loader
//!
//! Scripts wrapping the interactive session rely on these values; changing
//! them is a breaking change.

/// Exit codes for the sftp-loader process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operator ended the session (answered "no" or typed `exit`)
    Success = 0,

    /// An operation failed or a command/mode was not recognized
    GeneralError = 1,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Session ended by the operator",
            Self::GeneralError => "Operation failed or input was not recognized",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
