//! Exit codes for phingrun.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Engine ran and reported success |
//! | -1 | `ENGINE_CONFIGURATION` | The engine could not be configured or located |
//! | 1 | `INTERNAL` | Build file missing, engine crashed, or any other failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or phingrun configuration |
//! | n | - | Any other value is the engine's own exit code, passed through |
//!
//! On Unix, `-1` is observed by the parent shell as `255`.

/// Exit codes matching the documented exit code table.
///
/// Use the named constants for codes phingrun decides itself, or
/// [`from_i32()`](Self::from_i32) to carry the engine's exit code through.
///
/// ```rust
/// use phingrun_utils::exit_codes::ExitCode;
///
/// assert_eq!(ExitCode::ENGINE_CONFIGURATION.as_i32(), -1);
/// assert_eq!(ExitCode::from_i32(0), ExitCode::SUCCESS);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - the engine completed the requested targets
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Engine configuration error - executable or home could not be resolved
    pub const ENGINE_CONFIGURATION: ExitCode = ExitCode(-1);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid arguments or phingrun configuration
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Get the numeric exit code value.
    ///
    /// Use this with `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}
