//! Translation of an [`InvocationRequest`] into Phing command-line tokens.
//!
//! The emitted order is fixed:
//!
//! 1. `-f <build file>`
//! 2. `-quiet` or `-verbose`, if any
//! 3. `-debug`, if requested
//! 4. `-Dbasedir=<root directory>`, exactly once
//! 5. user properties as `-D<key=value>`, in order
//! 6. targets, in order
//!
//! Tokens are never reordered, deduplicated, or checked against the engine's
//! own grammar.

use std::path::{Path, PathBuf};

use phingrun_utils::error::InvocationError;
use phingrun_utils::types::Verbosity;

use crate::invocation::InvocationRequest;

pub const BUILD_FILE_FLAG: &str = "-f";
pub const DEBUG_FLAG: &str = "-debug";
pub const QUIET_FLAG: &str = "-quiet";
pub const VERBOSE_FLAG: &str = "-verbose";
pub const PROPERTY_PREFIX: &str = "-D";
pub const BASEDIR_PROPERTY: &str = "basedir";

/// Resolve the build file to a canonical absolute path.
///
/// An absent or empty `requested` path falls back to `root_directory/default_file`.
/// Relative paths are resolved against the current directory.
///
/// # Errors
///
/// Returns [`InvocationError::BuildFileNotFound`] when the candidate does not
/// exist. There is no fallback search.
pub fn resolve_build_file(
    requested: Option<&str>,
    root_directory: &str,
    default_file: &str,
) -> Result<PathBuf, InvocationError> {
    let candidate = match requested.filter(|path| !path.is_empty()) {
        Some(path) => PathBuf::from(path),
        None => Path::new(root_directory).join(default_file),
    };

    dunce::canonicalize(&candidate).map_err(|e| {
        tracing::debug!(path = %candidate.display(), error = %e, "Build file lookup failed");
        InvocationError::BuildFileNotFound {
            path: candidate.display().to_string(),
        }
    })
}

/// Engine flag for the console verbosity.
///
/// A single `-v` deliberately maps to no flag; the engine only becomes verbose
/// from the second level on.
#[must_use]
pub const fn resolve_verbosity_flag(verbosity: Verbosity) -> Option<&'static str> {
    match verbosity {
        Verbosity::Quiet => Some(QUIET_FLAG),
        Verbosity::Verbose(level) if level > 1 => Some(VERBOSE_FLAG),
        Verbosity::Normal | Verbosity::Verbose(_) => None,
    }
}

/// Split on commas with no trimming and no filtering of empty segments.
fn split_list(raw: Option<&str>) -> Vec<&str> {
    match raw {
        Some(list) if !list.is_empty() => list.split(',').collect(),
        _ => Vec::new(),
    }
}

/// `-D` tokens for a comma-separated property list.
#[must_use]
pub fn resolve_properties(raw: Option<&str>) -> Vec<String> {
    split_list(raw)
        .into_iter()
        .map(|segment| format!("{PROPERTY_PREFIX}{segment}"))
        .collect()
}

/// Target tokens for a comma-separated target list.
#[must_use]
pub fn resolve_targets(raw: Option<&str>) -> Vec<String> {
    split_list(raw).into_iter().map(str::to_string).collect()
}

/// The `-Dbasedir=<root>` token.
#[must_use]
pub fn basedir_property(root_directory: &str) -> String {
    format!("{PROPERTY_PREFIX}{BASEDIR_PROPERTY}={root_directory}")
}

/// Lay out the full argument list around an already resolved build file.
///
/// Does not touch the filesystem.
#[must_use]
pub fn assemble_arguments(build_file: &Path, request: &InvocationRequest) -> Vec<String> {
    let mut args = vec![
        BUILD_FILE_FLAG.to_string(),
        build_file.to_string_lossy().into_owned(),
    ];

    if let Some(flag) = resolve_verbosity_flag(request.verbosity) {
        args.push(flag.to_string());
    }

    if request.debug {
        args.push(DEBUG_FLAG.to_string());
    }

    args.push(basedir_property(&request.root_directory));
    args.extend(resolve_properties(request.property_list.as_deref()));
    args.extend(resolve_targets(request.target_list.as_deref()));

    args
}

/// Build the complete engine argument list for a request.
///
/// # Errors
///
/// Fails with [`InvocationError::BuildFileNotFound`] before any other work.
pub fn build_arguments(request: &InvocationRequest) -> Result<Vec<String>, InvocationError> {
    let build_file = resolve_build_file(
        request.build_file.as_deref(),
        &request.root_directory,
        &request.default_file,
    )?;

    Ok(assemble_arguments(&build_file, request))
}
