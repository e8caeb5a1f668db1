//! Stable exit codes for the `settings` CLI.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid options, unreadable or malformed config, or any other error.
pub const INVALID: i32 = 1;
/// `settings get` was asked for a setting that is not defined.
pub const MISSING: i32 = 2;
