//! YAML settings store that keeps the comments above top-level keys.
//!
//! A config file is bootstrapped from a template, loaded into an explicit
//! [`Settings`] object, and written back atomically. The crate is split the
//! same way throughout:
//!
//! - **[`core`]**: Pure logic (value formatting, comment preservation over
//!   line lists). No I/O, fully testable in isolation.
//! - **[`io`]**: Filesystem operations (option loading, template bootstrap,
//!   load, atomic write).
//!
//! [`store::SettingsStore`] ties the two together.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::table::Settings;
pub use crate::core::value::SettingValue;
pub use crate::io::paths::SettingsOptions;
pub use crate::store::SettingsStore;
