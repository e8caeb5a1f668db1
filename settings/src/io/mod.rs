//! I/O helpers for the settings store.

pub mod init;
pub mod load;
pub mod paths;
pub mod write;
