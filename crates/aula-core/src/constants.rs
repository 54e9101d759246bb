//! Application-wide constants
//!
//! Centralized location for magic values that are used across
//! multiple modules.

/// Number of records materialized into a list window per page.
pub const PAGE_SIZE: usize = 20;

/// Minimum similarity score for a fuzzy title match.
pub const FUZZY_THRESHOLD: f64 = 0.1;

/// Path of the live event socket, relative to the server host.
pub const SOCKET_PATH: &str = "/socket";

/// Default result value assigned to a freshly delivered activity.
pub const RESULT_UNCHECKED: &str = "Unchecked";
