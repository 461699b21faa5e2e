//! Shared helpers for unit tests. Compiled only for test builds.

pub mod http;
