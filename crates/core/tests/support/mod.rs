//! Shared test helpers for `greenloop-core` integration tests.
//!
//! Provides an in-memory chat gateway so service tests can focus on
//! behaviour instead of HTTP plumbing.

pub mod chat;
