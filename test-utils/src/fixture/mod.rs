//! Test fixtures providing in-memory models without database insertion.

pub mod session;
