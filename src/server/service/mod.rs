//! Service layer for outbound integrations.

pub mod weather;
