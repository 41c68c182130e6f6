//! Domain models and operation-specific parameter types.

pub mod session;
