//! SeaORM entities for the tables owned by the backend core.
//!
//! Route collaborators own their own schemas; the only table defined here is the
//! session table used by the session store.

pub mod prelude;

pub mod session;
