//! Database repository layer.
//!
//! Repositories wrap SeaORM entity operations and keep entity models from leaking into
//! the rest of the server. The session store adapts the session repository to the
//! `tower_sessions::SessionStore` trait.

pub mod session;
pub mod session_store;

#[cfg(test)]
mod test;
