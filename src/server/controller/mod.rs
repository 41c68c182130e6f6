//! HTTP request handlers for the built-in endpoints.
//!
//! Route collaborators (`/api/auth`, `/api/sessions`, ...) bring their own handlers and
//! are mounted by [`crate::server::router`].

pub mod fallback;
pub mod health;
pub mod weather;

#[cfg(test)]
mod test;
