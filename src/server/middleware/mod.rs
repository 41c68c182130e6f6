//! Request middleware: session issuing and the terminal error handler.

pub mod error;
pub mod session;
