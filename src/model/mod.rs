//! Wire-format DTOs shared by every endpoint.

pub mod api;
