//! Trailhead Test Utils
//!
//! Shared testing utilities for the trailhead backend. The crate offers a builder for
//! creating test contexts backed by in-memory SQLite databases, factories that insert
//! rows with sensible defaults, and fixtures that build models without touching the
//! database.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn loads_session() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_session_table().build().await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
