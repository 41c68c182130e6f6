//! Factory methods for creating test data.
//!
//! Factories insert rows with sensible defaults so tests only spell out the fields
//! they care about. Each entity has a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let live = factory::session::create_session(&db).await?;
//! let stale = factory::session::SessionFactory::new(&db)
//!     .expired()
//!     .build()
//!     .await?;
//! ```

pub mod helpers;
pub mod session;

pub use session::create_session;
