//! HTTP backend.
//!
//! The backend uses Axum as the web framework, SeaORM for persistence and
//! tower-sessions for cookie sessions. Feature routes are contributed by route
//! collaborators; the backend itself only serves health, readiness and the weather
//! gateway.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers and DTO conversion
//! - **Service Layer** (`service/`) - Outbound integrations (weather gateway)
//! - **Data Layer** (`data/`) - Session persistence and the `tower_sessions` store
//! - **Model Layer** (`model/`) - Operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session issuing and terminal error handling
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Database** (`database`) - Shared connection handle with lifecycle events
//! - **State** (`state`) - Shared application state (config, database, HTTP client)
//! - **Startup** (`startup`) - Logging, database connector, session layer, CORS, shutdown
//! - **Router** (`router`) - Route table, collaborator mounts and layer stack
//! - **Scheduler** (`scheduler/`) - Session cleanup and database monitoring jobs
//!
//! # Request Flow
//!
//! 1. **Tracing** opens a span and the body limit is enforced
//! 2. **CORS** answers or annotates cross-origin requests (production only)
//! 3. **Session layer** resolves the signed `sid` cookie
//! 4. **Session issuing** stamps new sessions so they receive a cookie
//! 5. **Error handler** logs failures and, in development, exposes their detail
//! 6. **Router** dispatches to a built-in handler, a collaborator or the fallback

pub mod config;
pub mod controller;
pub mod data;
pub mod database;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
