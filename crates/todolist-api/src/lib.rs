//! REST API server for the todolist task tracker.
//!
//! The router is generic over the storage backend: `main` wires it to
//! SQLite, tests run it over the in-memory store.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod schemas;
pub mod state;

pub use routes::app;
pub use state::AppState;
