//! # Todolist Core Library
//!
//! A small personal task tracker: tasks with priorities, due dates and
//! categories, backed by SQLite or an in-memory store, with an
//! overdue-task auto-closure scheduler on top.
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern (SQLite)
//! - [`memory`]: In-memory repository backend with the same contracts
//! - [`service`]: Use-case orchestration over the repositories
//! - [`scheduler`]: Periodic overdue-task closure (one-shot and daemon)
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use todolist_core::{
//!     db, models::NewTaskData, repository::SqliteRepository, service::TaskService,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::establish_connection("tasks.db").await?;
//!     let repo = Arc::new(SqliteRepository::new(pool));
//!     let service = TaskService::new(repo);
//!
//!     let task = service
//!         .create_task(NewTaskData {
//!             title: "Water the plants".to_string(),
//!             category_name: Some("Home".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created task #{}: {}", task.id, task.title);
//!
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod scheduler;
pub mod service;
