use todolist_core::repository::Repository;
use todolist_core::service::TaskService;

/// Shared application dependencies, generic over the storage backend so
/// the router can run against SQLite in production and the in-memory
/// store in tests.
pub struct AppState<R: Repository> {
    pub service: TaskService<R>,
}

impl<R: Repository> AppState<R> {
    pub fn new(service: TaskService<R>) -> Self {
        Self { service }
    }
}

impl<R: Repository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}
