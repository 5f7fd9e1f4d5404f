use anyhow::Result;
use todolist_core::error::CoreError;
use todolist_core::repository::Repository;
use todolist_core::service::TaskService;

use crate::cli::{CategoryAction, CategoryCommand};
use crate::views::table::display_categories;

pub async fn category_command(
    service: &TaskService<impl Repository>,
    command: CategoryCommand,
) -> Result<()> {
    match command.action {
        CategoryAction::List => {
            let categories = service.list_categories().await?;
            display_categories(&categories);
        }
        CategoryAction::Delete { id } => {
            if !service.delete_category(id).await? {
                return Err(
                    CoreError::NotFound(format!("Category with ID {} not found", id)).into(),
                );
            }
            println!("Deleted category #{}. Its tasks were kept.", id);
        }
    }
    Ok(())
}
