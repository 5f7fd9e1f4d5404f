use anyhow::Result;
use todolist_core::error::CoreError;
use todolist_core::models::UpdateTaskData;
use todolist_core::repository::Repository;
use todolist_core::service::TaskService;

use crate::cli::EditCommand;
use crate::parser::parse_due_date;

pub async fn edit_task(service: &TaskService<impl Repository>, command: EditCommand) -> Result<()> {
    let description = if command.description_clear {
        Some(None)
    } else {
        command.description.map(Some)
    };

    let due_date = if command.due_clear {
        Some(None)
    } else if let Some(due_str) = command.due {
        Some(Some(parse_due_date(&due_str)?))
    } else {
        None
    };

    let category_name = if command.category_clear {
        Some(None)
    } else {
        command.category.map(Some)
    };

    let update_data = UpdateTaskData {
        title: command.title,
        description,
        priority: command.priority,
        due_date,
        category_name,
        ..Default::default()
    };

    let task = service
        .update_task(command.id, update_data)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Task with ID {} not found", command.id)))?;

    println!("Updated task #{}: '{}'", task.id, task.title);
    Ok(())
}
