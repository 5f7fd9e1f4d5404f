use anyhow::Result;
use owo_colors::OwoColorize;
use todolist_core::models::NewTaskData;
use todolist_core::repository::Repository;
use todolist_core::service::TaskService;

use crate::cli::AddCommand;
use crate::parser::parse_due_date;

pub async fn add_task(service: &TaskService<impl Repository>, command: AddCommand) -> Result<()> {
    let due_date = command.due.as_deref().map(parse_due_date).transpose()?;

    let task = service
        .create_task(NewTaskData {
            title: command.title,
            description: command.description,
            priority: command.priority,
            due_date,
            category_name: command.category,
            ..Default::default()
        })
        .await?;

    println!(
        "{} task #{}: '{}'",
        "Added".green().bold(),
        task.id,
        task.title
    );
    if let Some(due_at) = task.due_date {
        println!("Due {}", due_at.to_rfc2822());
    }

    Ok(())
}
