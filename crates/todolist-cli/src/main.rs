use clap::Parser;
use owo_colors::{OwoColorize, Style};
use std::sync::Arc;
use std::time::Duration;
use todolist_core::db;
use todolist_core::error::CoreError;
use todolist_core::repository::SqliteRepository;
use todolist_core::service::TaskService;

mod cli;
mod commands;
mod config;
mod parser;
mod views;

#[tokio::main]
async fn main() {
    let config = config::Config::new().unwrap_or_default();

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = Arc::new(SqliteRepository::new(db_pool));
    let service = TaskService::new(Arc::clone(&repository));

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&service, command).await,
        cli::Commands::List(command) => commands::list::list_tasks(&service, command).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&service, command).await,
        cli::Commands::Done(command) => commands::done::done_task(&service, command).await,
        cli::Commands::Delete(command) => commands::delete::delete_task(&service, command).await,
        cli::Commands::Stats => commands::stats::show_stats(&service).await,
        cli::Commands::Category(command) => {
            commands::category::category_command(&service, command).await
        }
        cli::Commands::Autoclose(command) => {
            let interval = Duration::from_secs(config.scheduler.interval_minutes * 60);
            commands::autoclose::autoclose(repository, interval, command).await
        }
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::Validation(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
