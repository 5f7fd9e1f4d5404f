use chrono::{DateTime, Utc};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use todolist_core::models::{CategorySummary, TaskPriority, TaskStatistics, TaskWithCategory};

pub fn display_tasks(tasks: &[TaskWithCategory]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let now = Utc::now();
    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Status", "Priority", "Due Date", "Category"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));

        let mut title_cell = Cell::new(&task.title);
        if task.is_completed {
            title_cell = title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        } else {
            title_cell = match task.priority {
                TaskPriority::High => title_cell.fg(Color::Red).add_attribute(Attribute::Bold),
                TaskPriority::Medium => title_cell.fg(Color::Yellow),
                TaskPriority::Low => title_cell.fg(Color::Green),
            };
        }
        row.add_cell(title_cell);

        let status_cell = if task.is_completed {
            Cell::new("Done").fg(Color::Green)
        } else if task.is_overdue(now) {
            Cell::new("Overdue").fg(Color::Red)
        } else {
            Cell::new("Pending")
        };
        row.add_cell(status_cell);

        row.add_cell(Cell::new(task.priority.to_string()));
        row.add_cell(due_date_cell(task.due_date, task.is_completed, now));
        row.add_cell(Cell::new(task.category_name.as_deref().unwrap_or("None")));
        table.add_row(row);
    }

    println!("{table}");
}

fn due_date_cell(due_date: Option<DateTime<Utc>>, is_completed: bool, now: DateTime<Utc>) -> Cell {
    let Some(due_at) = due_date else {
        return Cell::new("None");
    };

    let due_text = due_at.humanize();
    if is_completed {
        Cell::new(due_text)
    } else if due_at < now {
        Cell::new(due_text).fg(Color::Red)
    } else if due_at.date_naive() == now.date_naive() {
        Cell::new(due_text).fg(Color::Yellow)
    } else {
        Cell::new(due_text)
    }
}

pub fn display_categories(categories: &[CategorySummary]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Description", "Tasks"]);

    for category in categories {
        let mut row = Row::new();
        row.add_cell(Cell::new(category.id));
        row.add_cell(Cell::new(&category.name));
        row.add_cell(Cell::new(category.description.as_deref().unwrap_or("None")));
        row.add_cell(Cell::new(category.task_count));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_statistics(stats: &TaskStatistics) {
    let mut table = Table::new();
    table.set_header(vec!["Total", "Completed", "Pending", "Overdue"]);

    let mut row = Row::new();
    row.add_cell(Cell::new(stats.total));
    row.add_cell(Cell::new(stats.completed).fg(Color::Green));
    row.add_cell(Cell::new(stats.pending).fg(Color::Yellow));
    row.add_cell(if stats.overdue > 0 {
        Cell::new(stats.overdue).fg(Color::Red)
    } else {
        Cell::new(stats.overdue)
    });
    table.add_row(row);

    println!("{table}");
}
