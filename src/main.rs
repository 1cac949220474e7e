//! todo CLI - a simple task manager backed by a JSON file.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use todo_cli::{FileStore, Filter, Priority, Status, Task, TaskPatch, TaskStore};

mod cli;

use cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("todo")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("todo.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn open_store(cli: &Cli) -> Result<FileStore> {
    match &cli.file {
        Some(path) => FileStore::open(path.clone()),
        None => FileStore::open_default(),
    }
    .context("Failed to open task store")
}

fn format_status(status: Status) -> ColoredString {
    match status {
        Status::Pending => "pending".yellow(),
        Status::Completed => "completed".green(),
    }
}

fn format_priority(priority: Option<Priority>) -> ColoredString {
    match priority {
        Some(Priority::High) => "high".red(),
        Some(Priority::Medium) => "medium".yellow(),
        Some(Priority::Low) => "low".green(),
        None => "N/A".dimmed(),
    }
}

fn print_task(task: &Task) {
    println!("{}: {}", "ID".bold(), task.id.cyan());
    println!("  {}: {}", "Title".bold(), task.title);
    println!(
        "  {}: {}",
        "Description".bold(),
        task.description.as_deref().unwrap_or("N/A")
    );
    println!("  {}: {}", "Status".bold(), format_status(task.status));
    println!("  {}: {}", "Priority".bold(), format_priority(task.priority));
    let tags = if task.tags.is_empty() {
        "N/A".to_string()
    } else {
        task.tags.join(", ")
    };
    println!("  {}: {}", "Tags".bold(), tags);
    println!(
        "  {}: {}",
        "Created At".bold(),
        task.created_at.format("%Y-%m-%dT%H:%M:%SZ")
    );
    println!(
        "  {}: {}",
        "Modified At".bold(),
        task.modified_at
            .map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!(
        "  {}: {}",
        "Due Date".bold(),
        task.due_date.as_deref().unwrap_or("N/A")
    );
}

fn print_tasks(tasks: &[Task], json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")?
        );
        return Ok(());
    }

    if tasks.is_empty() {
        println!("{}", "No tasks found".dimmed());
        return Ok(());
    }
    for task in tasks {
        print_task(task);
        println!("{}", "-".repeat(20).dimmed());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Add {
            title,
            description,
            priority,
            tags,
            due,
        } => {
            let mut store = open_store(&cli)?;
            let priority: Priority = priority.parse()?;

            let mut task = Task::new(title.clone());
            task.description = description.clone();
            task.priority = Some(priority);
            task.tags = tags.clone().unwrap_or_default();
            task.due_date = due.clone();
            let id = task.id.clone();

            store.add(task).context("Failed to add task")?;
            println!("{} Task '{}' added with ID: {}", "✓".green(), title, id.cyan());
        }

        Command::Get { id, json } => {
            let store = open_store(&cli)?;
            let task = store.get(id).context("Failed to get task")?;
            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(task).context("Failed to serialize task")?
                );
            } else {
                print_task(task);
            }
        }

        Command::List { json } => {
            let store = open_store(&cli)?;
            print_tasks(&store.list(), *json)?;
        }

        Command::Search {
            query,
            status,
            priority,
            tags,
            json,
        } => {
            let store = open_store(&cli)?;
            let mut filter = Filter::new();
            if let Some(q) = query {
                filter = filter.query(q.clone());
            }
            if let Some(s) = status {
                filter = filter.status(s.parse::<Status>()?);
            }
            if let Some(p) = priority {
                filter = filter.priority(p.parse::<Priority>()?);
            }
            if let Some(tags) = tags {
                filter = filter.tags(tags.clone());
            }
            print_tasks(&store.search(&filter), *json)?;
        }

        Command::Update {
            id,
            title,
            description,
            status,
            priority,
            tags,
            due,
        } => {
            let mut store = open_store(&cli)?;
            let mut patch = TaskPatch::new();
            if let Some(title) = title {
                patch = patch.title(title.clone());
            }
            if let Some(description) = description {
                patch = patch.description(description.clone());
            }
            if let Some(status) = status {
                patch = patch.status(status.parse::<Status>()?);
            }
            if let Some(priority) = priority {
                patch = patch.priority(priority.parse::<Priority>()?);
            }
            if let Some(tags) = tags {
                patch = patch.tags(tags.clone());
            }
            if let Some(due) = due {
                patch = patch.due_date(due.clone());
            }

            let task = store.update(id, patch).context("Failed to update task")?;
            println!("{} Task '{}' updated", "✓".green(), task.id.cyan());
        }

        Command::Complete { id } => {
            let mut store = open_store(&cli)?;
            let task = store
                .update(id, TaskPatch::new().status(Status::Completed))
                .context("Failed to complete task")?;
            println!("{} Task '{}' marked as completed", "✓".green(), task.id.cyan());
        }

        Command::Delete { id } => {
            let mut store = open_store(&cli)?;
            store.delete(id).context("Failed to delete task")?;
            println!("{} Task '{}' deleted", "✓".green(), id.cyan());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
