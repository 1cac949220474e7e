//! CLI argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "todo",
    about = "A simple task manager with JSON file persistence",
    version,
    after_help = "Tasks are stored in: ~/.todo_cli/tasks.json"
)]
pub struct Cli {
    /// Path to the task file (default: ~/.todo_cli/tasks.json)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Priority (high, medium, low)
        #[arg(short, long, default_value = "medium")]
        priority: String,

        /// Tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Due date (ISO 8601, stored as-is)
        #[arg(long)]
        due: Option<String>,
    },

    /// Show a task by ID
    Get {
        /// Task ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search tasks by text and filters
    Search {
        /// Text matched against title and description
        #[arg(short, long)]
        query: Option<String>,

        /// Filter by status (pending, completed)
        #[arg(short, long)]
        status: Option<String>,

        /// Filter by priority (high, medium, low)
        #[arg(short, long)]
        priority: Option<String>,

        /// Filter by tags (comma-separated, any-of)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update fields on an existing task
    Update {
        /// Task ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New status (pending, completed)
        #[arg(short, long)]
        status: Option<String>,

        /// New priority (high, medium, low)
        #[arg(short, long)]
        priority: Option<String>,

        /// New tags (comma-separated, replaces the old list)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// New due date
        #[arg(long)]
        due: Option<String>,
    },

    /// Mark a task as completed
    Complete {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}
