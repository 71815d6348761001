// src/cli.rs

//! CLI argument parsing using `clap`.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::store::TaskId;

/// Command-line arguments for `taskdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskdag",
    version,
    about = "Manage tasks with dependencies and visualize the critical chain.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task store file (TOML).
    ///
    /// Default: `tasks.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "tasks.toml")]
    pub file: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a new task with a title and a due date.
    Add {
        title: String,

        /// Due date, e.g. `2026-09-01`.
        #[arg(long, value_name = "YYYY-MM-DD")]
        due: NaiveDate,
    },

    /// List all tasks, newest first.
    List,

    /// Delete a task and strip it from every other task's dependencies.
    Remove { id: TaskId },

    /// Toggle a dependency edge: `taskdag dep 3 1` makes task 3 depend on
    /// task 1, or removes that dependency if it already exists.
    Dep { id: TaskId, dep_id: TaskId },

    /// Print the topological order and per-task earliest start; with
    /// `--target`, highlight the critical path ending at that task.
    Schedule {
        #[arg(long, value_name = "ID")]
        target: Option<TaskId>,
    },

    /// Print the dependency chain for a task, prerequisites first, together
    /// with the earliest date the task could reasonably start.
    Chain { id: TaskId },

    /// Validate the store file: unknown references, self-dependencies,
    /// cycles.
    Check,

    /// Look up an illustrative image URL for every task title.
    ///
    /// Requires `TASKDAG_PEXELS_KEY` to be set.
    Images {
        /// Maximum number of concurrent lookups.
        #[arg(long, value_name = "N", default_value_t = 4)]
        limit: usize,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
