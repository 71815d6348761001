// src/lib.rs

pub mod cli;
pub mod errors;
pub mod graph;
pub mod images;
pub mod logging;
pub mod store;

use chrono::Utc;
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::errors::{Result, TaskdagError};
use crate::graph::{Chain, Schedule, compute_schedule, extract_chain, toggle_dependency};
use crate::images::ImageClient;
use crate::store::{Task, TaskId, TaskStore};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - store loading (TOML file, validated)
/// - the graph engine (toggle validation, schedule, chain)
/// - presentation on stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let mut store = TaskStore::open(&args.file)?;

    match args.command {
        Command::Add { title, due } => {
            let id = store.create(&title, due)?;
            store.save()?;
            println!("created task {id}: {}", title.trim());
        }

        Command::List => print_task_list(store.tasks()),

        Command::Remove { id } => {
            let removed = store.remove(id)?;
            store.save()?;
            println!("removed task {}: {}", removed.id, removed.title);
        }

        Command::Dep { id, dep_id } => {
            let deps = toggle_dependency(store.tasks(), id, dep_id)?;
            let added = deps.contains(&dep_id);
            store.set_dependencies(id, deps)?;
            store.save()?;
            if added {
                println!("task {id} now depends on task {dep_id}");
            } else {
                println!("task {id} no longer depends on task {dep_id}");
            }
        }

        Command::Schedule { target } => match compute_schedule(store.tasks(), target) {
            Ok(schedule) => print_schedule(store.tasks(), &schedule, target),
            Err(TaskdagError::GraphInvalid(msg)) => {
                println!("cannot compute schedule, cycle present: {msg}");
            }
            Err(err) => return Err(err),
        },

        Command::Chain { id } => {
            let chain = extract_chain(store.tasks(), id)?;
            print_chain(store.tasks(), &chain, id);
        }

        Command::Check => check_store(&store)?,

        Command::Images { limit } => {
            let client = ImageClient::from_env()?;
            info!(tasks = store.tasks().len(), limit, "starting image lookups");
            let results = client.lookup_all(store.tasks(), limit).await;
            for (id, url) in results {
                match url {
                    Some(url) => println!("[{id}] {}: {url}", title_of(store.tasks(), id)),
                    None => println!("[{id}] {}: (no image found)", title_of(store.tasks(), id)),
                }
            }
        }
    }

    Ok(())
}

fn title_of(tasks: &[Task], id: TaskId) -> &str {
    tasks
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.title.as_str())
        .unwrap_or("?")
}

/// Task listing, newest first (creation order, like the store's read model).
fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }

    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let today = Utc::now().date_naive();
    println!("tasks ({}):", sorted.len());
    for task in sorted {
        let overdue = if task.due < today { "  OVERDUE" } else { "" };
        print!("  [{}] {} (due {}){overdue}", task.id, task.title, task.due);
        if task.depends_on.is_empty() {
            println!();
        } else {
            let deps: Vec<String> = task.depends_on.iter().map(|d| d.to_string()).collect();
            println!("  depends on: {}", deps.join(", "));
        }
    }
}

fn print_schedule(tasks: &[Task], schedule: &Schedule, target: Option<TaskId>) {
    println!("schedule ({} tasks, topological order):", schedule.order.len());
    for id in &schedule.order {
        let start = match schedule.earliest_start.get(id) {
            Some(Some(hops)) => hops.to_string(),
            _ => "-".to_string(),
        };
        let marker = if schedule.critical_nodes.contains(id) {
            "  *"
        } else {
            ""
        };
        println!(
            "  [{id}] {} (earliest start: hop {start}){marker}",
            title_of(tasks, *id)
        );
    }

    if let Some(target) = target {
        if schedule.critical_nodes.is_empty() {
            println!("task {target} is unreachable from any prerequisite-free task");
        } else {
            let mut path: Vec<TaskId> = vec![target];
            let mut current = target;
            while let Some(&pred) = schedule.predecessor.get(&current) {
                path.push(pred);
                current = pred;
            }
            path.reverse();
            let rendered: Vec<String> = path.iter().map(|id| id.to_string()).collect();
            println!("critical path to {target}: {}", rendered.join(" -> "));
        }
    }
}

fn print_chain(tasks: &[Task], chain: &Chain, root: TaskId) {
    println!("dependency chain for task {root} (prerequisites first):");
    for id in &chain.chain {
        println!("  [{id}] {} (due {})", title_of(tasks, *id), due_of(tasks, *id));
    }
    println!("earliest reasonable start: {}", chain.scheduling_bound);
}

fn due_of(tasks: &[Task], id: TaskId) -> String {
    tasks
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.due.to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Store-file diagnostics for `taskdag check`.
fn check_store(store: &TaskStore) -> Result<()> {
    let dangling = store::validate::dangling_references(store.tasks());
    for (task, dep) in &dangling {
        println!("warning: task {task} depends on missing task {dep}");
    }

    store::validate::ensure_acyclic(store.tasks())?;

    if dangling.is_empty() {
        println!(
            "ok: {} tasks, dependency graph is acyclic",
            store.tasks().len()
        );
    } else {
        println!(
            "ok with warnings: {} tasks, {} dangling reference(s), dependency graph is acyclic",
            store.tasks().len(),
            dangling.len()
        );
    }

    Ok(())
}
