use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::Result;
use std::path::PathBuf;
use tasklist::{Config, FileStorage, TaskStore};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Tasklist CLI - record, search, and page through tasks")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Directory holding the task snapshot (default: platform data dir)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Who the task is for
        name: String,
        /// What needs doing
        task: String,
    },

    /// List tasks, optionally filtered and paged
    List {
        /// Case-insensitive search over names and task text
        #[arg(short, long, default_value = "")]
        search: String,

        /// 1-indexed page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Toggle a task's completion flag
    Toggle { id: u32 },

    /// Edit a task's name and/or text
    Edit {
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        task: Option<String>,
    },

    /// Delete a task
    Delete { id: u32 },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    // Open the store over its snapshot file
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir());
    let storage = FileStorage::open(&data_dir)?;
    let mut store = TaskStore::open(storage)?;

    match cli.command {
        Commands::Add { name, task } => match store.add(&name, &task) {
            Ok(created) => println!("Added task {}: {}", created.id, created.text),
            Err(err) => {
                eprintln!("{}", err.to_string().red());
                std::process::exit(1);
            }
        },
        Commands::List { search, page } => {
            store.set_search_term(&search);
            store.set_page(page);

            let result = store.query(config.page_size);
            if result.tasks.is_empty() {
                println!("No tasks on page {} ({} matching)", page, result.total_filtered);
            } else {
                for task in &result.tasks {
                    let status = if task.completed {
                        "Completed".green()
                    } else {
                        "Pending".yellow()
                    };
                    println!("{:>4}  {:<16} {:<40} {}", task.id, task.name, task.text, status);
                }
                println!(
                    "Page {} of {} ({} matching)",
                    page,
                    result.page_count(config.page_size),
                    result.total_filtered
                );
            }
        }
        Commands::Toggle { id } => {
            if store.tasks().iter().any(|t| t.id == id) {
                store.toggle_complete(id);
                println!("Toggled task {}", id);
            } else {
                eprintln!("{}", format!("No task with id {}", id).red());
            }
        }
        Commands::Edit { id, name, task } => {
            store.begin_edit(id);
            if store.editing_id().is_none() {
                eprintln!("{}", format!("No task with id {}", id).red());
            } else {
                if let Some(name) = name {
                    store.set_draft_name(&name);
                }
                if let Some(task) = task {
                    store.set_draft_text(&task);
                }
                store.commit_edit();
                println!("Updated task {}", id);
            }
        }
        Commands::Delete { id } => {
            store.delete(id);
            println!("Deleted task {}", id);
        }
    }

    Ok(())
}
