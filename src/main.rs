use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use bookshelf::shelf::{BookId, FileStorage};
use bookshelf::{App, Config, Session};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory the bookshelf is stored in
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book to a shelf
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        author: String,
        #[arg(short, long)]
        year: String,
        /// Put the book on the finished shelf
        #[arg(short, long)]
        complete: bool,
    },
    /// List both shelves
    List,
    /// Show books whose title contains the query
    Search {
        query: String,
    },
    /// Move a book to the other shelf
    Move {
        id: BookId,
    },
    /// Replace a book's title, author and year; omitted fields keep their value
    Edit {
        id: BookId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        author: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
    },
    /// Delete a book
    Delete {
        id: BookId,
        /// Skip the confirmation question
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    match cli.command {
        None => {
            // Launch TUI, logging to a file so the screen stays clean
            init_file_logging(&config)?;
            let mut app = App::open(config)?;
            app.run().await?;
        }
        Some(command) => {
            init_stderr_logging();
            run_command(command, &config)?;
        }
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "bookshelf=info".into())
}

fn init_file_logging(config: &Config) -> Result<()> {
    let path = config.log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {:?}", parent))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn run_command(command: Commands, config: &Config) -> Result<()> {
    let storage = FileStorage::new(config.data_dir()?);
    let mut session = Session::open(storage, config.storage_key.clone())?;

    match command {
        Commands::Add { title, author, year, complete } => {
            let id = session.add(&title, &author, &year, complete)?;
            println!("Added [{id}] {}", title.trim());
        }
        Commands::List => {}
        Commands::Search { query } => {
            let count = session.search(&query)?;
            println!("{count} matching \"{query}\"");
        }
        Commands::Move { id } => {
            session.toggle(id)?;
        }
        Commands::Edit { id, title, author, year } => {
            if let Some(book) = session.shelf().get(id).cloned() {
                session.edit(
                    id,
                    title.as_deref().unwrap_or(&book.title),
                    author.as_deref().unwrap_or(&book.author),
                    year.as_deref().unwrap_or(&book.year.to_string()),
                )?;
            }
        }
        Commands::Delete { id, yes } => {
            if let Some(book) = session.shelf().get(id).cloned() {
                if yes || confirm_delete(&book.title)? {
                    session.delete(id)?;
                } else {
                    session.refresh()?;
                }
            }
        }
    }

    print!("{}", session.view());
    Ok(())
}

/// Ask on stdin before deleting a book
fn confirm_delete(title: &str) -> Result<bool> {
    print!("Are you sure you want to delete this book? \"{title}\" [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
