//! `blog` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the article store.
//! - Dispatch exactly one boundary call and print its JSON body.
//!
//! # Invariants
//! - Exit status is non-zero for every non-2xx response.
//! - The store connection lives for one invocation only.

mod config;

use anyhow::{Context, Result};
use blog_api::{ApiResponse, BlogApi};
use blog_core::db::open_db;
use blog_core::{
    init_logging, ArticleDraft, ArticleRepository, ArticleService, CommentDraft,
    SqliteArticleRepository,
};
use clap::{Parser, Subcommand};
use config::Config;
use log::info;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "blog", version, about = "Minimal blog backend over a SQLite article store")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overrides config and environment.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an article.
    Create {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    /// Add a comment to an article.
    Comment {
        id: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Like an article.
    Like { id: String },
    /// List all articles, newest first.
    List,
    /// Search title, content and author.
    Search { query: Option<String> },
    /// Print the welcome message.
    Welcome,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref(), cli.db)?;
    init_logging(&config.log_level, &config.log_dir.to_string_lossy())
        .context("failed to initialize logging")?;

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create database directory `{}`", parent.display())
        })?;
    }
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let api = BlogApi::new(ArticleService::new(SqliteArticleRepository::new(&conn)));

    let response = dispatch(&api, cli.command);
    info!(
        "event=cli_command module=cli status={} code={}",
        if response.status.is_success() { "ok" } else { "error" },
        response.status.code()
    );
    print_body(&response.body)?;

    if response.status.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn dispatch<R: ArticleRepository>(api: &BlogApi<R>, command: Command) -> ApiResponse {
    match command {
        Command::Create {
            title,
            content,
            author,
        } => api.create_article(&ArticleDraft {
            title,
            content,
            author,
        }),
        Command::Comment {
            id,
            author,
            content,
        } => api.add_comment(&id, &CommentDraft { author, content }),
        Command::Like { id } => api.like_article(&id),
        Command::List => api.list_articles(),
        Command::Search { query } => api.search_articles(query.as_deref()),
        Command::Welcome => api.welcome(),
    }
}

fn print_body(body: &Value) -> Result<()> {
    match body {
        Value::String(text) => println!("{text}"),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}
