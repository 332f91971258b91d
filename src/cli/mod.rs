//! CLI module for category-selector.
//!
//! Subcommands:
//! - `choices`: Print the indented category choice list
//! - `resolve`: Resolve submitted values to categories
//! - `contexts`: List taxonomy contexts

mod choices;
mod resolve;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::Result;

use crate::config::Config;
use crate::context::AppContext;
use crate::error::AppError;
use crate::models::{CategoryId, Context};
use crate::repositories::CategoryRepository;
use crate::services::CategorySelectorChoiceLoader;

pub use choices::ChoicesCommand;
pub use resolve::ResolveCommand;

/// category-selector - hierarchical category choice lists
#[derive(Parser)]
#[command(name = "category-selector")]
#[command(about = "Hierarchical category choice lists for form widgets")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Taxonomy document (overrides `taxonomy.path` from config)
    #[arg(long, global = true)]
    pub taxonomy: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the choice list for a context and current category
    Choices(ChoicesCommand),

    /// Resolve submitted values to category ids
    Resolve(ResolveCommand),

    /// List taxonomy contexts
    Contexts,
}

/// Output format for listings.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options shared by commands that build a choice loader.
#[derive(Args, Debug)]
pub struct SelectorArgs {
    /// Context id; defaults to `selector.context`, else every context
    #[arg(long)]
    pub context: Option<String>,

    /// Current category id, excluded together with its subtree
    #[arg(long)]
    pub category: Option<String>,
}

impl SelectorArgs {
    /// Build a loader for these options from the application context.
    pub fn loader(&self, ctx: &AppContext) -> Result<CategorySelectorChoiceLoader, AppError> {
        let context = self
            .context
            .as_deref()
            .or(ctx.config.selector.context.as_deref())
            .map(|id| {
                ctx.repository
                    .find_context(id)
                    .cloned()
                    .unwrap_or_else(|| Context::new(id))
            });

        let category = self
            .category
            .as_deref()
            .map(|id| ctx.repository.find_by_id(&CategoryId::from(id)))
            .transpose()?;
        if category.is_none() {
            tracing::warn!("No --category given, the choice list will be empty");
        }

        Ok(ctx
            .resolve::<CategorySelectorChoiceLoader>()
            .with_context(context)
            .with_category(category))
    }
}

impl App {
    /// Run the CLI application.
    pub fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        if let Some(path) = self.taxonomy {
            config.taxonomy.path = path;
        }
        let ctx = AppContext::load(config)?;

        match self.command {
            Command::Choices(cmd) => cmd.run(&ctx),
            Command::Resolve(cmd) => cmd.run(&ctx),
            Command::Contexts => run_contexts(&ctx),
        }
    }
}

fn run_contexts(ctx: &AppContext) -> Result<()> {
    println!("{}", render_contexts(&ctx.repository));
    Ok(())
}

/// One `id\tname\tN root(s)` line per context, in declaration order.
fn render_contexts(repository: &CategoryRepository) -> String {
    repository
        .list_contexts()
        .iter()
        .map(|context| {
            let roots = repository.roots_for_context(context).count();
            format!("{}\t{}\t{} root(s)", context.id, context.name, roots)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
