use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use souk::taxonomy::{marketplace, CategoryPath, SelectCategoryError, TaxonomyStore};

/// Browse a classifieds category taxonomy the way the ad placement flow does.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// A `.toml` or `.json` taxonomy definition to use instead of the
    /// built-in marketplace taxonomy.
    #[arg(long, global = true)]
    definition: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the top-level categories.
    Roots,

    /// List the subcategories of a category.
    Children { path: CategoryPath },

    /// Check whether a listing can be placed in a category.
    Check { path: CategoryPath },

    /// Print the breadcrumb for a category.
    Breadcrumb { path: CategoryPath },

    /// List every category that accepts listings.
    Leaves,

    /// Find every category with the given key.
    Find { key: String },

    /// Print the whole taxonomy.
    Tree,

    /// Load the taxonomy and report whether it is well-formed.
    Validate,
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let args = Args::parse();

    let owned;
    let taxonomy = match &args.definition {
        Some(path) => {
            log::debug!("using taxonomy definition {path:?} instead of the built-in taxonomy");
            owned = TaxonomyStore::from_path(path)
                .with_context(|| format!("failed to load taxonomy from {path:?}"))?;
            &owned
        }
        None => marketplace(),
    };

    match args.command {
        Command::Roots => {
            for (key, node) in taxonomy.roots() {
                println!("{key}\t{}", node.name());
            }
        }
        Command::Children { path } => {
            for (key, node) in taxonomy.list_children(&path)? {
                let marker = if node.is_leaf() { "" } else { " >" };
                println!("{}\t{}{marker}", path.child(key), node.name());
            }
        }
        Command::Check { path } => match taxonomy.select(&path) {
            Ok(node) => println!("{path}: listings can be placed in '{}'", node.name()),
            Err(err @ SelectCategoryError::NotSelectable { .. }) => {
                eprintln!("{err}");
                return Ok(ExitCode::FAILURE);
            }
            Err(err) => return Err(err.into()),
        },
        Command::Breadcrumb { path } => {
            println!("{}", taxonomy.breadcrumb(&path)?);
        }
        Command::Leaves => {
            for (path, node) in taxonomy.leaves() {
                println!("{path}\t{}", node.name());
            }
        }
        Command::Find { key } => {
            let paths = taxonomy.find_by_key(&key);
            if paths.is_empty() {
                eprintln!("no category has the key '{key}'");
                return Ok(ExitCode::FAILURE);
            }

            for path in paths {
                println!("{path}\t{}", taxonomy.breadcrumb(&path)?);
            }
        }
        Command::Tree => print!("{}", taxonomy.outline()),
        Command::Validate => {
            println!(
                "taxonomy is well-formed: {} root categories, {} categories, {} selectable, depth {}",
                taxonomy.roots().count(),
                taxonomy.len(),
                taxonomy.leaves().len(),
                taxonomy.max_depth()
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
