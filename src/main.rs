use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tox::cli::{Action, Cli};
use tox::{Config, Store, display};
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    // Reject bad arguments before the database is opened
    let action = cli.command.into_action()?;

    let db_path = config.db_path();
    let mut store = Store::open_with_timeout(&db_path, config.busy_timeout())
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    match action {
        Action::Add(description) => {
            let id = store.create(&description)?;
            println!("{} #{}: {}", "Added task".green(), id, description);
        }
        Action::List { all, json } => {
            let tasks = store.list(all)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print!("{}", display::render_table(&tasks, Utc::now()));
            }
        }
        Action::Done(id) => {
            store.complete(id)?;
            println!("{} #{} as done", "Marked todo".green(), id);
        }
        Action::Delete(id) => {
            store.delete(id)?;
            println!("{} #{}", "Deleted todo".green(), id);
        }
        Action::Reindex => {
            store.reindex_all()?;
            println!("{}", "Successfully reindexed all todos".green());
        }
    }

    Ok(())
}
