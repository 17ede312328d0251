//! Offline maintenance for the shortener's persistent store.
//!
//! Run while the server is stopped; changes are picked up at the next start.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use url_shortener::observability::logging;
use url_shortener::routing::{load_records, PathTable};
use url_shortener::store::{seed_entries, PathStore, DEFAULT_BUCKET};

#[derive(Parser)]
#[command(name = "shortener-admin")]
#[command(about = "Inspect and edit the URL shortener store", long_about = None)]
struct Cli {
    /// Embedded store directory.
    #[arg(long, default_value = "url_shortener.db")]
    db: PathBuf,

    #[arg(long, default_value = DEFAULT_BUCKET)]
    bucket: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every stored mapping
    List,
    /// Add or replace a mapping
    Put { path: String, url: String },
    /// Delete a mapping
    Remove { path: String },
    /// Parse a paths file and print the resulting table
    Check { file: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init("warn");

    match cli.command {
        Commands::List => {
            let store = open_seeded(&cli.db, &cli.bucket)?;
            for record in store.entries()? {
                println!("{}\t{}", record.path, record.url);
            }
        }
        Commands::Put { path, url } => {
            let store = open_seeded(&cli.db, &cli.bucket)?;
            match store.put(&path, &url)? {
                Some(previous) => println!("{}: {} -> {}", path, previous, url),
                None => println!("{}: {}", path, url),
            }
        }
        Commands::Remove { path } => {
            let store = open_seeded(&cli.db, &cli.bucket)?;
            match store.remove(&path)? {
                Some(previous) => println!("removed {} ({})", path, previous),
                None => eprintln!("{} not present in bucket {}", path, store.bucket_name()),
            }
        }
        Commands::Check { file } => {
            let table = PathTable::from_records(load_records(&file)?);
            for (path, url) in table.iter_sorted() {
                println!("{}\t{}", path, url);
            }
            println!("{} paths OK", table.len());
        }
    }

    Ok(())
}

/// Open the store the same way the server does, seeding a fresh bucket.
fn open_seeded(db: &Path, bucket: &str) -> Result<PathStore, Box<dyn std::error::Error>> {
    let store = PathStore::open(db, bucket)?;
    store.ensure_seeded(&seed_entries())?;
    Ok(store)
}
