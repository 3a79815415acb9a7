use anyhow::Result;
use clap::{Parser, Subcommand};

/// freshkeep - Household fresh-food tracking
#[derive(Parser)]
#[command(name = "freshkeep")]
#[command(about = "Food inventory, expiry tracking and recipe recommendations", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Path to the JSON inventory snapshot backing this run
    #[arg(long, global = true, default_value = "freshkeep.json")]
    snapshot: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stock counters and the expiry summary
    Status,
    /// List recent additions and take-outs
    Recent {
        /// Show the whole window instead of the first rows
        #[arg(long)]
        all: bool,
    },
    /// Item counts per category bucket
    Categories,
    /// List the items in one category bucket
    Category {
        /// Bucket id (1-10)
        id: u8,
    },
    /// Recipes that use an ingredient
    Recipes { ingredient: String },
    /// Search items by keyword
    Search {
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Item name completions for a prefix
    Suggest {
        prefix: String,

        /// Maximum number of completions
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Ask the assistant what to cook from the current inventory
    Recommend {
        /// Free-form question forwarded to the assistant
        #[arg(long)]
        question: Option<String>,

        /// JSON file holding prior conversation turns
        #[arg(long)]
        history_file: Option<String>,
    },
    /// Monthly statistics report
    Report,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = freshkeep::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    freshkeep::observability::init_observability(
        "freshkeep",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let output = match cli.command {
        Commands::Status => freshkeep::cli::status(&config, &cli.snapshot)?,
        Commands::Recent { all } => freshkeep::cli::recent(&config, &cli.snapshot, all)?,
        Commands::Categories => freshkeep::cli::categories(&config, &cli.snapshot)?,
        Commands::Category { id } => freshkeep::cli::category(&config, &cli.snapshot, id)?,
        Commands::Recipes { ingredient } => freshkeep::cli::recipes(&ingredient)?,
        Commands::Search { query, limit } => {
            freshkeep::cli::search(&cli.snapshot, &query, limit).await?
        }
        Commands::Suggest { prefix, limit } => {
            freshkeep::cli::suggest(&cli.snapshot, &prefix, limit).await?
        }
        Commands::Recommend {
            question,
            history_file,
        } => freshkeep::cli::recommend(&config, &cli.snapshot, question, history_file).await?,
        Commands::Report => freshkeep::cli::report(&cli.snapshot)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
