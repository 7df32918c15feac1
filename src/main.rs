use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use restaurant_picker::catalog::{source_from_location, Catalog};
use restaurant_picker::config::Config;
use restaurant_picker::logging;
use restaurant_picker::presentation::{
    render_cuisine_options, render_listing, render_restaurant, InteractiveSession,
};
use restaurant_picker::{FilterKey, PickerSession, PolicyKind};

#[derive(Parser)]
#[command(name = "restaurant_picker")]
#[command(about = "Pick a restaurant at random, by cuisine, without repeats")]
#[command(version = "0.1.0")]
struct Cli {
    /// Restaurant list to use: a JSON file path or an http(s) URL
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Config file (defaults to $PICKER_CONFIG, then picker.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick one or more restaurants
    Pick {
        /// Cuisine to pick from, or "all"
        #[arg(long, default_value = "all")]
        cuisine: String,
        /// Number of consecutive picks
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Selection policy. Available: cycle, exclude-last
        #[arg(long)]
        policy: Option<String>,
        /// Fixed seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the available cuisines
    Cuisines,
    /// Pick a cuisine at random
    RandomCuisine {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List every restaurant grouped by cuisine
    List,
    /// Pick interactively, one command per line
    Interactive {
        #[arg(long)]
        policy: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn resolve_policy(flag: Option<String>, config: &Config) -> anyhow::Result<PolicyKind> {
    match flag {
        Some(name) => Ok(name.parse()?),
        None => Ok(config.policy),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _guard = logging::init_logging(config.log_dir.as_deref());

    let location = cli.catalog.unwrap_or_else(|| config.catalog.clone());
    let source = source_from_location(&location);
    let catalog = match Catalog::load(source.as_ref()).await {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Error loading restaurants: {}", e);
            eprintln!("❌ Error loading restaurant data. Please check {}.", location);
            return Err(e.into());
        }
    };

    match cli.command {
        Commands::Pick {
            cuisine,
            count,
            policy,
            seed,
        } => {
            let kind = resolve_policy(policy, &config)?;
            let mut session = PickerSession::new(catalog, kind, seed.or(config.seed));
            let filter = FilterKey::from(cuisine.as_str());

            for _ in 0..count {
                match session.pick(&filter) {
                    Ok(record) => println!("{}", render_restaurant(&record)),
                    Err(e) if !e.is_fatal() => {
                        warn!("{}", e);
                        println!("⚠️  {}", e);
                        break;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Commands::Cuisines => {
            print!("{}", render_cuisine_options(catalog.cuisines()));
        }
        Commands::RandomCuisine { seed } => {
            let mut session = PickerSession::new(catalog, config.policy, seed.or(config.seed));
            match session.pick_random_cuisine() {
                Ok(cuisine) => println!("🎲 {}", cuisine),
                Err(e) => println!("⚠️  {}", e),
            }
        }
        Commands::List => {
            print!("{}", render_listing(&catalog));
        }
        Commands::Interactive { policy, seed } => {
            let kind = resolve_policy(policy, &config)?;
            let session = PickerSession::new(catalog, kind, seed.or(config.seed));
            info!("Starting interactive picker with '{}' policy", kind);

            let mut ui = InteractiveSession::new(session).with_catalog_location(location);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            ui.run(stdin, &mut stdout).await?;
        }
    }
    Ok(())
}
