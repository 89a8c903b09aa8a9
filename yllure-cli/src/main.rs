// yllure-cli/src/main.rs
// Yllure 命令行前端: 浏览目录、管理心愿单、会话

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shared::{Dress, DressFilters, Size};
use std::path::PathBuf;
use std::sync::Arc;
use yllure_client::logger::init_logger_with_file;
use yllure_client::{AppContext, ClientConfig, FileStore};

#[derive(Debug, Parser)]
#[command(name = "yllure", version, about = "Browse and save dresses from the Yllure catalog")]
struct Cli {
    /// Directory holding the persisted session, wishlist and photo
    #[arg(long, env = "YLLURE_DATA_DIR", default_value = ".yllure", global = true)]
    data_dir: PathBuf,

    #[arg(long, env = "YLLURE_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Write daily-rotated logs here instead of stderr
    #[arg(long, env = "YLLURE_LOG_DIR", global = true)]
    log_dir: Option<String>,

    /// Serve everything from the bundled mock catalog
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List dresses, optionally narrowed by filters
    Browse {
        #[arg(long)]
        size: Option<Size>,
        #[arg(long)]
        available: Option<bool>,
        #[arg(long)]
        min: Option<Decimal>,
        #[arg(long)]
        max: Option<Decimal>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Featured dresses that are available to rent
    Featured,
    /// Show a single dress
    Show { id: String },
    /// Search names and descriptions
    Search { query: String },
    #[command(subcommand)]
    Wishlist(WishlistCommand),
    Login {
        email: String,
        password: String,
    },
    Logout,
    /// Print the current user
    Whoami,
    #[command(subcommand)]
    Photo(PhotoCommand),
}

#[derive(Debug, Subcommand)]
enum WishlistCommand {
    List,
    Add { id: String },
    Remove { id: String },
    Clear,
}

#[derive(Debug, Subcommand)]
enum PhotoCommand {
    Show,
    Set { uri: String },
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logger_with_file(cli.log_level.as_deref(), cli.log_dir.as_deref());

    let mut config = ClientConfig::from_env();
    if cli.offline {
        config = config.with_force_mock(true);
    }
    tracing::debug!(base_url = %config.base_url, auth_mode = ?config.auth_mode, "Configuration loaded");

    std::fs::create_dir_all(&cli.data_dir)
        .with_context(|| format!("Failed to create data dir {}", cli.data_dir.display()))?;
    let storage = Arc::new(FileStore::new(cli.data_dir.clone()));
    let app = AppContext::new(config, storage).context("Failed to build client")?;
    app.restore().await;

    run(&app, cli.command).await
}

async fn run(app: &AppContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Browse {
            size,
            available,
            min,
            max,
            search,
        } => {
            let mut filters = DressFilters::new();
            filters.size = size;
            filters.available = available;
            filters.price_min = min;
            filters.price_max = max;
            filters.search = search;

            app.catalog.fetch_all().await;
            app.catalog.apply_filters(&filters);
            print_dresses(&app.catalog.filtered_items());
        }
        Command::Featured => {
            app.catalog.fetch_featured().await;
            print_dresses(&app.catalog.featured_items());
        }
        Command::Show { id } => {
            let Some(dress) = app.catalog.fetch_one(&id).await else {
                bail!("Dress not found: {}", id);
            };
            println!("{}", serde_json::to_string_pretty(&dress)?);
        }
        Command::Search { query } => {
            app.catalog.fetch_all().await;
            app.catalog.search(&query).await;
            print_dresses(&app.catalog.filtered_items());
        }
        Command::Wishlist(cmd) => run_wishlist(app, cmd).await?,
        Command::Login { email, password } => {
            if !app.user.login(&email, &password).await {
                bail!(app.user.error().unwrap_or_else(|| "Login failed".to_string()));
            }
            if let Some(user) = app.user.user() {
                println!("Logged in as {} <{}>", user.name, user.email);
            }
        }
        Command::Logout => {
            app.user.logout().await;
            println!("Logged out");
        }
        Command::Whoami => match app.user.user() {
            Some(user) => println!("{} <{}> (id {})", user.name, user.email, user.id),
            None => println!("Not logged in"),
        },
        Command::Photo(cmd) => match cmd {
            PhotoCommand::Show => match app.profile_photo.photo() {
                Some(uri) => println!("{}", uri),
                None => println!("No profile photo"),
            },
            PhotoCommand::Set { uri } => {
                if !app.profile_photo.save(&uri).await {
                    bail!("Failed to save profile photo");
                }
                println!("Profile photo updated");
            }
            PhotoCommand::Clear => {
                app.profile_photo.clear().await;
                println!("Profile photo cleared");
            }
        },
    }
    Ok(())
}

async fn run_wishlist(app: &AppContext, command: WishlistCommand) -> anyhow::Result<()> {
    match command {
        WishlistCommand::List => print_dresses(&app.wishlist.items()),
        WishlistCommand::Add { id } => {
            let Some(dress) = app.catalog.fetch_one(&id).await else {
                bail!("Dress not found: {}", id);
            };
            if app.wishlist.add(dress).await {
                println!("Added {} to wishlist", id);
            } else {
                println!("{} is already in the wishlist", id);
            }
        }
        WishlistCommand::Remove { id } => {
            if app.wishlist.remove(&id).await {
                println!("Removed {} from wishlist", id);
            } else {
                println!("{} was not in the wishlist", id);
            }
        }
        WishlistCommand::Clear => {
            app.wishlist.clear().await;
            println!("Wishlist cleared");
        }
    }
    Ok(())
}

fn print_dresses(dresses: &[Dress]) {
    if dresses.is_empty() {
        println!("No dresses found");
        return;
    }
    for dress in dresses {
        println!(
            "{:>4}  {:<28} {:<4} {:>8}  {}{}",
            dress.id,
            dress.name,
            dress.size,
            dress.price,
            if dress.available { "available" } else { "rented" },
            if dress.featured { "  *" } else { "" },
        );
    }
    println!("{} item(s)", dresses.len());
}
