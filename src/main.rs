//! `folio` - terminal administration client for the book catalog.
//!
//! Subcommands play the role of the views: login/register, dashboard,
//! the paginated book list and search, the admin-only book form
//! operations, and the registered-user directory.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands;
use folio::config::AppConfig;
use folio::models::BookFilter;
use folio::AppContext;

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Book catalog administration client", version)]
struct Cli {
    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Login to the catalog server.
    Login {
        /// Username (prompted when omitted).
        #[arg(long)]
        username: Option<String>,
        /// Password (not recommended - use the interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout - clear the persisted session.
    Logout,

    /// Register a new account.
    Register {
        #[arg(long)]
        username: Option<String>,
        /// Password (not recommended - use the interactive prompt).
        #[arg(long)]
        password: Option<String>,
        /// Request the ADMIN role for the new account.
        #[arg(long)]
        admin: bool,
    },

    /// Show the current session.
    Whoami,

    /// Session summary and catalog counts.
    Dashboard,

    /// Catalog operations.
    Books {
        #[command(subcommand)]
        action: BookAction,
    },

    /// Registered users (admin only).
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand, Debug)]
enum BookAction {
    /// List one page of the catalog.
    List {
        /// Zero-based page index.
        #[arg(long, default_value_t = 0)]
        page: i64,
        /// Page size.
        #[arg(long, default_value_t = 10)]
        size: i64,
        /// Sort as `field,direction` (default `id,asc`).
        #[arg(long)]
        sort: Option<String>,
    },

    /// Search the catalog; unset filters are not sent.
    Search {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, default_value_t = 0)]
        page: i64,
        #[arg(long, default_value_t = 10)]
        size: i64,
        #[arg(long)]
        sort: Option<String>,
    },

    /// Show one book.
    Show { id: i64 },

    /// Add a book (admin only).
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        isbn: String,
        #[arg(long)]
        year: i32,
        /// Optional link to the book.
        #[arg(long)]
        link: Option<String>,
    },

    /// Edit a book (admin only); unset flags keep the current value.
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        link: Option<String>,
    },

    /// Delete a book (admin only).
    Rm {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum UserAction {
    /// List registered usernames.
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing; logs go to stderr so table/json output stays clean
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("folio={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = AppContext::new(config)?;

    // Rehydrate the persisted session before any view is gated.
    ctx.session.bootstrap();

    let json = cli.output == "json";

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&ctx, username, password).await
        }
        Commands::Logout => {
            commands::auth::logout(&ctx);
            Ok(())
        }
        Commands::Register {
            username,
            password,
            admin,
        } => commands::auth::register(&ctx, username, password, admin).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Dashboard => commands::dashboard::dashboard(&ctx).await,
        Commands::Books { action } => match action {
            BookAction::List { page, size, sort } => {
                commands::books::list(&ctx, commands::books::PageArgs { page, size, sort }, json)
                    .await
            }
            BookAction::Search {
                title,
                author,
                isbn,
                year,
                page,
                size,
                sort,
            } => {
                let filter = BookFilter {
                    title,
                    author,
                    isbn,
                    year,
                };
                commands::books::search(
                    &ctx,
                    filter,
                    commands::books::PageArgs { page, size, sort },
                    json,
                )
                .await
            }
            BookAction::Show { id } => commands::books::show(&ctx, id, json).await,
            BookAction::Add {
                title,
                author,
                isbn,
                year,
                link,
            } => commands::books::add(&ctx, title, author, isbn, year, link, json).await,
            BookAction::Edit {
                id,
                title,
                author,
                isbn,
                year,
                link,
            } => commands::books::edit(&ctx, id, title, author, isbn, year, link, json).await,
            BookAction::Rm { id, yes } => commands::books::remove(&ctx, id, yes).await,
        },
        Commands::Users { action } => match action {
            UserAction::List => commands::users::list(&ctx, json).await,
        },
    }
}
