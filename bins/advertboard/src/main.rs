//! Advertboard CLI
//!
//! Browse, publish and manage marketplace adverts from the terminal.

use advertboard_api_client::{ApiError, ErrorKind};
use advertboard_telemetry::TelemetryConfig;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::ExitCode;

mod commands;
mod output;

use commands::adverts::{ListingArgs, SearchArgs};
use commands::subscriptions::Method;
use commands::{account, adverts, donate, posts, subscriptions, Context};
use output::{OutputFormat, Status};

/// Terminal client for the Advertboard marketplace
#[derive(Parser)]
#[command(name = "advertboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "ADVERTBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "ADVERTBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the stored tokens
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Browse and manage adverts
    Adverts {
        #[command(subcommand)]
        action: AdvertsAction,
    },

    /// Browse posts
    Posts {
        #[command(subcommand)]
        action: PostsAction,
    },

    /// Manage premium subscriptions
    Subscriptions {
        #[command(subcommand)]
        action: SubscriptionsAction,
    },

    /// Support the marketplace
    Donate {
        /// Amount to donate
        #[arg(short, long)]
        amount: f64,

        /// Payment method
        #[arg(short, long, value_enum, default_value_t = Method::Card)]
        method: Method,

        /// Donate every month instead of once
        #[arg(long)]
        recurring: bool,
    },
}

#[derive(Subcommand)]
enum AdvertsAction {
    /// Search adverts
    List {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Show one advert
    Show {
        /// Advert ID
        id: String,

        /// Access key of a private advert
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Publish an advert (requires --title and --description)
    Create {
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Edit an advert
    Update {
        /// Advert ID
        id: String,

        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Delete an advert
    Delete {
        /// Advert ID
        id: String,
    },

    /// List your own adverts
    Mine,

    /// Upvote an advert
    Upvote {
        /// Advert ID
        id: String,
    },

    /// Record a view
    View {
        /// Advert ID
        id: String,
    },

    /// Create a share link
    Share {
        /// Advert ID
        id: String,

        /// Create a private link with an access key
        #[arg(long)]
        private: bool,
    },

    /// Show upvotes and views
    Stats {
        /// Advert ID
        id: String,
    },
}

#[derive(Subcommand)]
enum PostsAction {
    /// Search posts
    List {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Show one post
    Show {
        /// Post ID
        id: String,
    },

    /// List your own posts
    Mine,
}

#[derive(Subcommand)]
enum SubscriptionsAction {
    /// Purchase a subscription
    Create {
        /// Amount to pay
        #[arg(short, long)]
        amount: f64,

        /// Payment method
        #[arg(short, long, value_enum, default_value_t = Method::Card)]
        method: Method,

        /// Currency code
        #[arg(short, long)]
        currency: Option<String>,

        /// Renew automatically
        #[arg(long)]
        auto_renew: bool,
    },

    /// Show the active subscription
    Active,

    /// Show past subscriptions
    History,

    /// Cancel a subscription
    Cancel {
        /// Subscription ID
        id: String,
    },

    /// Renew a subscription
    Renew {
        /// Subscription ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    if let Err(e) = advertboard_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging disabled: {e}"));
    }

    let result = match Context::from_env(cli.format) {
        Ok(ctx) => run(&ctx, cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            if let Some(hint) = e.downcast_ref::<ApiError>().and_then(hint_for) {
                Status::hint(hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(ctx: &Context, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => account::login(ctx, &email, &password).await,

        Commands::Register { name, email, password } => {
            account::register(ctx, &name, &email, &password).await
        }

        Commands::Logout => account::logout(ctx).await,

        Commands::Whoami => account::whoami(ctx).await,

        Commands::Adverts { action } => match action {
            AdvertsAction::List { search } => adverts::list(ctx, &search).await,
            AdvertsAction::Show { id, key } => adverts::show(ctx, &id, key.as_deref()).await,
            AdvertsAction::Create { listing } => adverts::create(ctx, listing).await,
            AdvertsAction::Update { id, listing } => adverts::update(ctx, &id, listing).await,
            AdvertsAction::Delete { id } => adverts::delete(ctx, &id).await,
            AdvertsAction::Mine => adverts::mine(ctx).await,
            AdvertsAction::Upvote { id } => adverts::upvote(ctx, &id).await,
            AdvertsAction::View { id } => adverts::view(ctx, &id).await,
            AdvertsAction::Share { id, private } => adverts::share(ctx, &id, private).await,
            AdvertsAction::Stats { id } => adverts::stats(ctx, &id).await,
        },

        Commands::Posts { action } => match action {
            PostsAction::List { search } => posts::list(ctx, &search).await,
            PostsAction::Show { id } => posts::show(ctx, &id).await,
            PostsAction::Mine => posts::mine(ctx).await,
        },

        Commands::Subscriptions { action } => match action {
            SubscriptionsAction::Create { amount, method, currency, auto_renew } => {
                subscriptions::create(ctx, amount, method, currency, auto_renew).await
            }
            SubscriptionsAction::Active => subscriptions::active(ctx).await,
            SubscriptionsAction::History => subscriptions::history(ctx).await,
            SubscriptionsAction::Cancel { id } => subscriptions::cancel(ctx, &id).await,
            SubscriptionsAction::Renew { id } => subscriptions::renew(ctx, &id).await,
        },

        Commands::Donate { amount, method, recurring } => {
            donate::run(ctx, amount, method, recurring).await
        }
    }
}

fn hint_for(error: &ApiError) -> Option<&'static str> {
    match error.kind() {
        ErrorKind::RequiresKey => Some("Pass the access key with --key"),
        ErrorKind::LimitReached => Some("Upgrade with `advertboard subscriptions create` to publish more"),
        ErrorKind::CannotUpvoteOwn | ErrorKind::Generic => match error.status() {
            Some(401) => Some("Run `advertboard login` to sign in"),
            _ => None,
        },
    }
}
