//! Coachbook CLI
//!
//! Books services against the Coachbook API and verifies payment callbacks.

mod commands;
mod config;
mod state;

use clap::{Parser, Subcommand};
use coachbook_core::{CheckoutForm, PaymentMode};
use coachbook_sdk::objects::{ListOrdersQuery, PaymentStatus};
use config::ConfigLoader;
use state::AppState;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Coachbook - service booking and checkout
#[derive(Parser, Debug)]
#[command(name = "coachbook")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./coachbook.toml")]
    config: PathBuf,

    /// Override the API base url (e.g., http://localhost:5000/api)
    #[arg(long)]
    api: Option<Url>,

    /// Admin bearer token
    #[arg(long, env = "COACHBOOK_ADMIN_TOKEN", hide_env_values = true)]
    admin_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the service catalog
    Services,

    /// Book a service
    Checkout {
        /// Id of the service to book
        #[arg(long)]
        service: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        challenges: String,
        #[arg(long)]
        goals: String,
        /// Skip the payment gateway and pay later
        #[arg(long, default_value = "false")]
        pay_later: bool,
    },

    /// Verify the url the payment gateway redirected to
    Verify {
        callback_url: Url,
    },

    /// List individual orders (admin)
    Orders {
        #[arg(long)]
        status: Option<PaymentStatus>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "20")]
        limit: u32,
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Change an order's payment status (admin)
    SetStatus {
        order_id: String,
        status: PaymentStatus,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::debug!("Starting coachbook v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let loader = ConfigLoader::new(&args.config, args.api, args.admin_token);
    let loaded_config = loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::debug!("Configuration loaded from {:?}", args.config);

    let state = AppState::new(loaded_config);

    match args.command {
        Command::Services => commands::list_services(&state).await,
        Command::Checkout {
            service,
            name,
            email,
            phone,
            challenges,
            goals,
            pay_later,
        } => {
            let form = CheckoutForm {
                name,
                email,
                phone,
                challenges,
                goals,
            };
            let mode = if pay_later {
                PaymentMode::PayLater
            } else {
                PaymentMode::PayNow
            };
            commands::checkout(&state, &service, form, mode).await
        }
        Command::Verify { callback_url } => commands::verify(&state, &callback_url).await,
        Command::Orders {
            status,
            search,
            limit,
            page,
        } => {
            let query = ListOrdersQuery {
                limit,
                page,
                payment_status: status,
                search,
            };
            commands::list_orders(&state, query).await
        }
        Command::SetStatus { order_id, status } => {
            commands::set_status(&state, &order_id, status).await
        }
    }
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
