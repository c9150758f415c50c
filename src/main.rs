use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use safe_bite::{config::Config, models::LookupResponse, routes::create_router, AppState, SafetyService};

#[derive(Parser)]
#[command(name = "safe-bite", version, about = "Can I eat this while pregnant?")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Look up a single food and print the verdict
    Check {
        /// Food to check, e.g. `soft cheese`
        #[arg(required = true)]
        food: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; logs go to stderr so `check` output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "safe_bite=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    let service = SafetyService::from_config(&config)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, service).await,
        Command::Check { food } => {
            let response = service.lookup(&food.join(" ")).await?;
            print_lookup(&response);
            Ok(())
        }
    }
}

async fn serve(config: Config, service: SafetyService) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create shared state and router
    let state = AppState::new(config, service);
    let app = create_router(state);

    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

fn print_lookup(response: &LookupResponse) {
    match &response.safety {
        Some(report) => {
            println!("{} ({})", report.status.label(), report.status);
            println!("{}", report.summary);
            println!();
            println!("  \"{}\"", report.snippet);
            println!("  Source: {} <{}>", report.source, report.link);
        }
        None => {
            println!("No analysis available for \"{}\"", response.query);
        }
    }

    if let Some(wiki) = &response.wiki {
        println!();
        println!("{}", wiki.title);
        println!("{}", wiki.extract);
        println!("  {}", wiki.page_url());
    }

    if response.safety.is_none() && response.wiki.is_none() {
        println!();
        println!("Search Google directly: {}", response.fallback_link);
    }
}
