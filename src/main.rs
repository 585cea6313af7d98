use clap::Parser;
use tokio::io::BufReader;

use physique::config::AppConfig;
use physique::console::Console;
use physique::state::AppState;
use physique::wizard::Wizard;
use physique::Stage;

#[derive(Parser)]
#[command(name = "physique")]
#[command(about = "Profile, photos and body analysis from the terminal")]
struct Args {
    /// Base URL of the API; overrides PHYSIQUE_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds; no timeout when omitted
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Send image bytes inline (base64) with the analysis request
    #[arg(long)]
    inline_photos: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "physique=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = AppConfig::load(args.api_url.as_deref())?;
    if args.timeout_secs.is_some() {
        config.timeout_secs = args.timeout_secs;
    }
    config.inline_photos |= args.inline_photos;

    tracing::info!(api_url = %config.api_url, "starting");
    let inline = config.inline_photos;
    let state = AppState::init(config)?;

    let console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), inline);
    let session = Wizard::new(&state, &console).run(Stage::Onboarding).await?;

    tracing::info!(
        session = %session.id(),
        analyzed = session.analysis().is_some(),
        "done"
    );
    Ok(())
}
