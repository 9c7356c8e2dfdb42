use std::sync::Arc;

use keuzegids::config::WizardConfig;
use keuzegids::service::HttpDecisionService;
use keuzegids::terminal;
use keuzegids::wizard::Wizard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = WizardConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    eprintln!("=== KEUZEGIDS v{} ===", env!("CARGO_PKG_VERSION"));
    eprintln!("    Service: {}", config.base_url);
    eprintln!("    Typ 'stop' om af te sluiten.\n");

    let service = Arc::new(HttpDecisionService::new(&config)?);
    let mut wizard = Wizard::new(service);

    terminal::run(&mut wizard).await
}
