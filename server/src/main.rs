use tokio::net::TcpListener;

use lanchat_server::config::{generate_config_template, Config};
use lanchat_server::session;
use lanchat_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load config with layered precedence: defaults < TOML < env < CLI
    let config = Config::load()?;

    // Handle --generate-config: print template and exit
    if config.generate_config {
        print!("{}", generate_config_template());
        return Ok(());
    }

    // Initialize tracing/logging
    if config.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "lanchat_server=info".parse().unwrap()),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "lanchat_server=info".parse().unwrap()),
            )
            .init();
    }

    tracing::info!("lanchat server v{} starting", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(&config);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        %addr,
        max_clients = config.max_clients,
        history_size = config.history_size,
        "listening"
    );

    // Accept loop: one session task per connection. A failed accept never
    // takes the loop down.
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tracing::debug!(%peer, "new connection");
                let state = state.clone();
                tokio::spawn(async move {
                    session::run_session(stream, peer, state).await;
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "accept failed");
            }
        }
    }
}
