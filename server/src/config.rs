use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// lanchat server
#[derive(Parser, Serialize, Deserialize, Clone, Debug)]
#[command(name = "lanchat-server", version, about = "Line-oriented TCP chat server")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "LANCHAT_PORT", default_value = "5555")]
    pub port: u16,

    /// Bind address
    #[arg(long, env = "LANCHAT_BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Path to TOML config file
    #[arg(long, default_value = "./lanchat.toml")]
    pub config: String,

    /// Enable structured JSON logging (for Docker/production)
    #[arg(long, env = "LANCHAT_JSON_LOGS")]
    pub json_logs: bool,

    /// Output a commented TOML config template and exit
    #[arg(long)]
    pub generate_config: bool,

    /// Maximum number of concurrently connected clients
    #[arg(long, env = "LANCHAT_MAX_CLIENTS", default_value = "10")]
    pub max_clients: usize,

    /// Number of recent messages replayed to a newly joined client
    #[arg(long, env = "LANCHAT_HISTORY_SIZE", default_value = "5")]
    pub history_size: usize,

    /// Per-connection idle read timeout in seconds (0 = no timeout)
    #[arg(long, env = "LANCHAT_IDLE_TIMEOUT_SECS", default_value = "0")]
    pub idle_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5555,
            bind_address: "0.0.0.0".to_string(),
            config: "./lanchat.toml".to_string(),
            json_logs: false,
            generate_config: false,
            max_clients: 10,
            history_size: 5,
            idle_timeout_secs: 0,
        }
    }
}

impl Config {
    /// Load config with layered precedence:
    /// built-in defaults < TOML file < env vars (LANCHAT_*) < CLI args
    pub fn load() -> Result<Self, figment::Error> {
        let cli = Config::parse();
        let config_path = cli.config.clone();

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("LANCHAT_"))
            .merge(Serialized::defaults(cli))
            .extract()
    }
}

/// Generate a commented TOML config template
pub fn generate_config_template() -> String {
    r#"# lanchat server configuration
# Place this file at ./lanchat.toml or specify with --config <path>
# All settings can be overridden via environment variables (LANCHAT_PORT, etc.)
# or CLI flags (--port, etc.)

# Server port (default: 5555)
# port = 5555

# Bind address (default: 0.0.0.0 — all interfaces)
# bind_address = "0.0.0.0"

# Enable structured JSON logging for Docker/production
# json_logs = false

# Maximum number of concurrently connected clients (default: 10)
# max_clients = 10

# Number of recent messages replayed to a newly joined client (default: 5)
# history_size = 5

# Per-connection idle read timeout in seconds, 0 disables (default: 0)
# idle_timeout_secs = 0
"#
    .to_string()
}
