use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sb_bridge::config::{
    ConnectorConfig, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_GRPC_HOST, DEFAULT_GRPC_PORT,
};
use sb_bridge::connector::BackendConnector;
use sb_bridge::web::{self, WebConfig};

#[derive(Parser)]
#[command(name = "bridge")]
#[command(about = "HTTP chat bridge for the Super Builder service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Super Builder gRPC host
    #[arg(long, env = "SUPERBUILDER_GRPC_HOST", default_value = DEFAULT_GRPC_HOST)]
    grpc_host: String,

    /// Super Builder gRPC port
    #[arg(long, env = "SUPERBUILDER_GRPC_PORT", default_value_t = DEFAULT_GRPC_PORT)]
    grpc_port: u16,

    /// Seconds to wait for the gRPC channel to come up
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP bridge server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
        /// Port to listen on
        #[arg(long, env = "BRIDGE_PORT", default_value_t = 8003)]
        port: u16,
    },
    /// Check connectivity and model readiness
    Health,
    /// List chat sessions known to the service
    Sessions,
    /// Remove one chat session
    RemoveSession {
        /// Session id to remove
        session_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up SUPERBUILDER_* overrides from a local .env before parsing
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    sb_common::init_tracing("sb_bridge")?;

    let config = ConnectorConfig {
        host: cli.grpc_host,
        port: cli.grpc_port,
        connect_timeout: Duration::from_secs(cli.connect_timeout),
        ..ConnectorConfig::default()
    };

    match cli.command {
        Commands::Serve { bind, port } => {
            web::serve(WebConfig {
                bind,
                port,
                connector: config,
            })
            .await?;
        }
        Commands::Health => run_health(config).await?,
        Commands::Sessions => run_sessions(config).await?,
        Commands::RemoveSession { session_id } => run_remove_session(config, session_id).await?,
    }

    Ok(())
}

fn status(passed: bool) -> &'static str {
    if passed {
        "✓"
    } else {
        "✗"
    }
}

async fn run_health(config: ConnectorConfig) -> Result<()> {
    println!("=== Super Builder Health ===\n");

    let connector = BackendConnector::new(config);
    if let Err(e) = connector.connect().await {
        println!("✗ unreachable: {e}");
        std::process::exit(1);
    }

    let health = connector.check_health().await;
    println!("Service at {}", connector.addr());
    println!("{} middleware responding", status(health.middleware_ready));
    println!("{} models ready", status(health.llm_ready));
    println!("\n{}", health.message);

    connector.disconnect().await;

    if !health.llm_ready {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_sessions(config: ConnectorConfig) -> Result<()> {
    let connector = BackendConnector::new(config);
    connector.connect().await?;

    let sessions = connector.get_chat_history().await?;
    let ids: Vec<i64> = sessions.iter().filter_map(|s| s.sid).collect();

    if ids.is_empty() {
        println!("No sessions.");
    } else {
        println!("{} session(s):", ids.len());
        for id in ids {
            println!("  {id}");
        }
    }

    connector.disconnect().await;
    Ok(())
}

async fn run_remove_session(config: ConnectorConfig, session_id: i64) -> Result<()> {
    let connector = BackendConnector::new(config);
    connector.connect().await?;

    connector.remove_session(session_id).await?;
    println!("Session {session_id} removed.");

    connector.disconnect().await;
    Ok(())
}
