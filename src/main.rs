use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use rfc_tools::config::{default_config_path, init_config, load_config, ServerConfig};
use rfc_tools::errors::{Result, RfcToolsError};
use rfc_tools::fetch::UreqFetcher;
use rfc_tools::mcp::{get_tool_definitions, McpServer};
use rfc_tools::rfc::RfcClient;

/// MCP server for searching and reading IETF RFCs.
#[derive(Parser)]
#[command(name = "rfc-tools", version, about = "MCP server for searching and reading IETF RFCs")]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdin/stdout (the default)
    Serve,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the tool registry as JSON
    Tools,
    /// Invoke one tool and print its result text
    Call {
        /// Tool name
        name: String,
        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(default_config_path);

    // `init` must work even when the existing file is unreadable.
    let config = match (&cli.command, &config_path) {
        (Some(Commands::Init { .. }), _) | (_, None) => ServerConfig::default(),
        (_, Some(path)) => load_config(path)?,
    };
    init_logging(&config, cli.verbose);

    let fetcher = Arc::new(UreqFetcher::new(config.user_agent.clone()));
    let server = McpServer::new(RfcClient::new(fetcher));

    match cli.command {
        None | Some(Commands::Serve) => {
            server.run().await?;
        }
        Some(Commands::Init { force }) => {
            write_default_config(config_path, force)?;
        }
        Some(Commands::Tools) => {
            println!("{}", serde_json::to_string_pretty(&get_tool_definitions())?);
        }
        Some(Commands::Call { name, args }) => {
            let arguments: serde_json::Value = serde_json::from_str(&args)?;
            let result = server.dispatch(&name, &arguments).await?;
            println!("{}", result.joined_text());
        }
    }
    Ok(())
}

fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.ok_or_else(|| RfcToolsError::Config {
        message: "no config directory on this platform; pass --config".to_string(),
    })?;
    if init_config(&path, force)? {
        println!("Wrote default config to {}", path.display());
    } else {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    Ok(())
}

/// Logs go to stderr; stdout carries the protocol.
fn init_logging(config: &ServerConfig, verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
