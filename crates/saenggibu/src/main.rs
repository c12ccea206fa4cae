use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use saenggibu_common::{logger, AppConfig};
use saenggibu_text::{compute_prompt_budget, ComplianceTruncator};
use std::io::Read;
use std::path::PathBuf;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    match find_project_root().map(|root| root.join(".env")) {
        Some(env_path) if env_path.exists() => {
            dotenv::from_path(&env_path).ok();
        }
        _ => {
            dotenv::dotenv().ok();
        }
    }
}

#[derive(Parser)]
#[command(name = "saenggibu")]
#[command(about = "Saenggibu - AI-assisted school record writer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides SERVER_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Strip meta info and cut text to a character limit
    Enforce {
        /// Target character count
        #[arg(long)]
        chars: usize,

        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Print the character budget for a requested length
    Budget {
        /// Requested character count
        chars: usize,
    },
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }

    logger::setup_logging(&config)?;

    tracing::info!("Saenggibu starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  LLM: {} ({})", config.llm_base_url, config.llm_model);
    tracing::info!("  Attempts: {}", config.generation_attempts);

    println!("Server listening on http://{}", config.server_bind_address());

    saenggibu_server::start_server(config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(host, port).await?,
        Some(Commands::Enforce { chars, file }) => {
            let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
            logger::setup_console_logging(&level)?;

            let raw = read_input(file.as_ref())?;
            let text = ComplianceTruncator::default().enforce(&raw, chars);
            tracing::debug!(
                "Enforced {} -> {} chars",
                raw.chars().count(),
                text.chars().count()
            );
            println!("{}", text);
        }
        Some(Commands::Budget { chars }) => {
            let budget = compute_prompt_budget(chars);
            println!(
                "ceiling: {}\nprompt target: {}\nbuffer ratio: {:.2}",
                budget.ceiling,
                budget.prompt_target,
                budget.buffer_ratio()
            );
        }
        None => serve(None, None).await?,
    }

    Ok(())
}
