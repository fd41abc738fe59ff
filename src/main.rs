use backgammon_first_move::config::{ClientConfig, DEFAULT_CONFIG_PATH};
use backgammon_first_move::game;
use backgammon_first_move::player::FirstMoveAI;
use backgammon_first_move::ClientError;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "backgammon-first-move")]
#[command(about = "Backgammon bot that always plays the first playable move")]
#[command(version)]
struct Cli {
    /// Team name to register with the server
    team_name: Option<String>,

    /// Configuration file path (defaults to ./client_config.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if report(run(cli).await) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// エラーは一度だけログに出す。成功なら true
fn report(res: anyhow::Result<()>) -> bool {
    match res {
        Ok(()) => true,
        Err(e) => {
            error!("{:#}", e);
            false
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // ネットワークに触る前にチェック
    let team_name = cli.team_name.ok_or(ClientError::MissingTeamName)?;

    let config = match cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    info!(server = %config.base_url, team = %team_name, "joining game");

    let ai = FirstMoveAI::default();
    match game::run(config, &team_name, &ai).await? {
        Some(summary) => {
            info!(
                winner = ?summary.winner,
                moves = summary.moves.len(),
                "game over"
            );
        }
        None => info!("registration was rejected, not playing"),
    }
    Ok(())
}
