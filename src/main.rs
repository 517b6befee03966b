use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playport::{
    Res, cli,
    config::{self, SourceConfig, SpotifyConfig},
    error,
    management::SnapshotManager,
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scrape the source playlist and replace the Spotify playlist with it
    Migrate(MigrateOptions),

    /// Replace the Spotify playlist from a previously saved snapshot
    Reconcile(ReconcileOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateOptions {
    /// Where to save the resolved songs (defaults to the local data directory)
    #[clap(long)]
    snapshot: Option<PathBuf>,

    /// Run the browser with a visible window
    #[clap(long)]
    show_browser: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ReconcileOptions {
    /// Snapshot to replay (defaults to the one written by the last migrate)
    #[clap(long)]
    snapshot: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

async fn run(command: Command) -> Res<()> {
    match command {
        Command::Migrate(opt) => {
            let mut source = SourceConfig::from_env()?;
            source.headless = !opt.show_browser;
            let spotify = SpotifyConfig::from_env()?;
            cli::migrate(&source, &spotify, &SnapshotManager::new(opt.snapshot)).await?;
        }
        Command::Reconcile(opt) => {
            let spotify = SpotifyConfig::from_env()?;
            cli::reconcile(&spotify, &SnapshotManager::new(opt.snapshot)).await?;
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        error!("{}", e);
    }
}
