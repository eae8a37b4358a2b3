//! Marquee CLI - terminal reference player
//!
//! Binds the shell to a scripted player and renders the view model as the
//! timeline plays out. Useful for eyeballing shell behavior and for
//! producing event-journal dumps.

use clap::{Parser, Subcommand};
use marquee_core::{AdaptivePlayer, PlayerFactory, PlayerShell, ScriptEntry, ScriptedPlayer};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::{sleep, Duration};

mod demo;
mod output;

/// Marquee CLI - scripted reference player
#[derive(Parser)]
#[command(name = "marquee")]
#[command(version)]
#[command(about = "Terminal reference player for the Marquee shell", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an event timeline through the shell and render the view
    Run {
        /// JSON file with the script entries (defaults to the built-in demo)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Dump the event journal as JSON lines after the run
        #[arg(short, long)]
        journal: bool,
    },

    /// Print the built-in demo timeline as JSON
    Timeline,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .init();

    match cli.command {
        Commands::Run { script, journal } => run(script, journal).await?,
        Commands::Timeline => {
            println!("{}", serde_json::to_string_pretty(&demo::timeline())?);
        }
    }

    Ok(())
}

fn load_script(path: Option<PathBuf>) -> anyhow::Result<Vec<ScriptEntry>> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(&path)?;
            Ok(serde_json::from_reader(file)?)
        }
        None => Ok(demo::timeline()),
    }
}

async fn run(script_path: Option<PathBuf>, dump_journal: bool) -> anyhow::Result<()> {
    let script = load_script(script_path)?;
    let run_ms = demo::duration_ms(&script) + 500;

    let factory: PlayerFactory = {
        let script = script.clone();
        Arc::new(move || Arc::new(ScriptedPlayer::new(script.clone())) as Arc<dyn AdaptivePlayer>)
    };
    let shell = PlayerShell::new(factory, demo::playlist()?)
        .with_ad_placement(demo::ad_placement_url()?);

    let asset = shell.current_asset().await;
    println!("playing: {}", asset.name);
    shell.load_current().await?;

    // render every view change until the script has played out
    let mut view_rx = shell.view().subscribe();
    let deadline = sleep(Duration::from_millis(run_ms));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = view_rx.borrow_and_update().clone();
                println!("{}", output::render_view(&snapshot));
            }
            _ = &mut deadline => break,
        }
    }

    let view = shell.view().snapshot();
    println!("{}", output::render_bitrates(&view.bitrate_list));
    println!(
        "final state: {} after {} events",
        shell.state().await,
        shell.journal().len()
    );

    if dump_journal {
        output::print_journal(&shell.journal().records())?;
    }

    Ok(())
}
