use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trellis_board::{Board, load};
use trellis_config::{Command, parse_script};
use trellis_history::HistoryConfig;
use trellis_source::{EntitySource, FsEntitySource, StaticEntitySource};

/// Trellis - pair actions with triggers, with full undo/redo
#[derive(Parser)]
#[command(name = "trellis")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory holding actions.json and triggers.json (default: ~/.trellis)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Load a board, replay commands against it and print the result
  Run {
    /// Path to a command script (JSON array or one JSON command per line).
    /// Commands are read from stdin when omitted.
    script: Option<PathBuf>,

    /// Use the built-in sample entities instead of the data directory
    #[arg(long)]
    sample: bool,

    /// Simulated latency for each sample fetch, in milliseconds
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Maximum number of undo steps to keep (unbounded by default)
    #[arg(long)]
    max_history: Option<usize>,
  },
}

fn main() -> Result<()> {
  init_tracing();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Run {
      script,
      sample,
      latency_ms,
      max_history,
    }) => {
      let source: Box<dyn EntitySource> = if sample {
        Box::new(StaticEntitySource::sample().with_latency(Duration::from_millis(latency_ms)))
      } else {
        Box::new(FsEntitySource::new(resolve_data_dir(cli.data_dir)?))
      };
      let config = HistoryConfig {
        max_depth: max_history,
      };
      run(source.as_ref(), script, config)?;
    }
    None => {
      println!("trellis - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();
}

fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
  match data_dir {
    Some(dir) => Ok(dir),
    None => Ok(
      dirs::home_dir()
        .context("could not determine home directory")?
        .join(".trellis"),
    ),
  }
}

fn run(source: &dyn EntitySource, script: Option<PathBuf>, config: HistoryConfig) -> Result<()> {
  let commands = read_commands(script)?;

  let rt = tokio::runtime::Runtime::new()?;
  let mut board = Board::with_config(config);
  let report = rt.block_on(load(&mut board, source));

  if !report.is_complete() {
    for e in report.errors() {
      eprintln!("Load failed: {}", e);
    }
    bail!("board has no data (status: {:?})", board.status());
  }

  eprintln!(
    "Loaded {} actions and {} triggers",
    board.action_map().len(),
    board.trigger_map().len()
  );

  let total = commands.len();
  let mut changed = 0;
  for command in commands {
    let name = command.name();
    if board.apply(command) {
      changed += 1;
    } else {
      warn!(command = name, "command had no effect");
    }
  }
  info!(total, changed, "replayed commands");

  println!("{}", serde_json::to_string_pretty(&board.snapshot())?);

  Ok(())
}

fn read_commands(script: Option<PathBuf>) -> Result<Vec<Command>> {
  let input = match script {
    Some(path) => std::fs::read_to_string(&path)
      .with_context(|| format!("failed to read command script: {}", path.display()))?,
    None => read_stdin()?,
  };

  parse_script(&input).context("failed to parse commands")
}

fn read_stdin() -> Result<String> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    // No stdin pipe, nothing to replay
    return Ok(String::new());
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read commands from stdin")?;
  Ok(input)
}
