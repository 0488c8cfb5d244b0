//! Terminal driver for the mycelium engine.
//!
//! Sizes the grid to the terminal every frame, advances `time` by a fixed
//! step per frame and redraws at roughly 25 frames per second. Press `q`,
//! `Esc` or `Ctrl-C` to quit.
//!
//! ```text
//! cargo run -p mycelium-engine --example observatory -- --frames 500
//! RUST_LOG=mycelium_engine=debug cargo run -p mycelium-engine --example observatory 2>log.txt
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use mycelium_engine::{Engine, EngineConfig};
use tracing::{debug, info};

const FRAME_TIME: Duration = Duration::from_millis(40);
const TIME_STEP: f64 = 0.08;

#[derive(Parser, Debug)]
#[command(
    name = "observatory",
    version,
    about = "Bioluminescent mycelium in the terminal"
)]
struct Cli {
    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// JSON file overriding any part of the engine configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed, overriding the configuration file.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    let mut engine = Engine::new(config).context("invalid engine configuration")?;
    let meta = engine.metadata();
    info!(name = meta.name, version = meta.version, "starting");

    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    let _guard = TerminalGuard::new(restore_terminal);
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))
        .context("failed to prepare terminal")?;

    run(&mut engine, &mut stdout, cli.frames)
}

/// Runs `restore` when dropped, including while unwinding from a panic.
struct TerminalGuard {
    restore: fn(),
}

impl TerminalGuard {
    fn new(restore: fn()) -> Self {
        Self { restore }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(path: Option<&std::path::Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn run(engine: &mut Engine, stdout: &mut io::Stdout, limit: Option<u64>) -> Result<()> {
    let mut frame_no: u64 = 0;
    loop {
        if limit.is_some_and(|n| frame_no >= n) {
            break;
        }
        let started = Instant::now();
        let (cols, rows) = terminal::size().context("failed to query terminal size")?;
        let frame = engine.render(cols as u32, rows as u32, frame_no as f64 * TIME_STEP);

        for (y, line) in frame.to_ansi_rows().iter().enumerate() {
            queue!(stdout, MoveTo(0, y as u16), Print(line))?;
        }
        stdout.flush()?;
        frame_no += 1;

        let m = engine.last_metrics();
        if m.spore_burst {
            debug!(tick = m.tick, branches = m.branch_count, "spore burst");
        }

        let budget = FRAME_TIME.saturating_sub(started.elapsed());
        if event::poll(budget)? {
            if let Event::Key(key) = event::read()? {
                if is_quit(key) {
                    break;
                }
            }
        }
    }
    info!(frames = frame_no, "stopped");
    Ok(())
}

fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
