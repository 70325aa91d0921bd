//! pageturn - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use pageturn::integration::{run_replay, Replay, ReplayOptions};
use pageturn::model::{AppError, SessionId};
use pageturn::renderer::TextDirection;

/// Replay recorded reader input against the pagination engine
#[derive(Parser, Debug)]
#[command(name = "pageturn")]
#[command(version)]
#[command(
    about = "Replay a JSONL trace of reader input and print the resulting renderer calls"
)]
pub struct Args {
    /// Path to JSONL trace file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Session id of the open book; relayed messages for other ids are ignored
    #[arg(short, long)]
    pub session: String,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Start in scrolled layout
    #[arg(long)]
    pub scrolled: bool,

    /// Swap which screen half turns forward
    #[arg(long)]
    pub swap_click_area: bool,

    /// Auto-advance across sections at content edges
    #[arg(long)]
    pub continuous_scroll: bool,

    /// Simulated renderer reports right-to-left text
    #[arg(long)]
    pub rtl: bool,

    /// Simulated renderer starts laid out in pages
    #[arg(long)]
    pub paginated_renderer: bool,

    /// Simulated device has no vibration motor
    #[arg(long)]
    pub no_haptics: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = pageturn::config::load_config_with_precedence(args.config.clone())?;
        let merged = pageturn::config::merge_config(config_file);
        let with_env = pageturn::config::apply_env_overrides(merged);

        // Flags can only switch settings on; absent flags keep the file value
        let flag = |set: bool| set.then_some(true);
        pageturn::config::apply_cli_overrides(
            with_env,
            flag(args.scrolled),
            flag(args.swap_click_area),
            flag(args.continuous_scroll),
        )
    };

    pageturn::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let session = SessionId::new(args.session.as_str())?;
    let mut source = pageturn::source::detect_input_source(args.file.clone())?;
    info!(%session, input = %source.describe(), "replay started");

    let options = ReplayOptions {
        direction: if args.rtl {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        },
        paginated_renderer: args.paginated_renderer,
        haptics: !args.no_haptics,
    };

    let stdout = std::io::stdout().lock();
    let replay = Replay::new(session, config.view, config.tuning, options, stdout);
    let lines = std::iter::from_fn(|| source.next_line().transpose());
    run_replay(lines, replay)?;

    Ok(())
}
