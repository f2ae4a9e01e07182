use clap::Parser;
use roster::core::config::{self, CliOverrides};
use roster::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roster", about = "Keep a list of users in a JSON file")]
struct Args {
    /// Records file (overrides ROSTER_STORE and the config file)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Ask again on invalid input instead of dropping the record
    #[arg(short, long)]
    retry_invalid: bool,

    /// Where to write the log
    #[arg(long, default_value = "roster.log")]
    log_file: PathBuf,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - the terminal belongs to the prompts
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        eprintln!("Warning: {e}, using defaults");
        config::RosterConfig::default()
    });
    let cli = CliOverrides {
        store_path: args.store,
        retry_invalid: args.retry_invalid,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("Roster starting up with store: {}", resolved.store_path.display());

    tui::run(resolved)
}
