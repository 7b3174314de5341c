use std::io::{self, BufRead};
use std::panic;

use clap::Parser;

use griddle::config;
use griddle::constants::DEFAULT_MAX_DEPTH;
use griddle::game::search::SearchConfig;
use griddle::uci::UciHandler;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search profile to load from the profiles directory
    #[arg(long)]
    profile: Option<String>,

    /// Transposition table size in megabytes
    #[arg(long)]
    hash_mb: Option<usize>,

    /// Maximum iterative-deepening depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: i32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    panic::set_hook(Box::new(|info| {
        let payload = info.payload().downcast_ref::<&str>().unwrap_or(&"");
        let location = info.location().map(|l| l.to_string()).unwrap_or_default();
        eprintln!("panic occurred: {payload}, location: {location}");
    }));

    let config = match &args.profile {
        Some(name) => config::load_profile(name)?,
        None => SearchConfig::default(),
    };

    let mut handler = UciHandler::new(config, args.hash_mb, args.max_depth);
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if handler.handle_command(line.trim()) {
            break;
        }
    }

    Ok(())
}
