use bookshelf::core::config::{self, CliOverrides};
use bookshelf::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookshelf", about = "Terminal client for the library reader service")]
struct Args {
    /// Backend base URL (overrides config and BOOKSHELF_BASE_URL)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Path to a config file instead of ~/.bookshelf/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("bookshelf: {e}, using defaults");
            config::BookshelfConfig::default()
        }
    };
    let cli = CliOverrides {
        base_url: args.base_url,
        timeout_secs: args.timeout,
    };
    let resolved = config::resolve(&file_config, &cli);

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Bookshelf starting up against {} (log level {})",
        resolved.base_url,
        resolved.log_level
    );

    tui::run(resolved)
}
