use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use tessera::core::config;
use tessera::render::{self, RunOptions};

#[derive(Parser)]
#[command(name = "tessera", about = "Schema-driven terminal renderer for workflow backends")]
struct Args {
    /// Workflow backend base URL (overrides config file and TESSERA_BACKEND_URL)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Resume an existing conversation instead of starting a new one
    #[arg(short, long)]
    conversation: Option<String>,

    /// Render a local schema JSON file instead of talking to a backend
    #[arg(short, long)]
    schema: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to tessera.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("tessera.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_default();
    let resolved = config::resolve(&file_config, args.backend_url.as_deref());
    log::info!("tessera starting up; backend: {}", resolved.backend_url);

    let conversation = args
        .conversation
        .or_else(|| std::env::var("TESSERA_CONVERSATION_ID").ok());

    render::run(
        resolved,
        RunOptions {
            schema_file: args.schema,
            conversation,
        },
    )
}
