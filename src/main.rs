use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cache_inspect::{driver, InspectorConfig, RedisStore};

/// Inspect an LLM proxy's namespaced Redis cache
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Cache key to inspect in detail; omit for the store-wide overview
    #[arg(value_name = "KEY")]
    key: Option<String>,

    /// Emit the report as pretty-printed JSON instead of text
    #[arg(long)]
    json_pretty: bool,

    /// Override file read before the process environment (key=value lines)
    #[arg(long, value_name = "PATH", default_value = ".env")]
    env_file: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        // One-line cause, no trace; connect failures land here too.
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = InspectorConfig::load(&cli.env_file)?;

    // One connection per invocation, every query awaited before the next;
    // a current-thread runtime is all this tool needs.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let report = rt.block_on(async {
        let mut store = RedisStore::connect(&config).await?;
        match &cli.key {
            Some(key) => driver::inspect(&mut store, &config, key).await,
            None => driver::overview(&mut store, &config).await,
        }
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json_pretty {
        report.render_json(&mut out)?;
    } else {
        report.render(&mut out)?;
    }
    out.flush()?;
    Ok(())
}
