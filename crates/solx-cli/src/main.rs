//! 🚀 solx-cli — the front door, the bouncer, the maitre d' of solx.
//!
//! 🎬 *[narrator voice]* "It all started with a simple main() function..."
//! 📦 This binary crate is the thin CLI wrapper that loads config, sets up logging,
//! reads a JSON update query, and prints the XML body the server would receive.
//! Like a manager. It delegates. 🦆

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use solx::{UpdateQuery, UpdateRequest};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// 📮 Render a JSON update query as the XML request body for an update handler.
#[derive(Debug, Parser)]
#[command(name = "solx", version)]
struct Args {
    /// 📄 JSON file holding the update query (`{"commands": [...]}`)
    query: PathBuf,

    /// 🔧 TOML config file. Defaults to `solx.toml` when it exists.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 📊 Print a request summary table instead of the raw body
    #[arg(short, long)]
    summary: bool,
}

/// 🚀 main() — where it all begins. The "I pressed F5 and held my breath" moment.
///
/// 🔧 Steps:
/// 1. Init tracing (so we can see what goes wrong, and when)
/// 2. Parse args
/// 3. Load config (the moment of truth)
/// 4. Build the request and print it
/// 5. Handle errors (cry)
fn main() {
    // 📡 Set up tracing — because println! debugging is a lifestyle choice
    // we're trying to move past, like flip phones and cargo shorts
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(err) = run(args) {
        error!("💀 error: {}", err);
        // -- 🧅 peel the onion of sadness, one tear-jerking layer at a time
        for cause in err.chain().skip(1) {
            error!("⚠️  cause: {}", cause);
        }
        // 🗑️ Exit with prejudice. Process exitus maximus.
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // 🔒 Explicit --config must exist. The implicit default is allowed to be absent.
    let config_file = match args.config {
        Some(path) => {
            let exists = path.try_exists().with_context(|| {
                format!("💀 Couldn't check whether config file '{}' exists", path.display())
            })?;
            anyhow::ensure!(
                exists,
                "💀 Configuration file '{}' does not exist. Use an absolute path to be absolutely certain.",
                path.display()
            );
            Some(path)
        }
        None => {
            let fallback = PathBuf::from("solx.toml");
            fallback.is_file().then_some(fallback)
        }
    };

    let app_config = solx::app_config::load_config(config_file.as_deref())
        .context("💀 In solx-cli, we couldn't load the config. Take a look at the file and the SOLX_* env vars.")?;

    let query = solx::read_update_query(&args.query)?;
    let request = app_config
        .request_builder()
        .build(&query)
        .context("💀 The update query could not be turned into a request")?;

    if args.summary {
        println!("{}", summary_table(&query, &request, &app_config.request.base_url)?);
    } else {
        println!("{}", request.body.as_deref().unwrap_or_default());
    }
    Ok(())
}

/// 🍽️ A comfy table of what would be sent. Method, URL, headers, commands, body size.
fn summary_table(query: &UpdateQuery, request: &UpdateRequest, base_url: &str) -> Result<Table> {
    let url = request.uri(base_url).context("💀 The configured base_url doesn't make a valid URL")?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("📮 field"), Cell::new("value")]);

    table.add_row(vec![Cell::new("method"), Cell::new(request.method.as_str())]);
    table.add_row(vec![Cell::new("url"), Cell::new(url.as_str())]);
    for (name, value) in &request.headers {
        table.add_row(vec![Cell::new(format!("header: {name}")), Cell::new(value)]);
    }
    let kinds: Vec<&str> = query.commands().iter().map(|c| c.kind()).collect();
    table.add_row(vec![Cell::new("commands"), Cell::new(kinds.join(", "))]);
    let body_len = request.body.as_ref().map_or(0, String::len);
    table.add_row(vec![Cell::new("body bytes"), Cell::new(body_len)]);
    Ok(table)
}
