use std::sync::Arc;

use anyhow::{bail, Context};
use dotenv::dotenv;
use tracing::{info, warn};

use swatch_kb::{
    create_embedding_generator, init_tracing, ColorStore, EmbeddingConfig, IngestionService,
    MemoryColorStore, RestColorStore, RestStoreConfig, RunWindow,
};

struct CliArgs {
    file: String,
    window: RunWindow,
    include_header: bool,
}

fn parse_args(mut args: std::env::Args) -> anyhow::Result<CliArgs> {
    let program = args.next().unwrap_or_else(|| "swatch-kb".to_string());

    let mut file = None;
    let mut window = RunWindow::default();
    let mut include_header = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--offset" => {
                let value = args.next().context("--offset requires a value")?;
                window.offset = Some(value.parse().context("--offset must be an integer >= 0")?);
            }
            "--limit" => {
                let value = args.next().context("--limit requires a value")?;
                window.limit = Some(value.parse().context("--limit must be an integer >= 0")?);
            }
            "--include-header" => include_header = true,
            other if file.is_none() => file = Some(other.to_string()),
            other => bail!("unexpected argument: {}", other),
        }
    }

    let Some(file) = file else {
        bail!(
            "usage: {} <file> [--offset N] [--limit N] [--include-header]",
            program
        );
    };

    Ok(CliArgs {
        file,
        window,
        include_header,
    })
}

fn build_store() -> anyhow::Result<Arc<dyn ColorStore>> {
    match (
        std::env::var("SWATCH_STORE_URL"),
        std::env::var("SWATCH_STORE_KEY"),
    ) {
        (Ok(base_url), Ok(api_key)) => {
            let store = RestColorStore::new(RestStoreConfig {
                base_url,
                api_key,
                ..RestStoreConfig::default()
            })?;
            Ok(Arc::new(store))
        }
        _ => {
            warn!("SWATCH_STORE_URL/SWATCH_STORE_KEY not set, using in-memory store");
            Ok(Arc::new(MemoryColorStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let args = parse_args(std::env::args())?;

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read input file: {}", args.file))?;
    let mut rows: Vec<String> = content.lines().map(|l| l.to_string()).collect();
    if !args.include_header && !rows.is_empty() {
        rows.remove(0);
    }

    let embedding_generator = create_embedding_generator(EmbeddingConfig::default());
    let store = build_store()?;

    info!(
        file = %args.file,
        rows = rows.len(),
        offset = ?args.window.offset,
        limit = ?args.window.limit,
        "Starting ingestion"
    );

    let service = IngestionService::new(embedding_generator, store);
    service.run(&rows, args.window).await;

    Ok(())
}
