//! Startup runner for the knowledge extraction pipeline.
//!
//! Thin adapter over the `knowledge` library: load config from the
//! environment, run the pipeline once against a directory, print the
//! report. All extraction failure reporting lives in the library; this
//! binary only decides the exit code.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use knowledge::{CommandExtractor, FsStore, KnowledgeConfig, KnowledgeService, RecordStore};

#[derive(Parser)]
#[command(name = "knowledge", about = "Extract knowledge records from a directory of documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process a directory of documents and persist the results
    Run {
        /// Directory to process (falls back to KNOWLEDGE_DOCS_DIR)
        directory: Option<String>,
    },
    /// List all stored knowledge records
    List,
    /// Print one stored record by id
    Get { id: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environments set variables directly
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,knowledge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = KnowledgeConfig::from_env();
    let store = FsStore::new(&config.storage_dir);

    match cli.command {
        Command::Run { directory } => {
            let directory = match directory.or_else(|| {
                config
                    .docs_dir
                    .as_ref()
                    .map(|d| d.display().to_string())
            }) {
                Some(dir) => dir,
                None => bail!(
                    "no directory given; pass one as an argument or set KNOWLEDGE_DOCS_DIR"
                ),
            };

            let extractor = CommandExtractor::from_config(&config);
            let service =
                KnowledgeService::with_config(extractor, store, config.pipeline.clone());

            let report = service
                .run_with_cancel(&directory, shutdown_token())
                .await;

            tracing::info!(
                processed = report.total_processed,
                saved = report.total_saved,
                "{}",
                report.message
            );
            if !report.success {
                bail!("processing failed: {}", report.message);
            }
        }
        Command::List => {
            let records = store.list_all().await?;
            for record in &records {
                println!(
                    "{}\t{}\t{}",
                    record.id,
                    if record.succeeded { "ok" } else { "failed" },
                    record.file_name
                );
            }
            tracing::info!("{} records in {}", records.len(), store.root().display());
        }
        Command::Get { id } => match store.get_by_id(id).await? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => bail!("no record with id {id}"),
        },
    }

    Ok(())
}

/// Token cancelled on Ctrl-C so in-flight extractor processes get killed
/// and completed results are still saved.
fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, finishing in-flight work");
            trigger.cancel();
        }
    });
    token
}
