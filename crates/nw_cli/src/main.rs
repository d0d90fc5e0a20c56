use anyhow::Context;
use clap::Parser;
use nw_broker::MemoryPublisher;
use nw_core::logging::init_logging;
use nw_core::types::DEFAULT_PAGE_SIZE;
use nw_core::{BrokerType, Config, PublishManager, SearchQuery};
use nw_search::GuardianClient;
use nw_web::{create_app, handle_event, AppState};
use serde_json::Value;
use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Search the Guardian and publish the results to SNS or SQS", long_about = None)]
pub struct Cli {
    /// Log level (TRACE, DEBUG, INFO, WARNING, ERROR). Defaults to LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Guardian API key. Defaults to GUARDIAN_API_KEY.
    #[arg(long, global = true)]
    api_key: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the raw search response
    Search {
        term: String,
        /// Only articles published on or after this date (YYYY-MM-DD)
        #[arg(long)]
        date_from: Option<String>,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,
    },
    /// Search, normalize and publish to the broker named by the reference
    Publish {
        term: String,
        /// SNS topic ARN or SQS queue URL
        broker_reference: String,
        #[arg(long)]
        date_from: Option<String>,
        /// Record the message in memory instead of calling AWS
        #[arg(long)]
        dry_run: bool,
    },
    /// Run one invocation event read from a file, or stdin when omitted
    Invoke {
        #[arg(long)]
        event: Option<PathBuf>,
    },
    /// Serve the HTTP surface
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: SocketAddr,
    },
}

/// Manager whose publishers only record in memory.
fn offline_manager(config: &Config) -> nw_core::Result<(PublishManager, Arc<MemoryPublisher>, Arc<MemoryPublisher>)> {
    let search = GuardianClient::from_config(config)?;
    let topic = Arc::new(MemoryPublisher::new(BrokerType::Sns));
    let queue = Arc::new(MemoryPublisher::new(BrokerType::Sqs));
    let manager = PublishManager::new(Arc::new(search), topic.clone(), queue.clone());
    Ok((manager, topic, queue))
}

fn read_event(path: Option<&PathBuf>) -> anyhow::Result<Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read event from stdin")?;
            raw
        }
    };
    serde_json::from_str(&raw).context("Event is not valid JSON")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    let cli = Cli::parse();
    let config = config.with_api_key(cli.api_key.clone());

    init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));

    match cli.command {
        Commands::Search { term, date_from, page_size } => {
            let (manager, _, _) = offline_manager(&config)?;
            let query = SearchQuery::new(term).with_date_from(date_from).with_page_size(page_size);
            let response = manager.search_articles(&query).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Publish {
            term,
            broker_reference,
            date_from,
            dry_run,
        } => {
            let result = if dry_run {
                let (manager, topic, queue) = offline_manager(&config)?;
                let result = manager
                    .publish_articles(&term, &broker_reference, date_from.as_deref())
                    .await?;
                for (reference, message) in topic.published().iter().chain(queue.published().iter()) {
                    info!("🧪 Dry run for {}: {}", reference, message.body);
                }
                result
            } else {
                let state = AppState::from_config(&config).await?;
                state
                    .manager
                    .publish_articles(&term, &broker_reference, date_from.as_deref())
                    .await?
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Invoke { event } => {
            let event = read_event(event.as_ref())?;
            let state = AppState::from_config(&config).await?;
            let response = handle_event(&state.manager, event).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Serve { addr } => {
            let state = AppState::from_config(&config).await?;
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!("🚀 Listening on {}", addr);
            axum::serve(listener, create_app(state)).await?;
        }
    }

    Ok(())
}
