use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use voxcart::audio::StdinCapture;
use voxcart::config::AppConfig;
use voxcart::intent::CommandDispatcher;
use voxcart::kernel::ListeningLoop;
use voxcart::services::llm::LLMService;
use voxcart::services::ClassifierGateway;
use voxcart::store::memory::{InMemoryStorefront, TracingNotifier};
use voxcart::store::FilterStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Config, then logging (RUST_LOG wins over the config filter)
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("loading configuration")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber")?;

    tracing::info!(llm = %config.llm.base_url, "Starting voxcart. One command per line, ctrl-c to quit.");

    // 2. Storefront + classifier stack
    let shop = InMemoryStorefront::new();
    let mut storefront = shop.storefront();
    storefront.notifier = Arc::new(TracingNotifier);

    let generator = Arc::new(LLMService::new(&config.llm));
    let gateway = ClassifierGateway::new(generator);
    let dispatcher = CommandDispatcher::new(gateway, storefront);

    // 3. Listening loop
    let shutdown = CancellationToken::new();
    let capture = StdinCapture::new(shutdown.clone());
    let listening = ListeningLoop::with_cancel(config.recovery.clone(), dispatcher, capture, shutdown.clone());

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received");
            ctrl_c.cancel();
        }
    });

    let supervisor = listening.run().await;

    let snapshot = supervisor.state.log.snapshot();
    tracing::info!(
        total = snapshot.total,
        succeeded = snapshot.succeeded,
        failed = snapshot.failed,
        restarts = supervisor.state.restarts,
        sessions = supervisor.state.sessions_opened,
        route = %shop.page.route(),
        filters = %shop.filters.snapshot().describe(),
        "Session summary"
    );
    Ok(())
}
