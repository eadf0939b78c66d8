use std::sync::Arc;

use economic_advisor_client::config::ClientConfig;
use economic_advisor_client::external::{AdvisorBackend, HttpAdvisorBackend};
use economic_advisor_client::logging::{init_logging, LoggingConfig};
use economic_advisor_client::services::identity_service::IdentityStore;
use economic_advisor_client::state::AppState;
use economic_advisor_client::store::FileStore;
use economic_advisor_client::ui::terminal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = ClientConfig::from_env()?;
    tracing::info!("Using advisor API at {}", config.api_base);

    let store = FileStore::new(&config.data_dir);
    let identity = IdentityStore::new(Arc::new(store));
    let user_id = identity.get_or_create_user_id();
    if identity.is_ephemeral() {
        eprintln!("Note: your user id could not be saved; personalization will reset next run.");
    }

    let backend: Arc<dyn AdvisorBackend> = Arc::new(HttpAdvisorBackend::new(config.clone())?);
    let state = AppState::new(config, backend, user_id);

    terminal::run(state).await?;
    Ok(())
}
