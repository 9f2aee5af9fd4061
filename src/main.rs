use library_lending::{
    adapters::mock::{NotificationSink as MockNotificationSink, UserStatusService},
    api::{handlers::AppState, router::create_router},
    application::lending::LendingManager,
    config::{AppConfig, DEFAULT_LOG_FILTER},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!(active_users = config.active_users.len(), "Configuration loaded");

    // Initialize adapters
    let user_status = Arc::new(UserStatusService::with_active_users(
        config.active_users.iter().cloned(),
    ));
    let notifications = Arc::new(MockNotificationSink::new());

    // Create application state
    let manager = LendingManager::new(user_status, notifications);
    let app_state = Arc::new(AppState { manager });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app).await?;

    Ok(())
}
