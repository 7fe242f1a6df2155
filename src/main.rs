use dioxus_logger::tracing::{self, Level};
use recruit::server::{
    config::Config, error::Error, router, scheduler::Scheduler, startup,
};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Server stopped: {:?}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let esi_client = startup::build_esi_client(&config)?;
    let http_client = startup::build_http_client(&config)?;
    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&config).await?;

    let state = startup::build_app_state(&config, db, esi_client, http_client);

    Scheduler::new(state.clone()).await?.start().await?;

    let app = router::routes()
        .with_state(state)
        .layer(session)
        .layer(router::cors_layer(&config.frontend_url)?)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .map_err(|e| Error::InternalError(format!("Failed to bind {}: {}", config.bind_address, e)))?;

    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::InternalError(format!("Server error: {}", e)))?;

    Ok(())
}
