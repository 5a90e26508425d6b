use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;
use transit_info::{api, config::AppConfig, middlewares::RequestLogger, AppState};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    // el subscriber también recoge los registros de `log` del middleware
    let filter = EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = web::Data::new(AppState::load(&config)?);
    info!(
        "Serving {} stops and {} routes",
        state.stops.len(),
        state.routes.len()
    );

    let (host, port) = config.bind_address();
    info!("Listening on http://{}:{} ({} workers)", host, port, config.server.workers);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(RequestLogger::default())
            .configure(api::config)
    })
    .workers(config.server.workers.max(1))
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
