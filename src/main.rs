use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use huddle_api::config::Config;
use huddle_api::services::{GoogleVerifier, Mailer};
use huddle_api::{routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "starting huddle-api on {}:{}",
        config.server_host,
        config.server_port
    );

    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!().run(&db).await?;
    tracing::info!("database pool ready, migrations applied");

    let mailer = Mailer::new(&config).map_err(|e| anyhow::anyhow!("mailer setup failed: {e}"))?;

    let google = match config.google_client_id.clone() {
        Some(client_id) => Some(GoogleVerifier::new(client_id)),
        None => {
            tracing::warn!("GOOGLE_CLIENT_ID not set, Google login disabled");
            None
        }
    };

    let state = web::Data::new(AppState {
        db,
        config: config.clone(),
        mailer,
        google,
    });

    let bind_addr = (config.server_host.clone(), config.server_port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
