use actix_web::{web, App, HttpServer};
use pickem::config::db::{DbKind, DbProfile};
use pickem::config::scores::ScoresConfig;
use pickem::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use pickem::routes;
use pickem::StateBuilder;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let scores_config = match ScoresConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid score feed configuration");
            std::process::exit(1);
        }
    };

    let app_state = match StateBuilder::new()
        .with_db(DbKind::Postgres, DbProfile::Prod)
        .with_scores_config(scores_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, "starting pickem backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
