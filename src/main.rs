use std::sync::Arc;

use actix_web::{middleware, App, HttpServer};
use clap::Parser;
use tracing::{info, warn};

use medical_records_api::db::build_pool;
use medical_records_api::store::{MedicalStore, MemoryStore, MysqlStore};
use medical_records_api::{configure_app, AppState, Config};

fn init_tracing(config: &Config) {
    let (filter, rejected) = config.log_filter();
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Some(e) = rejected {
        warn!(
            directive = config.log_level.as_deref().unwrap_or_default(),
            "log filter rejected, using info: {}", e
        );
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::parse();
    init_tracing(&config);

    let store: Arc<dyn MedicalStore> = if config.in_memory {
        warn!("serving from an in-memory store; nothing will be persisted");
        Arc::new(MemoryStore::with_catalog()?)
    } else {
        let pool = build_pool(&config.database_url(), config.pool_size)?;
        info!(pool_size = config.pool_size, "connected to database");
        Arc::new(MysqlStore::new(pool))
    };

    let state = AppState::new(store, config.page_size);
    info!(host = %config.host, port = config.port, page_size = config.page_size, "starting server");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(configure_app(state.clone()))
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    info!("server stopped");
    Ok(())
}
