use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use navmenu_api::{build_router, AppState};
use navmenu_core::repositories::{MenuRepository, ModuleRepository};
use navmenu_infrastructure::{
    create_pool, run_migrations, InMemoryStore, PgMenuRepository, PgModuleRepository,
};
use navmenu_shared::config::AppConfig;
use navmenu_shared::StorageBackend;

type Repositories = (Arc<dyn ModuleRepository>, Arc<dyn MenuRepository>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let _guard = navmenu_shared::telemetry::init_telemetry();

    info!("Navmenu Server starting...");

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let (module_repo, menu_repo) = repositories(&config).await?;
    let state = AppState::new(module_repo, menu_repo, &config.app, &config.menu);
    let app = build_router(state);

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    match config.app.storage {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database)
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool).await.context("failed to run migrations")?;
            info!("Database connection established.");

            let module_repo: Arc<dyn ModuleRepository> = Arc::new(PgModuleRepository::new(pool.clone()));
            let menu_repo: Arc<dyn MenuRepository> = Arc::new(PgMenuRepository::new(pool));
            Ok((module_repo, menu_repo))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            let store = Arc::new(InMemoryStore::new());
            let module_repo: Arc<dyn ModuleRepository> = store.clone();
            let menu_repo: Arc<dyn MenuRepository> = store;
            Ok((module_repo, menu_repo))
        }
    }
}
