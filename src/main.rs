// region:    --- Imports
use auction_marketplace::clock::SystemClock;
use auction_marketplace::config::Config;
use auction_marketplace::database::DatabaseManager;
use auction_marketplace::handlers::{self, AppState};
use auction_marketplace::listing::seed::seed_catalogue;
use auction_marketplace::marketplace::Marketplace;
use auction_marketplace::repository::{
    InMemoryListingRepository, ListingRepository, PostgresListingRepository,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env()?;

    // 저장소 선택: DATABASE_URL 이 있으면 PostgreSQL, 없으면 메모리
    let repo: Arc<dyn ListingRepository> = match &config.database_url {
        Some(database_url) => {
            let db_manager =
                Arc::new(DatabaseManager::new(database_url, config.max_connections).await?);

            // 데이터베이스 초기화
            if let Err(e) = db_manager.initialize_database(config.reset_database).await {
                error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
                return Err(e.into());
            }
            info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

            db_manager.seed_if_empty(seed_catalogue(Utc::now())).await?;
            Arc::new(PostgresListingRepository::new(db_manager))
        }
        None => {
            info!(
                "{:<12} --> 메모리 저장소 사용 (지연 {:?})",
                "Main", config.simulated_latency
            );
            Arc::new(InMemoryListingRepository::seeded(
                Utc::now(),
                config.simulated_latency,
            ))
        }
    };

    let marketplace =
        Marketplace::new(repo, Arc::new(SystemClock)).with_fetch_timeout(config.fetch_timeout);
    let routes_all = handlers::router(AppState { marketplace });

    // 리스너 생성
    let listener = TcpListener::bind(config.listen_addr.as_str()).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
