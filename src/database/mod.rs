// region:    --- Imports
use crate::error::{MarketError, MarketResult};
use crate::listing::seed::Catalogue;
use crate::repository::queries;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

pub struct DatabaseManager {
    pub pool: Arc<PgPool>,
}

impl DatabaseManager {
    /// 데이터베이스 매니저 생성
    pub async fn new(database_url: &str, max_connections: u32) -> MarketResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// 트랜잭션 실행
    pub async fn transaction<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: for<'c> FnOnce(
            &'c mut sqlx::Transaction<'_, sqlx::Postgres>,
        ) -> Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'c>>,
        E: From<sqlx::Error>,
    {
        let mut tx = self.pool.begin().await?;
        let result = f(&mut tx).await;
        match result {
            Ok(r) => {
                tx.commit().await?;
                Ok(r)
            }
            Err(e) => {
                tx.rollback().await?;
                Err(e)
            }
        }
    }

    /// 데이터베이스 초기화. `reset`이면 테이블을 지우고 다시 만든다.
    pub async fn initialize_database(&self, reset: bool) -> Result<(), sqlx::Error> {
        if reset {
            // 00-recreate-db.sql 실행
            let recreate_db_sql = include_str!("../sql/00-recreate-db.sql");
            self.execute_multi_query(recreate_db_sql).await?;
        }

        // 01-create-schema.sql 실행
        let create_schema_sql = include_str!("../sql/01-create-schema.sql");
        self.execute_multi_query(create_schema_sql).await?;

        Ok(())
    }

    /// 상품 테이블이 비어 있을 때만 시드 데이터 적재
    pub async fn seed_if_empty(&self, catalogue: Catalogue) -> MarketResult<bool> {
        let count: i64 = sqlx::query_scalar(queries::COUNT_LISTINGS)
            .fetch_one(&*self.pool)
            .await?;
        if count > 0 {
            info!("{:<12} --> 기존 데이터 유지 (상품 {}개)", "Database", count);
            return Ok(false);
        }

        self.transaction(|tx| {
            Box::pin(async move {
                for user in &catalogue.users {
                    sqlx::query(queries::INSERT_USER)
                        .bind(user.id)
                        .bind(&user.name)
                        .bind(&user.email)
                        .bind(user.role.as_str())
                        .execute(&mut **tx)
                        .await?;
                }
                for listing in &catalogue.listings {
                    sqlx::query(queries::INSERT_LISTING)
                        .bind(listing.id)
                        .bind(listing.seller_id)
                        .bind(&listing.title)
                        .bind(&listing.description)
                        .bind(listing.start_price)
                        .bind(listing.current_price)
                        .bind(listing.end_time)
                        .bind(listing.created_at)
                        .bind(listing.category.slug())
                        .bind(&listing.image_url)
                        .bind(listing.bids_count)
                        .execute(&mut **tx)
                        .await?;
                }
                for bid in &catalogue.bids {
                    sqlx::query(queries::INSERT_SEED_BID)
                        .bind(bid.id)
                        .bind(bid.listing_id)
                        .bind(bid.user_id)
                        .bind(bid.bid_amount)
                        .bind(bid.bid_time)
                        .execute(&mut **tx)
                        .await?;
                }
                sqlx::query(queries::SYNC_SEQUENCES)
                    .execute(&mut **tx)
                    .await?;
                Ok::<(), MarketError>(())
            })
        })
        .await?;

        info!("{:<12} --> 시드 데이터 적재 완료", "Database");
        Ok(true)
    }

    /// 여러 쿼리 실행
    async fn execute_multi_query(&self, sql: &str) -> Result<(), sqlx::Error> {
        for query in sql.split(';') {
            let query = query.trim();
            if !query.is_empty() {
                sqlx::query(query).execute(&*self.pool).await?;
            }
        }
        Ok(())
    }
}
