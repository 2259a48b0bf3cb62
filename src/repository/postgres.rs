// region:    --- Imports
use super::{
    listing_not_found, queries, user_not_found, validate_bid, validate_price_update,
    ListingRepository,
};
use crate::bidding::model::{Bid, NewBid};
use crate::clock::Clock;
use crate::database::DatabaseManager;
use crate::error::{MarketError, MarketResult};
use crate::listing::model::{Listing, User};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Postgres Repository
/// PostgreSQL 저장소
pub struct PostgresListingRepository {
    db_manager: Arc<DatabaseManager>,
}

impl PostgresListingRepository {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

#[async_trait]
impl ListingRepository for PostgresListingRepository {
    async fn fetch_listings(&self) -> MarketResult<Vec<Listing>> {
        info!("{:<12} --> 상품 목록 조회", "Repository");
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, Listing>(queries::GET_ALL_LISTINGS)
                        .fetch_all(&mut **tx)
                        .await
                        .map_err(MarketError::from)
                })
            })
            .await
    }

    async fn fetch_listing_by_id(&self, listing_id: i64) -> MarketResult<Option<Listing>> {
        info!("{:<12} --> 상품 조회 id: {}", "Repository", listing_id);
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                        .bind(listing_id)
                        .fetch_optional(&mut **tx)
                        .await
                        .map_err(MarketError::from)
                })
            })
            .await
    }

    async fn fetch_bids_by_listing_id(&self, listing_id: i64) -> MarketResult<Vec<Bid>> {
        info!("{:<12} --> 입찰 이력 조회 id: {}", "Repository", listing_id);
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let exists: bool = sqlx::query_scalar(queries::LISTING_EXISTS)
                        .bind(listing_id)
                        .fetch_one(&mut **tx)
                        .await?;
                    if !exists {
                        return Err(listing_not_found(listing_id));
                    }

                    sqlx::query_as::<_, Bid>(queries::GET_LISTING_BIDS)
                        .bind(listing_id)
                        .fetch_all(&mut **tx)
                        .await
                        .map_err(MarketError::from)
                })
            })
            .await
    }

    async fn create_bid(&self, bid: NewBid, clock: Arc<dyn Clock>) -> MarketResult<Bid> {
        info!(
            "{:<12} --> 입찰 생성 listing: {}, amount: {}",
            "Repository", bid.listing_id, bid.bid_amount
        );
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let user_exists: bool = sqlx::query_scalar(queries::USER_EXISTS)
                        .bind(bid.user_id)
                        .fetch_one(&mut **tx)
                        .await?;
                    if !user_exists {
                        return Err(user_not_found(bid.user_id));
                    }

                    // 동시 입찰은 행 잠금으로 직렬화
                    let listing = sqlx::query_as::<_, Listing>(queries::LOCK_LISTING)
                        .bind(bid.listing_id)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| listing_not_found(bid.listing_id))?;

                    // 잠금 이후 시각을 읽어야 기록 순서와 시각 순서가 같다
                    let now = clock.now();
                    if let Err(e) = validate_bid(&listing, &bid, now) {
                        warn!("{:<12} --> 입찰 거절: {}", "Repository", e);
                        return Err(e);
                    }

                    let created = sqlx::query_as::<_, Bid>(queries::INSERT_BID)
                        .bind(bid.listing_id)
                        .bind(bid.user_id)
                        .bind(bid.bid_amount)
                        .bind(now)
                        .fetch_one(&mut **tx)
                        .await?;

                    sqlx::query(queries::APPLY_BID)
                        .bind(bid.bid_amount)
                        .bind(bid.listing_id)
                        .execute(&mut **tx)
                        .await?;

                    Ok::<Bid, MarketError>(created)
                })
            })
            .await
    }

    async fn update_listing_price(&self, listing_id: i64, price: i64) -> MarketResult<()> {
        info!(
            "{:<12} --> 상품 가격 수정 id: {}, price: {}",
            "Repository", listing_id, price
        );
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    let listing = sqlx::query_as::<_, Listing>(queries::LOCK_LISTING)
                        .bind(listing_id)
                        .fetch_optional(&mut **tx)
                        .await?
                        .ok_or_else(|| listing_not_found(listing_id))?;
                    validate_price_update(&listing, price)?;

                    sqlx::query(queries::UPDATE_LISTING_PRICE)
                        .bind(price)
                        .bind(listing_id)
                        .execute(&mut **tx)
                        .await?;
                    Ok::<(), MarketError>(())
                })
            })
            .await
    }

    async fn fetch_users(&self) -> MarketResult<Vec<User>> {
        info!("{:<12} --> 사용자 목록 조회", "Repository");
        self.db_manager
            .transaction(|tx| {
                Box::pin(async move {
                    sqlx::query_as::<_, User>(queries::GET_ALL_USERS)
                        .fetch_all(&mut **tx)
                        .await
                        .map_err(MarketError::from)
                })
            })
            .await
    }
}
// endregion: --- Postgres Repository
