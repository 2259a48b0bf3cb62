/// 마켓플레이스 파사드
/// 저장소와 시계를 주입받아 상품/입찰 연산을 제공한다.
/// 조회 연산은 타임아웃을 걸고, 일시적 실패는 제한된 횟수만큼 재시도한다.
/// 입찰 생성은 멱등이 아니므로 재시도하지 않는다.
// region:    --- Imports
use crate::bidding::model::{Bid, NewBid};
use crate::clock::Clock;
use crate::error::{MarketError, MarketResult};
use crate::listing::model::{convert_listing_to_auction_item, AuctionItem, Listing, User};
use crate::repository::{listing_not_found, user_not_found, ListingRepository};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

// endregion: --- Imports

// 최대 재시도 횟수
pub const MAX_RETRIES: u32 = 3;

/// 첫 재시도 대기 시간 (재시도마다 두 배)
pub const RETRY_INITIAL_DELAY_MS: u64 = 50;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

// region:    --- Marketplace
#[derive(Clone)]
pub struct Marketplace {
    repo: Arc<dyn ListingRepository>,
    clock: Arc<dyn Clock>,
    fetch_timeout: Duration,
}

impl Marketplace {
    pub fn new(repo: Arc<dyn ListingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// 1. 상품 목록 조회
    pub async fn fetch_listings(&self) -> MarketResult<Vec<Listing>> {
        info!("{:<12} --> 상품 목록 조회", "Marketplace");
        self.read("fetch_listings", || self.repo.fetch_listings())
            .await
    }

    /// 2. 상품 조회
    pub async fn fetch_listing_by_id(&self, listing_id: i64) -> MarketResult<Listing> {
        info!("{:<12} --> 상품 조회 id: {}", "Marketplace", listing_id);
        self.read("fetch_listing_by_id", || {
            self.repo.fetch_listing_by_id(listing_id)
        })
        .await?
        .ok_or_else(|| listing_not_found(listing_id))
    }

    /// 3. 입찰 이력 조회 (최신순)
    pub async fn fetch_bids_by_listing_id(&self, listing_id: i64) -> MarketResult<Vec<Bid>> {
        info!("{:<12} --> 입찰 이력 조회 id: {}", "Marketplace", listing_id);
        self.read("fetch_bids_by_listing_id", || {
            self.repo.fetch_bids_by_listing_id(listing_id)
        })
        .await
    }

    /// 4. 입찰 생성
    pub async fn create_bid(&self, listing_id: i64, user_id: i64, amount: i64) -> MarketResult<Bid> {
        self.place_bid(NewBid {
            listing_id,
            user_id,
            bid_amount: amount,
            expected_price: None,
        })
        .await
    }

    /// 입찰 생성 (입찰자가 보고 있던 현재가 포함)
    pub async fn place_bid(&self, bid: NewBid) -> MarketResult<Bid> {
        info!("{:<12} --> 입찰 요청: {:?}", "Marketplace", bid);
        let created = tokio::time::timeout(
            self.fetch_timeout,
            self.repo.create_bid(bid, Arc::clone(&self.clock)),
        )
        .await
        .map_err(|_| MarketError::Transient("create_bid timed out".to_string()))??;
        info!(
            "{:<12} --> 입찰 성공 id: {}, amount: {}",
            "Marketplace", created.id, created.bid_amount
        );
        Ok(created)
    }

    /// 5. 상품 현재가 수정
    pub async fn update_listing_price(&self, listing_id: i64, price: i64) -> MarketResult<()> {
        info!(
            "{:<12} --> 상품 가격 수정 id: {}, price: {}",
            "Marketplace", listing_id, price
        );
        tokio::time::timeout(
            self.fetch_timeout,
            self.repo.update_listing_price(listing_id, price),
        )
        .await
        .map_err(|_| MarketError::Transient("update_listing_price timed out".to_string()))?
    }

    /// 사용자 조회
    pub async fn fetch_user(&self, user_id: i64) -> MarketResult<User> {
        info!("{:<12} --> 사용자 조회 id: {}", "Marketplace", user_id);
        self.read("fetch_users", || self.repo.fetch_users())
            .await?
            .into_iter()
            .find(|user| user.id == user_id)
            .ok_or_else(|| user_not_found(user_id))
    }

    /// 화면용 경매 아이템 목록
    pub async fn fetch_auction_items(&self) -> MarketResult<Vec<AuctionItem>> {
        let listings = self.fetch_listings().await?;
        let sellers = self.sellers().await?;
        let now = self.clock.now();
        Ok(listings
            .iter()
            .map(|listing| convert_listing_to_auction_item(listing, sellers.get(&listing.seller_id), now))
            .collect())
    }

    /// 화면용 경매 아이템
    pub async fn fetch_auction_item(&self, listing_id: i64) -> MarketResult<AuctionItem> {
        let listing = self.fetch_listing_by_id(listing_id).await?;
        let sellers = self.sellers().await?;
        Ok(convert_listing_to_auction_item(
            &listing,
            sellers.get(&listing.seller_id),
            self.clock.now(),
        ))
    }

    async fn sellers(&self) -> MarketResult<HashMap<i64, User>> {
        let users = self.read("fetch_users", || self.repo.fetch_users()).await?;
        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }

    /// 타임아웃 + 일시적 실패 재시도
    async fn read<T, F, Fut>(&self, op: &'static str, f: F) -> MarketResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = MarketResult<T>>,
    {
        let mut retries = 0;
        loop {
            let result = match tokio::time::timeout(self.fetch_timeout, f()).await {
                Ok(result) => result,
                Err(_) => Err(MarketError::Transient(format!("{op} timed out"))),
            };

            match result {
                Err(e) if e.is_transient() && retries < MAX_RETRIES => {
                    let delay = RETRY_INITIAL_DELAY_MS << retries;
                    retries += 1;
                    warn!(
                        "{:<12} --> {} 일시적 실패, 재시도 ({}/{}): {}",
                        "Marketplace", op, retries, MAX_RETRIES, e
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                other => return other,
            }
        }
    }
}
// endregion: --- Marketplace
