//! 메모리 저장소. 호출마다 고정 지연을 흉내 내며, 시드 데이터는 생성 시 한 번만 적재한다.

// region:    --- Imports
use super::{listing_not_found, user_not_found, validate_bid, validate_price_update, ListingRepository};
use crate::bidding::model::{Bid, NewBid};
use crate::clock::Clock;
use crate::error::MarketResult;
use crate::listing::model::{Listing, User};
use crate::listing::seed::{seed_catalogue, Catalogue};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- In-Memory Repository
struct MemoryState {
    users: Vec<User>,
    listings: BTreeMap<i64, Listing>,
    bids: Vec<Bid>,
    next_bid_id: i64,
}

pub struct InMemoryListingRepository {
    state: RwLock<MemoryState>,
    latency: Duration,
}

impl InMemoryListingRepository {
    pub fn new(catalogue: Catalogue, latency: Duration) -> Self {
        let next_bid_id = catalogue.bids.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let listings = catalogue
            .listings
            .into_iter()
            .map(|listing| (listing.id, listing))
            .collect();

        Self {
            state: RwLock::new(MemoryState {
                users: catalogue.users,
                listings,
                bids: catalogue.bids,
                next_bid_id,
            }),
            latency,
        }
    }

    /// 기준 시각 `now`로 시드된 저장소
    pub fn seeded(now: DateTime<Utc>, latency: Duration) -> Self {
        Self::new(seed_catalogue(now), latency)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn fetch_listings(&self) -> MarketResult<Vec<Listing>> {
        info!("{:<12} --> 상품 목록 조회", "Repository");
        self.simulate_latency().await;
        let state = self.state.read().await;
        Ok(state.listings.values().cloned().collect())
    }

    async fn fetch_listing_by_id(&self, listing_id: i64) -> MarketResult<Option<Listing>> {
        info!("{:<12} --> 상품 조회 id: {}", "Repository", listing_id);
        self.simulate_latency().await;
        let state = self.state.read().await;
        Ok(state.listings.get(&listing_id).cloned())
    }

    async fn fetch_bids_by_listing_id(&self, listing_id: i64) -> MarketResult<Vec<Bid>> {
        info!("{:<12} --> 입찰 이력 조회 id: {}", "Repository", listing_id);
        self.simulate_latency().await;
        let state = self.state.read().await;
        if !state.listings.contains_key(&listing_id) {
            return Err(listing_not_found(listing_id));
        }

        let mut bids: Vec<Bid> = state
            .bids
            .iter()
            .filter(|b| b.listing_id == listing_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| b.bid_time.cmp(&a.bid_time).then(b.id.cmp(&a.id)));
        Ok(bids)
    }

    async fn create_bid(&self, bid: NewBid, clock: Arc<dyn Clock>) -> MarketResult<Bid> {
        info!(
            "{:<12} --> 입찰 생성 listing: {}, amount: {}",
            "Repository", bid.listing_id, bid.bid_amount
        );
        self.simulate_latency().await;

        // 검증부터 기록까지 쓰기 락 하나로 직렬화
        let mut state = self.state.write().await;
        if !state.users.iter().any(|u| u.id == bid.user_id) {
            return Err(user_not_found(bid.user_id));
        }
        let listing = state
            .listings
            .get(&bid.listing_id)
            .ok_or_else(|| listing_not_found(bid.listing_id))?;

        let now = clock.now();
        if let Err(e) = validate_bid(listing, &bid, now) {
            warn!("{:<12} --> 입찰 거절: {}", "Repository", e);
            return Err(e);
        }

        // 이력의 맨 앞은 항상 마지막으로 반영된 입찰
        let at = state
            .bids
            .iter()
            .filter(|b| b.listing_id == bid.listing_id)
            .map(|b| b.bid_time)
            .max()
            .map_or(now, |latest| latest.max(now));

        let created = Bid {
            id: state.next_bid_id,
            listing_id: bid.listing_id,
            user_id: bid.user_id,
            bid_amount: bid.bid_amount,
            bid_time: at,
        };
        state.next_bid_id += 1;
        state.bids.push(created.clone());

        if let Some(listing) = state.listings.get_mut(&bid.listing_id) {
            listing.current_price = Some(bid.bid_amount);
            listing.bids_count += 1;
        }

        Ok(created)
    }

    async fn update_listing_price(&self, listing_id: i64, price: i64) -> MarketResult<()> {
        info!(
            "{:<12} --> 상품 가격 수정 id: {}, price: {}",
            "Repository", listing_id, price
        );
        self.simulate_latency().await;
        let mut state = self.state.write().await;
        let listing = state
            .listings
            .get_mut(&listing_id)
            .ok_or_else(|| listing_not_found(listing_id))?;
        validate_price_update(listing, price)?;
        listing.current_price = Some(price);
        Ok(())
    }

    async fn fetch_users(&self) -> MarketResult<Vec<User>> {
        info!("{:<12} --> 사용자 목록 조회", "Repository");
        self.simulate_latency().await;
        let state = self.state.read().await;
        Ok(state.users.clone())
    }
}
// endregion: --- In-Memory Repository
