// region:    --- Imports
use crate::bidding::model::{minimum_bid, Bid, NewBid};
use crate::clock::Clock;
use crate::error::{MarketError, MarketResult};
use crate::formatting::format_currency;
use crate::listing::model::{Listing, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub mod memory;
pub mod postgres;
pub mod queries;

pub use memory::InMemoryListingRepository;
pub use postgres::PostgresListingRepository;

// endregion: --- Imports

// region:    --- Listing Repository Trait
/// 상품/입찰 저장소 트레이트
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// 모든 상품 조회 (id 오름차순)
    async fn fetch_listings(&self) -> MarketResult<Vec<Listing>>;

    async fn fetch_listing_by_id(&self, listing_id: i64) -> MarketResult<Option<Listing>>;

    /// 상품 입찰 이력 조회 (최신순). 없는 상품이면 NotFound.
    async fn fetch_bids_by_listing_id(&self, listing_id: i64) -> MarketResult<Vec<Bid>>;

    /// 입찰 검증, 기록, 현재가 갱신을 원자적으로 수행.
    /// 입찰 시각은 잠금을 잡은 뒤 `clock`에서 읽으므로 기록 순서와 시각 순서가 같다.
    async fn create_bid(&self, bid: NewBid, clock: Arc<dyn Clock>) -> MarketResult<Bid>;

    async fn update_listing_price(&self, listing_id: i64, price: i64) -> MarketResult<()>;

    async fn fetch_users(&self) -> MarketResult<Vec<User>>;
}
// endregion: --- Listing Repository Trait

// region:    --- Write Path Validation
/// 입찰 검증. 두 저장소 구현이 같은 규칙을 쓴다.
pub fn validate_bid(listing: &Listing, bid: &NewBid, at: DateTime<Utc>) -> MarketResult<()> {
    if !listing.is_active_at(at) {
        return Err(MarketError::validation(
            "ALREADY_ENDED",
            "This auction has ended",
        ));
    }

    let current = listing.price();
    let minimum = minimum_bid(current);
    if bid.bid_amount >= minimum {
        return Ok(());
    }

    match bid.expected_price {
        Some(expected) if expected != current => Err(MarketError::Conflict(format!(
            "Bid superseded: current bid is now {}, minimum {}",
            format_currency(current),
            format_currency(minimum)
        ))),
        _ => Err(MarketError::validation(
            "LOW_BID",
            format!("Bid must be at least {}", format_currency(minimum)),
        )),
    }
}

/// 가격 수정 검증: 시작가 미만, 현재가 미만 금지
pub fn validate_price_update(listing: &Listing, price: i64) -> MarketResult<()> {
    if price < listing.start_price {
        return Err(MarketError::validation(
            "PRICE_BELOW_START",
            format!(
                "Price must be at least the starting price {}",
                format_currency(listing.start_price)
            ),
        ));
    }
    if price < listing.price() {
        return Err(MarketError::validation(
            "PRICE_DECREASE",
            format!(
                "Price cannot go below the current bid {}",
                format_currency(listing.price())
            ),
        ));
    }
    Ok(())
}

pub(crate) fn listing_not_found(listing_id: i64) -> MarketError {
    MarketError::NotFound(format!("listing {listing_id}"))
}

pub(crate) fn user_not_found(user_id: i64) -> MarketError {
    MarketError::NotFound(format!("user {user_id}"))
}
// endregion: --- Write Path Validation
