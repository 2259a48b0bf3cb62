use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 최소 입찰 증가율 (%)
pub const BID_INCREMENT_PERCENT: i64 = 5;

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub listing_id: i64,
    pub user_id: i64,
    pub bid_amount: i64,
    pub bid_time: DateTime<Utc>,
}

/// 입찰 생성 요청
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBid {
    pub listing_id: i64,
    pub user_id: i64,
    pub bid_amount: i64,
    /// 입찰자가 보고 있던 현재가. 그 사이 가격이 바뀌었으면 Conflict로 판단한다.
    #[serde(default)]
    pub expected_price: Option<i64>,
}

/// 현재가 대비 최소 입찰가 (센트 단위 올림). 항상 현재가보다 크다.
pub fn minimum_bid(current_price: i64) -> i64 {
    let raised = current_price.saturating_mul(100 + BID_INCREMENT_PERCENT);
    (raised.saturating_add(99) / 100).max(current_price.saturating_add(1))
}
