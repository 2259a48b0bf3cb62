/// 입찰 제출 흐름
/// idle → submitting → (success | validation-error)
/// 화면 쪽 최소 입찰가 검사는 빠른 피드백 용도이고, 최종 판단은 저장소 쓰기 경로에서 한다.
// region:    --- Imports
use super::model::{minimum_bid, Bid, NewBid};
use crate::error::{MarketError, MarketResult};
use crate::formatting::{format_currency, parse_amount};
use crate::listing::model::AuctionItem;
use crate::marketplace::Marketplace;
use serde::Serialize;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- State
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success { bid: Bid },
    ValidationError { code: &'static str, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// 일시 알림
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    fn success(message: String) -> Self {
        Self {
            kind: NotificationKind::Success,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            kind: NotificationKind::Error,
            message,
        }
    }
}
// endregion: --- State

// region:    --- Bid Submission
/// 한 경매 아이템에 대한 입찰 폼 상태
#[derive(Debug, Clone)]
pub struct BidSubmission {
    item: AuctionItem,
    state: SubmissionState,
}

impl BidSubmission {
    pub fn new(item: AuctionItem) -> Self {
        Self {
            item,
            state: SubmissionState::Idle,
        }
    }

    pub fn item(&self) -> &AuctionItem {
        &self.item
    }

    pub fn into_item(self) -> AuctionItem {
        self.item
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// 현재 입찰가 + 5%
    pub fn minimum_bid(&self) -> i64 {
        minimum_bid(self.item.current_bid)
    }

    /// 입력값 검사. 통과하면 센트 금액.
    pub fn validate(&self, raw_amount: &str) -> Result<i64, Notification> {
        let minimum = self.minimum_bid();
        match parse_amount(raw_amount) {
            Some(amount) if amount >= minimum => Ok(amount),
            _ => Err(Notification::error(format!(
                "Bid must be at least {}",
                format_currency(minimum)
            ))),
        }
    }

    /// 입찰 제출.
    /// 검증 실패와 저장소의 Validation/Conflict 거절은 validation-error 상태와 알림으로 끝난다.
    /// 그 밖의 실패는 idle로 되돌리고 에러를 그대로 돌려준다.
    pub async fn submit(
        &mut self,
        raw_amount: &str,
        user_id: i64,
        marketplace: &Marketplace,
    ) -> MarketResult<Notification> {
        info!(
            "{:<12} --> 입찰 제출 listing: {}, amount: {:?}",
            "Submission", self.item.id, raw_amount
        );

        let amount = match self.validate(raw_amount) {
            Ok(amount) => amount,
            Err(notification) => {
                let code = if parse_amount(raw_amount).is_some() {
                    "LOW_BID"
                } else {
                    "INVALID_AMOUNT"
                };
                self.state = SubmissionState::ValidationError {
                    code,
                    message: notification.message.clone(),
                };
                return Ok(notification);
            }
        };

        self.state = SubmissionState::Submitting;
        let request = NewBid {
            listing_id: self.item.id,
            user_id,
            bid_amount: amount,
            expected_price: Some(self.item.current_bid),
        };

        match marketplace.place_bid(request).await {
            Ok(bid) => {
                self.item.current_bid = bid.bid_amount;
                self.item.bids_count += 1;
                let message = format!(
                    "Bid of {} placed successfully!",
                    format_currency(bid.bid_amount)
                );
                self.state = SubmissionState::Success { bid };
                Ok(Notification::success(message))
            }
            Err(e @ (MarketError::Validation { .. } | MarketError::Conflict(_))) => {
                warn!("{:<12} --> 입찰 거절: {}", "Submission", e);
                let message = e.to_string();
                self.state = SubmissionState::ValidationError {
                    code: e.code(),
                    message: message.clone(),
                };
                Ok(Notification::error(message))
            }
            Err(e) => {
                self.state = SubmissionState::Idle;
                Err(e)
            }
        }
    }
}
// endregion: --- Bid Submission
