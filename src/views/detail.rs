use crate::bidding::model::{minimum_bid, Bid};
use crate::formatting::{format_currency, format_end_time, format_relative, mask_bidder};
use crate::listing::filter::related_items;
use crate::listing::model::AuctionItem;
use crate::timer::{time_left, TimeLeft};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 입찰 이력 한 줄
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidHistoryEntry {
    pub bidder: String,
    pub amount: i64,
    pub amount_display: String,
    pub when: String,
}

/// 경매 상세 화면
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionDetailView {
    pub item: AuctionItem,
    pub minimum_bid: i64,
    pub minimum_bid_display: String,
    pub current_bid_display: String,
    pub ends_at_display: String,
    pub time_left: TimeLeft,
    /// 종료된 경매의 낙찰가
    pub final_price_display: Option<String>,
    pub bid_history: Vec<BidHistoryEntry>,
    pub related: Vec<AuctionItem>,
}

impl AuctionDetailView {
    pub fn build(item: AuctionItem, bids: &[Bid], all_items: &[AuctionItem], now: DateTime<Utc>) -> Self {
        let minimum = minimum_bid(item.current_bid);
        let bid_history = bids
            .iter()
            .map(|bid| BidHistoryEntry {
                bidder: mask_bidder(bid.user_id),
                amount: bid.bid_amount,
                amount_display: format_currency(bid.bid_amount),
                when: format_relative(bid.bid_time, now),
            })
            .collect();

        Self {
            minimum_bid: minimum,
            minimum_bid_display: format_currency(minimum),
            current_bid_display: format_currency(item.current_bid),
            ends_at_display: format_end_time(item.end_time),
            time_left: time_left(item.end_time, now),
            final_price_display: (!item.is_active).then(|| format_currency(item.current_bid)),
            bid_history,
            related: related_items(all_items, &item),
            item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::model::convert_listing_to_auction_item;
    use crate::listing::seed::seed_catalogue;
    use chrono::TimeZone;

    #[test]
    fn test_detail_view_for_seeded_listing() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let catalogue = seed_catalogue(now);
        let items: Vec<AuctionItem> = catalogue
            .listings
            .iter()
            .map(|l| convert_listing_to_auction_item(l, None, now))
            .collect();
        let mut bids: Vec<Bid> = catalogue.bids.iter().filter(|b| b.listing_id == 8).cloned().collect();
        bids.sort_by(|a, b| b.bid_time.cmp(&a.bid_time));

        let view = AuctionDetailView::build(items[7].clone(), &bids, &items, now);

        assert_eq!(view.current_bid_display, "$3,500.00");
        assert_eq!(view.minimum_bid, 367_500);
        assert_eq!(view.minimum_bid_display, "$3,675.00");
        assert_eq!(view.time_left.label, "45m 0s");
        assert!(view.time_left.urgent);
        assert_eq!(view.final_price_display, None);
        assert_eq!(view.bid_history.len(), 42);
        assert_eq!(view.bid_history[0].amount_display, "$3,500.00");
        assert_eq!(view.bid_history[0].when, "1 hour ago");
        assert_eq!(view.related.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 12]);
    }

    #[test]
    fn test_detail_view_for_ended_listing() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let catalogue = seed_catalogue(now);
        let items: Vec<AuctionItem> = catalogue
            .listings
            .iter()
            .map(|l| convert_listing_to_auction_item(l, None, now))
            .collect();

        let view = AuctionDetailView::build(items[6].clone(), &[], &items, now);
        assert!(view.time_left.ended);
        assert_eq!(view.final_price_display.as_deref(), Some("$799.50"));
        assert!(view.related.is_empty());
    }
}
