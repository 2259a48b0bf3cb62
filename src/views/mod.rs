/// 라우트별 화면 데이터 구성
/// 홈, 경매 목록, 카테고리, 이용 안내
// region:    --- Imports
use crate::listing::filter::{apply_filters, featured_auction, filter_by_category, price_bounds, FilterOptions};
use crate::listing::model::{AuctionItem, Category};
use serde::Serialize;

pub mod detail;

pub use detail::{AuctionDetailView, BidHistoryEntry};

// endregion: --- Imports

// region:    --- Home
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub featured: Option<AuctionItem>,
    pub categories: Vec<CategorySummary>,
    pub selected_category: Option<Category>,
    pub auctions: Vec<AuctionItem>,
}

impl HomeView {
    pub fn build(items: &[AuctionItem], selected_category: Option<Category>) -> Self {
        Self {
            featured: featured_auction(items).cloned(),
            categories: category_summaries(items),
            selected_category,
            auctions: filter_by_category(items, selected_category),
        }
    }
}
// endregion: --- Home

// region:    --- Auctions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionsView {
    pub total: usize,
    /// 필터 패널 기본값으로 쓰는 (최저, 최고) 현재가
    pub price_bounds: Option<(i64, i64)>,
    pub filters: FilterOptions,
    pub items: Vec<AuctionItem>,
}

impl AuctionsView {
    pub fn build(items: &[AuctionItem], filters: FilterOptions) -> Self {
        let results = apply_filters(items, &filters);
        Self {
            total: results.len(),
            price_bounds: price_bounds(items),
            filters,
            items: results,
        }
    }
}
// endregion: --- Auctions

// region:    --- Categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: Category,
    pub name: &'static str,
    pub count: usize,
}

/// 카테고리별 상품 수 (상품이 없는 카테고리도 포함)
pub fn category_summaries(items: &[AuctionItem]) -> Vec<CategorySummary> {
    Category::ALL
        .into_iter()
        .map(|category| CategorySummary {
            id: category,
            name: category.label(),
            count: items.iter().filter(|item| item.category == category).count(),
        })
        .collect()
}
// endregion: --- Categories

// region:    --- How It Works
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HowItWorksView {
    pub steps: Vec<Step>,
    pub faq: Vec<Faq>,
}

pub fn how_it_works() -> HowItWorksView {
    let step = |title, description| Step { title, description };
    let faq = |question, answer| Faq { question, answer };
    HowItWorksView {
        steps: vec![
            step("Create an Account", "Sign up for a free account to start bidding on items or list your own items for auction."),
            step("Browse Auctions", "Explore our wide range of auctions by category, price range, or time remaining."),
            step("Place Bids", "When you find something you like, place a bid of at least 5% above the current bid."),
            step("Win Auctions", "If you're the highest bidder when the auction ends, congratulations! The item is yours."),
            step("Secure Payment", "Complete your purchase with our secure payment system."),
            step("Delivery", "Once payment is confirmed, the seller will ship your item directly to you."),
        ],
        faq: vec![
            faq("What happens if I win an auction?", "You'll receive instructions on how to complete the purchase."),
            faq("How do I know if my bid was successful?", "A confirmation is shown as soon as your bid is recorded, and it appears at the top of the bid history."),
            faq("Is there a fee for listing items?", "A small commission is charged on successful sales. Listing items is free."),
        ],
    }
}
// endregion: --- How It Works

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::filter::SortBy;
    use crate::listing::model::convert_listing_to_auction_item;
    use crate::listing::seed::seed_catalogue;
    use chrono::{TimeZone, Utc};

    fn items() -> Vec<AuctionItem> {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        seed_catalogue(now)
            .listings
            .iter()
            .map(|l| convert_listing_to_auction_item(l, None, now))
            .collect()
    }

    #[test]
    fn test_home_view() {
        let items = items();
        let home = HomeView::build(&items, None);
        assert_eq!(home.featured.as_ref().map(|i| i.id), Some(8));
        assert_eq!(home.auctions.len(), 12);

        let fashion = HomeView::build(&items, Some(Category::Fashion));
        assert_eq!(fashion.auctions.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3, 10]);
    }

    #[test]
    fn test_category_summaries_count_live_data() {
        let summaries = category_summaries(&items());
        assert_eq!(summaries.len(), Category::ALL.len());
        let count = |c: Category| summaries.iter().find(|s| s.id == c).unwrap().count;
        assert_eq!(count(Category::Electronics), 3);
        assert_eq!(count(Category::Collectibles), 3);
        assert_eq!(count(Category::ToysHobbies), 0);
        assert_eq!(summaries.iter().map(|s| s.count).sum::<usize>(), 12);
    }

    #[test]
    fn test_auctions_view_reports_bounds_and_total() {
        let items = items();
        let view = AuctionsView::build(
            &items,
            FilterOptions {
                price_range: (0, 50_000),
                sort_by: SortBy::PriceAsc,
                show_ended_auctions: false,
                category: None,
            },
        );
        assert_eq!(view.total, 4);
        assert_eq!(view.price_bounds, Some((4_999, 350_000)));
    }
}
