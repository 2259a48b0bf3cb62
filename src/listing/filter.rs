//! 경매 목록 필터링/정렬. 모두 메모리 위의 순수 함수.

use super::model::{AuctionItem, Category};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::str::FromStr;

/// 관련 상품 최대 개수
pub const RELATED_ITEMS_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    EndingSoon,
    /// 생성 시각이 아닌 종료 시각 역순
    NewlyListed,
    PriceAsc,
    PriceDesc,
    MostBids,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortBy(pub String);

impl FromStr for SortBy {
    type Err = UnknownSortBy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ending-soon" => Ok(SortBy::EndingSoon),
            "newly-listed" => Ok(SortBy::NewlyListed),
            "price-asc" => Ok(SortBy::PriceAsc),
            "price-desc" => Ok(SortBy::PriceDesc),
            "most-bids" => Ok(SortBy::MostBids),
            _ => Err(UnknownSortBy(s.to_string())),
        }
    }
}

/// 필터 옵션. 가격 범위는 센트 단위, 양 끝 포함.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub price_range: (i64, i64),
    pub sort_by: SortBy,
    pub show_ended_auctions: bool,
    pub category: Option<Category>,
}

impl FilterOptions {
    /// 목록의 가격 범위 전체를 쓰는 기본 필터
    pub fn for_items(items: &[AuctionItem]) -> Self {
        Self {
            price_range: price_bounds(items).unwrap_or((0, i64::MAX)),
            sort_by: SortBy::default(),
            show_ended_auctions: false,
            category: None,
        }
    }
}

/// 가격 범위 → 카테고리 → 종료 여부 순으로 거른 뒤 안정 정렬
pub fn apply_filters(items: &[AuctionItem], options: &FilterOptions) -> Vec<AuctionItem> {
    let (min, max) = options.price_range;
    let mut results: Vec<AuctionItem> = items
        .iter()
        .filter(|item| item.current_bid >= min && item.current_bid <= max)
        .filter(|item| options.category.map_or(true, |c| item.category == c))
        .filter(|item| options.show_ended_auctions || item.is_active)
        .cloned()
        .collect();

    sort_items(&mut results, options.sort_by);
    results
}

pub fn sort_items(items: &mut [AuctionItem], sort_by: SortBy) {
    match sort_by {
        SortBy::EndingSoon => items.sort_by_key(|item| item.end_time),
        SortBy::NewlyListed => items.sort_by_key(|item| Reverse(item.end_time)),
        SortBy::PriceAsc => items.sort_by_key(|item| item.current_bid),
        SortBy::PriceDesc => items.sort_by_key(|item| Reverse(item.current_bid)),
        SortBy::MostBids => items.sort_by_key(|item| Reverse(item.bids_count)),
    }
}

/// (최저 현재가, 최고 현재가). 빈 목록이면 None.
pub fn price_bounds(items: &[AuctionItem]) -> Option<(i64, i64)> {
    let min = items.iter().map(|item| item.current_bid).min()?;
    let max = items.iter().map(|item| item.current_bid).max()?;
    Some((min, max))
}

pub fn filter_by_category(items: &[AuctionItem], category: Option<Category>) -> Vec<AuctionItem> {
    match category {
        None => items.to_vec(),
        Some(c) => items.iter().filter(|item| item.category == c).cloned().collect(),
    }
}

/// 진행 중인 경매 중 현재가가 가장 높은 아이템
pub fn featured_auction(items: &[AuctionItem]) -> Option<&AuctionItem> {
    items
        .iter()
        .filter(|item| item.is_active)
        .max_by_key(|item| item.current_bid)
}

/// 같은 카테고리의 다른 아이템 (최대 4개)
pub fn related_items(items: &[AuctionItem], of: &AuctionItem) -> Vec<AuctionItem> {
    items
        .iter()
        .filter(|item| item.category == of.category && item.id != of.id)
        .take(RELATED_ITEMS_LIMIT)
        .cloned()
        .collect()
}
