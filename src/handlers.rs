// region:    --- Imports
use crate::bidding::model::Bid;
use crate::bidding::submission::{BidSubmission, Notification, SubmissionState};
use crate::error::{MarketError, MarketResult};
use crate::formatting::parse_amount;
use crate::listing::filter::{FilterOptions, SortBy};
use crate::listing::model::{AuctionItem, Category, Listing};
use crate::marketplace::Marketplace;
use crate::views::{
    category_summaries, how_it_works, AuctionDetailView, AuctionsView, CategorySummary,
    HomeView, HowItWorksView,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// endregion: --- Imports

// region:    --- App State
#[derive(Clone)]
pub struct AppState {
    pub marketplace: Marketplace,
}

/// 라우터 구성
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_home))
        .route("/auctions", get(handle_auctions))
        .route("/auction/:id", get(handle_auction_detail))
        .route(
            "/auction/:id/bids",
            get(handle_get_bid_history).post(handle_place_bid),
        )
        .route("/categories", get(handle_categories))
        .route("/how-it-works", get(handle_how_it_works))
        .route("/listings", get(handle_get_listings))
        .route("/listings/:id", get(handle_get_listing))
        .layer(cors)
        .with_state(state)
}
// endregion: --- App State

// region:    --- Request / Response
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub category: Option<String>,
}

/// 가격은 달러 단위. 값 검사는 `filter_options`에서 한다.
#[derive(Debug, Default, Deserialize)]
pub struct AuctionsQuery {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<String>,
    pub show_ended: Option<String>,
    pub category: Option<String>,
}

/// 입력창 문자열 그대로 또는 숫자
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(f64),
}

impl AmountInput {
    fn as_raw(&self) -> String {
        match self {
            AmountInput::Text(raw) => raw.clone(),
            AmountInput::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceBidRequest {
    pub user_id: i64,
    pub amount: AmountInput,
}

#[derive(Debug, Serialize)]
pub struct PlaceBidResponse {
    pub notification: Notification,
    pub submission: SubmissionState,
    pub item: AuctionItem,
}
// endregion: --- Request / Response

// region:    --- Query Handlers

/// 홈 화면
pub async fn handle_home(
    State(state): State<AppState>,
    query: Result<Query<HomeQuery>, QueryRejection>,
) -> MarketResult<Json<HomeView>> {
    let Query(query) = query?;
    info!("{:<12} --> 홈 조회 category: {:?}", "Handler", query.category);
    let category = parse_category(query.category.as_deref())?;
    let items = state.marketplace.fetch_auction_items().await?;
    Ok(Json(HomeView::build(&items, category)))
}

/// 경매 목록 (필터/정렬)
pub async fn handle_auctions(
    State(state): State<AppState>,
    query: Result<Query<AuctionsQuery>, QueryRejection>,
) -> MarketResult<Json<AuctionsView>> {
    let Query(query) = query?;
    info!("{:<12} --> 경매 목록 조회: {:?}", "Handler", query);
    let items = state.marketplace.fetch_auction_items().await?;
    let filters = filter_options(&query, &items)?;
    Ok(Json(AuctionsView::build(&items, filters)))
}

/// 경매 상세
pub async fn handle_auction_detail(
    State(state): State<AppState>,
    listing_id: Result<Path<i64>, PathRejection>,
) -> MarketResult<Json<AuctionDetailView>> {
    let Path(listing_id) = listing_id?;
    info!("{:<12} --> 경매 상세 조회 id: {}", "Handler", listing_id);
    let items = state.marketplace.fetch_auction_items().await?;
    let item = items
        .iter()
        .find(|item| item.id == listing_id)
        .cloned()
        .ok_or_else(|| MarketError::NotFound(format!("listing {listing_id}")))?;
    let bids = state.marketplace.fetch_bids_by_listing_id(listing_id).await?;
    Ok(Json(AuctionDetailView::build(
        item,
        &bids,
        &items,
        state.marketplace.now(),
    )))
}

/// 입찰 이력
pub async fn handle_get_bid_history(
    State(state): State<AppState>,
    listing_id: Result<Path<i64>, PathRejection>,
) -> MarketResult<Json<Vec<Bid>>> {
    let Path(listing_id) = listing_id?;
    info!("{:<12} --> 입찰 이력 조회 id: {}", "Handler", listing_id);
    let bids = state.marketplace.fetch_bids_by_listing_id(listing_id).await?;
    Ok(Json(bids))
}

/// 카테고리별 상품 수
pub async fn handle_categories(
    State(state): State<AppState>,
) -> MarketResult<Json<Vec<CategorySummary>>> {
    info!("{:<12} --> 카테고리 조회", "Handler");
    let items = state.marketplace.fetch_auction_items().await?;
    Ok(Json(category_summaries(&items)))
}

/// 이용 안내
pub async fn handle_how_it_works() -> Json<HowItWorksView> {
    Json(how_it_works())
}

/// 모든 상품 (저장소 스키마)
pub async fn handle_get_listings(State(state): State<AppState>) -> MarketResult<Json<Vec<Listing>>> {
    info!("{:<12} --> 모든 상품 조회", "Handler");
    Ok(Json(state.marketplace.fetch_listings().await?))
}

/// 상품 (저장소 스키마)
pub async fn handle_get_listing(
    State(state): State<AppState>,
    listing_id: Result<Path<i64>, PathRejection>,
) -> MarketResult<Json<Listing>> {
    let Path(listing_id) = listing_id?;
    info!("{:<12} --> 상품 조회 id: {}", "Handler", listing_id);
    Ok(Json(state.marketplace.fetch_listing_by_id(listing_id).await?))
}

// endregion: --- Query Handlers

// region:    --- Command Handlers

/// 입찰 요청 처리
pub async fn handle_place_bid(
    State(state): State<AppState>,
    listing_id: Result<Path<i64>, PathRejection>,
    request: Result<Json<PlaceBidRequest>, JsonRejection>,
) -> MarketResult<impl IntoResponse> {
    let Path(listing_id) = listing_id?;
    let Json(request) = request?;
    info!(
        "{:<12} --> 입찰 요청 처리 시작 id: {}, {:?}",
        "Handler", listing_id, request
    );
    let item = state.marketplace.fetch_auction_item(listing_id).await?;
    let mut submission = BidSubmission::new(item);
    let notification = submission
        .submit(&request.amount.as_raw(), request.user_id, &state.marketplace)
        .await?;

    let status = match submission.state() {
        SubmissionState::Success { .. } => StatusCode::CREATED,
        SubmissionState::ValidationError { code: "CONFLICT", .. } => StatusCode::CONFLICT,
        SubmissionState::ValidationError { .. } => StatusCode::BAD_REQUEST,
        SubmissionState::Idle | SubmissionState::Submitting => StatusCode::OK,
    };

    let response = PlaceBidResponse {
        notification,
        submission: submission.state().clone(),
        item: submission.into_item(),
    };
    Ok((status, Json(response)))
}

// endregion: --- Command Handlers

// region:    --- Helpers
fn parse_category(raw: Option<&str>) -> MarketResult<Option<Category>> {
    match raw {
        None | Some("") | Some("all") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e: crate::listing::model::UnknownCategory| {
                MarketError::validation("INVALID_CATEGORY", e.to_string())
            }),
    }
}

fn parse_flag(raw: Option<&str>) -> MarketResult<bool> {
    match raw {
        None | Some("") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(MarketError::validation(
            "INVALID_FILTER",
            format!("show_ended must be true or false, got {other:?}"),
        )),
    }
}

/// 쿼리 파라미터를 필터 옵션으로. 빠진 가격 경계는 목록의 최저/최고 현재가.
fn filter_options(query: &AuctionsQuery, items: &[AuctionItem]) -> MarketResult<FilterOptions> {
    let (lowest, highest) = FilterOptions::for_items(items).price_range;
    let bound = |value: Option<&str>, default: i64, name: &str| match value {
        None | Some("") => Ok(default),
        Some(raw) => parse_amount(raw).ok_or_else(|| {
            MarketError::validation(
                "INVALID_PRICE",
                format!("{name} must be a non-negative amount in dollars"),
            )
        }),
    };
    let min = bound(query.min_price.as_deref(), lowest, "min_price")?;
    let max = bound(query.max_price.as_deref(), highest, "max_price")?;

    let sort_by = match query.sort_by.as_deref() {
        None => SortBy::default(),
        Some(raw) => raw
            .parse()
            .map_err(|e: crate::listing::filter::UnknownSortBy| {
                MarketError::validation("INVALID_SORT", e.to_string())
            })?,
    };

    Ok(FilterOptions {
        price_range: (min, max),
        sort_by,
        show_ended_auctions: parse_flag(query.show_ended.as_deref())?,
        category: parse_category(query.category.as_deref())?,
    })
}
// endregion: --- Helpers

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category(None).unwrap(), None);
        assert_eq!(parse_category(Some("all")).unwrap(), None);
        assert_eq!(parse_category(Some("art")).unwrap(), Some(Category::Art));
        assert_eq!(parse_category(Some("vehicles")).unwrap_err().code(), "INVALID_CATEGORY");
    }

    #[test]
    fn test_filter_options_defaults_to_price_bounds() {
        let query = AuctionsQuery::default();
        let options = filter_options(&query, &[]).unwrap();
        assert_eq!(options.price_range, (0, i64::MAX));
        assert_eq!(options.sort_by, SortBy::EndingSoon);
        assert!(!options.show_ended_auctions);

        let query = AuctionsQuery {
            min_price: Some("0".to_string()),
            max_price: Some("500".to_string()),
            sort_by: Some("price-asc".to_string()),
            show_ended: Some("true".to_string()),
            category: None,
        };
        let options = filter_options(&query, &[]).unwrap();
        assert_eq!(options.price_range, (0, 50_000));
        assert_eq!(options.sort_by, SortBy::PriceAsc);
        assert!(options.show_ended_auctions);
    }

    #[test]
    fn test_filter_options_rejects_bad_input() {
        let query = AuctionsQuery {
            sort_by: Some("cheapest".to_string()),
            ..AuctionsQuery::default()
        };
        assert_eq!(filter_options(&query, &[]).unwrap_err().code(), "INVALID_SORT");

        for bad in ["-1", "abc", "10.555"] {
            let query = AuctionsQuery {
                min_price: Some(bad.to_string()),
                ..AuctionsQuery::default()
            };
            assert_eq!(filter_options(&query, &[]).unwrap_err().code(), "INVALID_PRICE", "{bad}");
        }

        let query = AuctionsQuery {
            show_ended: Some("maybe".to_string()),
            ..AuctionsQuery::default()
        };
        assert_eq!(filter_options(&query, &[]).unwrap_err().code(), "INVALID_FILTER");
    }

    #[test]
    fn test_amount_input_accepts_text_and_number() {
        let text: PlaceBidRequest =
            serde_json::from_str(r#"{"user_id": 3, "amount": "100.00"}"#).unwrap();
        assert_eq!(text.amount.as_raw(), "100.00");
        let number: PlaceBidRequest =
            serde_json::from_str(r#"{"user_id": 3, "amount": 99.75}"#).unwrap();
        assert_eq!(number.amount.as_raw(), "99.75");
    }
}
