use auction_marketplace::clock::ManualClock;
use auction_marketplace::handlers::{router, AppState};
use auction_marketplace::marketplace::Marketplace;
use auction_marketplace::repository::InMemoryListingRepository;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

/// 메모리 저장소로 서버를 띄우고 주소 반환
async fn spawn_app() -> String {
    let repo = InMemoryListingRepository::seeded(now(), Duration::ZERO);
    let marketplace = Marketplace::new(Arc::new(repo), Arc::new(ManualClock::new(now())));
    let app = router(AppState { marketplace });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service()).await.unwrap();
    });
    format!("http://{addr}")
}

async fn get_json(client: &Client, url: String) -> (StatusCode, Value) {
    let response = client.get(url).send().await.expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap())
}

async fn place_bid(client: &Client, base: &str, listing_id: i64, amount: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{base}/auction/{listing_id}/bids"))
        .json(&json!({ "user_id": 3, "amount": amount }))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap())
}

fn ids(items: &Value) -> Vec<i64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

/// 가격 필터 + 가격 오름차순
#[tokio::test]
async fn test_auctions_filtered_by_price() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, body) = get_json(
        &client,
        format!("{base}/auctions?min_price=0&max_price=500&sort_by=price-asc"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["items"]), vec![3, 1, 11, 2]);
    assert_eq!(body["total"], 4);
}

/// 종료된 경매 포함 여부
#[tokio::test]
async fn test_auctions_show_ended() {
    let base = spawn_app().await;
    let client = Client::new();

    let (_, active) = get_json(&client, format!("{base}/auctions")).await;
    assert_eq!(active["total"], 10);

    let (_, all) = get_json(&client, format!("{base}/auctions?show_ended=true")).await;
    assert_eq!(all["total"], 12);
}

#[tokio::test]
async fn test_auctions_rejects_unknown_sort() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{base}/auctions?sort_by=cheapest")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SORT");
}

/// 잘못된 쿼리/경로/본문도 JSON 에러 형식
#[tokio::test]
async fn test_malformed_requests_return_json_errors() {
    let base = spawn_app().await;
    let client = Client::new();

    for (path, code) in [
        ("/auctions?show_ended=maybe", "INVALID_FILTER"),
        ("/auctions?min_price=abc", "INVALID_PRICE"),
        ("/auction/abc", "INVALID_PATH"),
    ] {
        let (status, body) = get_json(&client, format!("{base}{path}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(body["code"], code, "{path}");
    }

    let response = client
        .post(format!("{base}/auction/2/bids"))
        .header("Content-Type", "application/json")
        .body("{\"user_id\": 3,")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_BODY");
}

/// 입찰 성공 후 상세와 이력에 반영
#[tokio::test]
async fn test_place_bid() {
    let base = spawn_app().await;
    let client = Client::new();

    // 현재가 $449.50 → 최소 $471.98
    let (_, detail) = get_json(&client, format!("{base}/auction/2")).await;
    assert_eq!(detail["minimumBidDisplay"], "$471.98");

    let (status, body) = place_bid(&client, &base, 2, json!("471.98")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["notification"]["kind"], "success");
    assert_eq!(body["notification"]["message"], "Bid of $471.98 placed successfully!");
    assert_eq!(body["submission"]["state"], "success");
    assert_eq!(body["item"]["currentBid"], 47_198);
    assert_eq!(body["item"]["bidsCount"], 13);

    let (_, history) = get_json(&client, format!("{base}/auction/2/bids")).await;
    assert_eq!(history[0]["bid_amount"], 47_198);
    assert_eq!(history[0]["user_id"], 3);

    let (_, detail) = get_json(&client, format!("{base}/auction/2")).await;
    assert_eq!(detail["item"]["currentBid"], 47_198);
    assert_eq!(detail["bidHistory"][0]["bidder"], "User***003");
}

#[tokio::test]
async fn test_low_bid_is_rejected() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, body) = place_bid(&client, &base, 2, json!(471.97)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["submission"]["state"], "validation-error");
    assert_eq!(body["submission"]["code"], "LOW_BID");
    assert_eq!(body["notification"]["message"], "Bid must be at least $471.98");
    assert_eq!(body["item"]["currentBid"], 44_950);

    let (status, body) = place_bid(&client, &base, 2, json!("abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["submission"]["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_bid_on_ended_auction_is_rejected() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, body) = place_bid(&client, &base, 7, json!("1000.00")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["submission"]["code"], "ALREADY_ENDED");

    let (_, listing) = get_json(&client, format!("{base}/listings/7")).await;
    assert_eq!(listing["current_price"], 79_950);
}

#[tokio::test]
async fn test_unknown_listing_is_not_found() {
    let base = spawn_app().await;
    let client = Client::new();

    for path in ["/auction/404", "/auction/404/bids", "/listings/404"] {
        let (status, body) = get_json(&client, format!("{base}{path}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body["code"], "NOT_FOUND");
    }

    let (status, _) = place_bid(&client, &base, 404, json!("10.00")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories_count_live_data() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, body) = get_json(&client, format!("{base}/categories")).await;
    assert_eq!(status, StatusCode::OK);
    let count = |id: &str| {
        body.as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == id)
            .map(|c| c["count"].as_i64().unwrap())
    };
    assert_eq!(count("electronics"), Some(3));
    assert_eq!(count("collectibles"), Some(3));
    assert_eq!(count("toys-hobbies"), Some(0));
}

#[tokio::test]
async fn test_home_featured_and_category_filter() {
    let base = spawn_app().await;
    let client = Client::new();

    let (_, home) = get_json(&client, format!("{base}/")).await;
    assert_eq!(home["featured"]["id"], 8);
    assert_eq!(home["auctions"].as_array().unwrap().len(), 12);

    let (_, fashion) = get_json(&client, format!("{base}/?category=fashion")).await;
    assert_eq!(ids(&fashion["auctions"]), vec![3, 10]);
    assert_eq!(fashion["selectedCategory"], "fashion");
}

#[tokio::test]
async fn test_listings_and_how_it_works() {
    let base = spawn_app().await;
    let client = Client::new();

    let (_, listings) = get_json(&client, format!("{base}/listings")).await;
    assert_eq!(listings.as_array().unwrap().len(), 12);

    let (status, guide) = get_json(&client, format!("{base}/how-it-works")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(guide["steps"].as_array().unwrap().len(), 6);
}
