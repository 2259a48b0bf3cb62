use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// region:    --- Category
/// 상품 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Electronics,
    Collectibles,
    Fashion,
    HomeGarden,
    Art,
    Jewelry,
    Sports,
    ToysHobbies,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Collectibles,
        Category::Fashion,
        Category::HomeGarden,
        Category::Art,
        Category::Jewelry,
        Category::Sports,
        Category::ToysHobbies,
    ];

    /// 저장/URL용 식별자
    pub fn slug(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Collectibles => "collectibles",
            Category::Fashion => "fashion",
            Category::HomeGarden => "home-garden",
            Category::Art => "art",
            Category::Jewelry => "jewelry",
            Category::Sports => "sports",
            Category::ToysHobbies => "toys-hobbies",
        }
    }

    /// 화면 표시용 이름
    pub fn label(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Collectibles => "Collectibles",
            Category::Fashion => "Fashion",
            Category::HomeGarden => "Home & Garden",
            Category::Art => "Art",
            Category::Jewelry => "Jewelry",
            Category::Sports => "Sports",
            Category::ToysHobbies => "Toys & Hobbies",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// slug와 표시 이름 모두 허용 (대소문자 무시)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(needle) || c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
// endregion: --- Category

// region:    --- User
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Buyer,
    Seller,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown user role: {0}")]
pub struct UnknownRole(pub String);

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Buyer => "buyer",
            UserRole::Seller => "seller",
        }
    }
}

impl TryFrom<String> for UserRole {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "buyer" => Ok(UserRole::Buyer),
            "seller" => Ok(UserRole::Seller),
            _ => Err(UnknownRole(value)),
        }
    }
}

// 사용자 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
}
// endregion: --- User

// region:    --- Listing
// 상품 모델 (저장소 스키마)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,
    pub seller_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_price: i64,
    /// 입찰이 없으면 None
    pub current_price: Option<i64>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub image_url: String,
    pub bids_count: i64,
}

impl Listing {
    /// 현재가. 입찰이 없으면 시작가.
    pub fn price(&self) -> i64 {
        self.current_price.unwrap_or(self.start_price)
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.end_time
    }
}
// endregion: --- Listing

// region:    --- Auction Item
/// 판매자 평점은 아직 저장하지 않으므로 고정값
pub const SELLER_RATING: f32 = 4.8;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: i64,
    pub name: String,
    pub rating: f32,
}

/// 화면 표시용 경매 아이템
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub current_bid: i64,
    pub starting_bid: i64,
    pub bids_count: i64,
    pub end_time: DateTime<Utc>,
    pub category: Category,
    pub is_active: bool,
    pub seller: Option<Seller>,
}

/// 저장소 Listing을 화면용 AuctionItem으로 변환
pub fn convert_listing_to_auction_item(
    listing: &Listing,
    seller: Option<&User>,
    now: DateTime<Utc>,
) -> AuctionItem {
    let image_url = if listing.image_url.is_empty() {
        PLACEHOLDER_IMAGE.to_string()
    } else {
        listing.image_url.clone()
    };

    AuctionItem {
        id: listing.id,
        title: listing.title.clone(),
        description: listing.description.clone().unwrap_or_default(),
        image_url,
        current_bid: listing.price(),
        starting_bid: listing.start_price,
        bids_count: listing.bids_count,
        end_time: listing.end_time,
        category: listing.category,
        is_active: listing.is_active_at(now),
        seller: seller.map(|user| Seller {
            id: user.id,
            name: user.name.clone(),
            rating: SELLER_RATING,
        }),
    }
}
// endregion: --- Auction Item
