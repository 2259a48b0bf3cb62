//! 초기 카탈로그 데이터.
//! 모든 값은 기준 시각으로부터 결정적으로 계산되며, 저장소에 한 번만 적재된다.

use super::model::{Category, Listing, User, UserRole};
use crate::bidding::model::{Bid, BID_INCREMENT_PERCENT};
use chrono::{DateTime, Duration, Utc};

struct SeedListing {
    title: &'static str,
    description: &'static str,
    image_url: &'static str,
    current_price: i64,
    bids_count: i64,
    /// 기준 시각으로부터 종료까지 (분). 음수면 이미 종료됨.
    ends_in_minutes: i64,
    category: Category,
}

const SEED_LISTINGS: [SeedListing; 12] = [
    SeedListing {
        title: "Vintage Mechanical Watch",
        description: "Rare vintage watch with intricate mechanical movement, perfect for collectors.",
        image_url: "https://images.unsplash.com/photo-1524592094714-0f0654e20314",
        current_price: 29_999,
        bids_count: 18,
        ends_in_minutes: 30 * 60,
        category: Category::Collectibles,
    },
    SeedListing {
        title: "Modern Digital Camera",
        description: "High-resolution digital camera with 4K video recording capabilities.",
        image_url: "https://images.unsplash.com/photo-1502920917128-1aa500764cbd",
        current_price: 44_950,
        bids_count: 12,
        ends_in_minutes: 20 * 60,
        category: Category::Electronics,
    },
    SeedListing {
        title: "Handmade Leather Wallet",
        description: "Premium handcrafted leather wallet made from full-grain Italian leather.",
        image_url: "https://images.unsplash.com/photo-1627123424574-724758594e93",
        current_price: 4_999,
        bids_count: 7,
        ends_in_minutes: 80 * 60,
        category: Category::Fashion,
    },
    SeedListing {
        title: "Antique Wooden Chair",
        description: "18th century wooden chair with original upholstery, excellent condition.",
        image_url: "https://images.unsplash.com/photo-1506439773649-6e0eb8cfb237",
        current_price: 59_999,
        bids_count: 4,
        ends_in_minutes: 60 * 60,
        category: Category::HomeGarden,
    },
    SeedListing {
        title: "Original Abstract Painting",
        description: "One-of-a-kind abstract acrylic painting on canvas, signed by the artist.",
        image_url: "https://images.unsplash.com/photo-1579783902614-a3fb3927b6a5",
        current_price: 125_000,
        bids_count: 23,
        ends_in_minutes: 100 * 60,
        category: Category::Art,
    },
    SeedListing {
        title: "Diamond Engagement Ring",
        description: "1 carat diamond ring set in 14k white gold with halo setting.",
        image_url: "https://images.unsplash.com/photo-1605100804763-247f67b3557e",
        current_price: 299_999,
        bids_count: 16,
        ends_in_minutes: 18 * 60,
        category: Category::Jewelry,
    },
    SeedListing {
        title: "Signed Sports Memorabilia",
        description: "Official basketball signed by legendary NBA player, with certificate of authenticity.",
        image_url: "https://images.unsplash.com/photo-1519861531473-9200262188bf",
        current_price: 79_950,
        bids_count: 29,
        ends_in_minutes: -24 * 60,
        category: Category::Sports,
    },
    SeedListing {
        title: "Vintage Comic Book Collection",
        description: "Rare collection of first edition comic books from the 1960s in mint condition.",
        image_url: "https://images.unsplash.com/photo-1588497859490-85d1c17db96d",
        current_price: 350_000,
        bids_count: 42,
        ends_in_minutes: 45,
        category: Category::Collectibles,
    },
    SeedListing {
        title: "Gaming Laptop",
        description: "High-performance gaming laptop with latest graphics card and processor.",
        image_url: "https://images.unsplash.com/photo-1603302576837-37561b2e2302",
        current_price: 129_999,
        bids_count: 31,
        ends_in_minutes: 36 * 60,
        category: Category::Electronics,
    },
    SeedListing {
        title: "Designer Handbag",
        description: "Luxury designer handbag, limited edition with authentic serial number.",
        image_url: "https://images.unsplash.com/photo-1584917865442-de89df76afd3",
        current_price: 89_999,
        bids_count: 26,
        ends_in_minutes: -48 * 60,
        category: Category::Fashion,
    },
    SeedListing {
        title: "Vintage Record Player",
        description: "Fully restored vintage record player from the 1970s, perfect working condition.",
        image_url: "https://images.unsplash.com/photo-1561490497-43bc900ac2d8",
        current_price: 34_999,
        bids_count: 14,
        ends_in_minutes: 56 * 60,
        category: Category::Electronics,
    },
    SeedListing {
        title: "Rare Coin Collection",
        description: "Collection of rare historical coins from the 19th century.",
        image_url: "https://images.unsplash.com/photo-1621844061203-3f31a2de0aae",
        current_price: 275_000,
        bids_count: 8,
        ends_in_minutes: 130 * 60,
        category: Category::Collectibles,
    },
];

/// 판매자 두 명, 구매자 두 명
pub fn seed_users() -> Vec<User> {
    let user = |id: i64, name: &str, email: &str, role: UserRole| User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
    };
    vec![
        user(1, "John Seller", "john.seller@example.com", UserRole::Seller),
        user(2, "Jane Seller", "jane.seller@example.com", UserRole::Seller),
        user(3, "Alex Buyer", "alex.buyer@example.com", UserRole::Buyer),
        user(4, "Sam Buyer", "sam.buyer@example.com", UserRole::Buyer),
    ]
}

/// 시드 데이터 묶음
#[derive(Debug, Clone)]
pub struct Catalogue {
    pub users: Vec<User>,
    pub listings: Vec<Listing>,
    pub bids: Vec<Bid>,
}

/// 기준 시각 `now`로 카탈로그 생성.
/// 입찰 이력은 현재가에서 거꾸로 5%씩 내려가며 만들어, 모든 입찰이 최소 증가율을 지킨다.
pub fn seed_catalogue(now: DateTime<Utc>) -> Catalogue {
    let mut listings = Vec::with_capacity(SEED_LISTINGS.len());
    let mut bids = Vec::new();
    let mut next_bid_id = 1;

    for (idx, seed) in SEED_LISTINGS.iter().enumerate() {
        let listing_id = idx as i64 + 1;
        let end_time = now + Duration::minutes(seed.ends_in_minutes);
        let anchor = end_time.min(now);

        // 최신 입찰부터 과거로
        let mut amounts = Vec::with_capacity(seed.bids_count as usize);
        let mut amount = seed.current_price;
        for _ in 0..seed.bids_count {
            amounts.push(amount);
            amount = amount * 100 / (100 + BID_INCREMENT_PERCENT);
        }
        let start_price = amount;

        for (age, bid_amount) in amounts.iter().enumerate().rev() {
            bids.push(Bid {
                id: next_bid_id,
                listing_id,
                user_id: 3 + (age as i64 % 2),
                bid_amount: *bid_amount,
                bid_time: anchor - Duration::hours(age as i64 + 1),
            });
            next_bid_id += 1;
        }

        listings.push(Listing {
            id: listing_id,
            seller_id: if listing_id % 2 == 1 { 1 } else { 2 },
            title: seed.title.to_string(),
            description: Some(seed.description.to_string()),
            start_price,
            current_price: (seed.bids_count > 0).then_some(seed.current_price),
            end_time,
            created_at: anchor - Duration::hours(seed.bids_count + 1) - Duration::days(1),
            category: seed.category,
            image_url: seed.image_url.to_string(),
            bids_count: seed.bids_count,
        });
    }

    Catalogue {
        users: seed_users(),
        listings,
        bids,
    }
}
