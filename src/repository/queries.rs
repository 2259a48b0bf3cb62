/// 모든 상품 조회
pub const GET_ALL_LISTINGS: &str = "SELECT id, seller_id, title, description, start_price, current_price, end_time, created_at, category, image_url, bids_count FROM listings ORDER BY id";

/// 상품 조회
pub const GET_LISTING: &str = "SELECT id, seller_id, title, description, start_price, current_price, end_time, created_at, category, image_url, bids_count FROM listings WHERE id = $1";

/// 상품 조회 (행 잠금)
pub const LOCK_LISTING: &str = "SELECT id, seller_id, title, description, start_price, current_price, end_time, created_at, category, image_url, bids_count FROM listings WHERE id = $1 FOR UPDATE";

/// 상품 입찰 이력 조회
pub const GET_LISTING_BIDS: &str = r#"
    SELECT id, listing_id, user_id, bid_amount, bid_time
    FROM bids
    WHERE listing_id = $1
    ORDER BY bid_time DESC, id DESC
"#;

/// 상품 존재 여부
pub const LISTING_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM listings WHERE id = $1)";

/// 입찰 기록
pub const INSERT_BID: &str = r#"
    INSERT INTO bids (listing_id, user_id, bid_amount, bid_time)
    VALUES (
        $1, $2, $3,
        GREATEST($4, COALESCE((SELECT MAX(bid_time) FROM bids WHERE listing_id = $1), $4))
    )
    RETURNING id, listing_id, user_id, bid_amount, bid_time
"#;

/// 입찰 반영: 현재가 갱신 및 입찰 수 증가
pub const APPLY_BID: &str =
    "UPDATE listings SET current_price = $1, bids_count = bids_count + 1 WHERE id = $2";

/// 상품 현재가 수정
pub const UPDATE_LISTING_PRICE: &str = "UPDATE listings SET current_price = $1 WHERE id = $2";

/// 모든 사용자 조회
pub const GET_ALL_USERS: &str = "SELECT id, name, email, role FROM users ORDER BY id";

/// 사용자 존재 여부
pub const USER_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)";

/// 상품 개수
pub const COUNT_LISTINGS: &str = "SELECT COUNT(*) FROM listings";

// region:    --- Seed
pub const INSERT_USER: &str = "INSERT INTO users (id, name, email, role) VALUES ($1, $2, $3, $4)";

pub const INSERT_LISTING: &str = r#"
    INSERT INTO listings (id, seller_id, title, description, start_price, current_price, end_time, created_at, category, image_url, bids_count)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
"#;

pub const INSERT_SEED_BID: &str =
    "INSERT INTO bids (id, listing_id, user_id, bid_amount, bid_time) VALUES ($1, $2, $3, $4, $5)";

/// 명시적 id로 적재한 뒤 시퀀스 위치 맞추기
pub const SYNC_SEQUENCES: &str = r#"
    SELECT setval(pg_get_serial_sequence('users', 'id'), (SELECT COALESCE(MAX(id), 1) FROM users)),
           setval(pg_get_serial_sequence('listings', 'id'), (SELECT COALESCE(MAX(id), 1) FROM listings)),
           setval(pg_get_serial_sequence('bids', 'id'), (SELECT COALESCE(MAX(id), 1) FROM bids))
"#;
// endregion: --- Seed
