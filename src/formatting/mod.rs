//! 화면 표시용 포맷 함수 모음.
//! 금액은 모두 센트 단위 정수(i64)로 다룬다.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// 센트 금액을 `$1,234.56` 형식으로 변환
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = abs / 100;
    let rest = abs % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{rest:02}")
}

/// 사용자가 입력한 금액 문자열을 센트로 변환.
/// 숫자가 아니거나, 음수거나, 센트 아래 자릿수가 있으면 None.
pub fn parse_amount(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let dollars = Decimal::from_str(&cleaned).ok()?;
    if dollars.is_sign_negative() && !dollars.is_zero() {
        return None;
    }
    let cents = dollars.checked_mul(Decimal::ONE_HUNDRED)?;
    if !cents.fract().is_zero() {
        return None;
    }
    cents.to_i64()
}

/// 종료 시각 표시: `10/18/2026 at 3:04:05 PM`
pub fn format_end_time(end_time: DateTime<Utc>) -> String {
    end_time.format("%-m/%-d/%Y at %-I:%M:%S %p").to_string()
}

/// 입찰 이력 등에 쓰는 상대 시간 표시
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if days < 1 {
        plural(hours, "hour")
    } else {
        plural(days, "day")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// 입찰자 마스킹: `User***003`
pub fn mask_bidder(user_id: i64) -> String {
    format!("User***{:03}", user_id % 1000)
}
