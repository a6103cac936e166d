//! 时间工具模块
//!
//! 服务端的 `createdAt` 既可能是 RFC 3339，也可能是不带时区的本地时间字符串。
//! 这里统一解析为 UTC，并生成 "3 minutes ago" 形式的相对时间标签。

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// 解析时间字符串
///
/// 返回 None 如果所有格式都解析失败
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // 不带时区的时间按 UTC 处理
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// 两个时间点之间的距离描述（不含前后缀）
fn distance_words(seconds: i64) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {}", unit)
        } else {
            format!("{} {}s", n, unit)
        }
    };

    match seconds {
        s if s < 30 => "less than a minute".to_string(),
        s if s < 90 => "1 minute".to_string(),
        s if s < 45 * MINUTE => plural((s + 30) / MINUTE, "minute"),
        s if s < 90 * MINUTE => "about 1 hour".to_string(),
        s if s < DAY => format!("about {}", plural((s + HOUR / 2) / HOUR, "hour")),
        s if s < 42 * HOUR => "1 day".to_string(),
        s if s < 30 * DAY => plural((s + DAY / 2) / DAY, "day"),
        s if s < 45 * DAY => "about 1 month".to_string(),
        s if s < YEAR => plural((s + MONTH / 2) / MONTH, "month"),
        s => format!("about {}", plural(s / YEAR, "year")),
    }
}

/// 生成相对时间标签
///
/// 过去的时间带 " ago" 后缀，未来的时间带 "in " 前缀
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - then).num_seconds();
    if diff >= 0 {
        format!("{} ago", distance_words(diff))
    } else {
        format!("in {}", distance_words(-diff))
    }
}

/// 解析字符串并生成相对时间标签，解析失败时原样返回
pub fn relative_label(created_at: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp(created_at) {
        Some(then) => time_ago(then, now),
        None => created_at.to_string(),
    }
}
