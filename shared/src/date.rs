//! 时间处理模块
//!
//! 后端返回的时间是字符串：`created_at` 为不带时区的 ISO 8601 时间
//! （可能带小数秒，也可能带 `Z` 或偏移），`date` / `due_date` 为 `YYYY-MM-DD`。
//! 这里统一解析并格式化为界面显示用的文本。

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 解析后端时间字符串，带偏移的时间按原偏移取本地字面值
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| parse_day(s).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

/// 解析日期；也接受完整时间戳并截取日期部分
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| s.get(..10).and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()))
}

/// `Jan 15, 2025`
pub fn format_date(s: &str) -> Option<String> {
    parse_day(s).map(|d| d.format("%b %-d, %Y").to_string())
}

/// `January 2025`，用于"注册于"
pub fn format_month_year(s: &str) -> Option<String> {
    parse_day(s).map(|d| d.format("%B %Y").to_string())
}

/// 格式化失败时原样返回
pub fn display_date(s: &str) -> String {
    format_date(s).unwrap_or_else(|| s.to_string())
}

/// 今天起（含）未来的日期；无法解析的被排除
pub fn is_upcoming(s: &str, today: NaiveDate) -> bool {
    parse_day(s).is_some_and(|d| d >= today)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        assert_eq!(parse_timestamp("2025-01-15T09:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-01-15T09:30:00.123456").map(|d| d.date()),
            Some(expected.date())
        );
        assert_eq!(parse_timestamp("2025-01-15T09:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-15T09:30:00+08:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-15 09:30:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-01-15"),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(format_date("2025-01-05").as_deref(), Some("Jan 5, 2025"));
        assert_eq!(
            format_date("2025-11-20T18:00:00.5").as_deref(),
            Some("Nov 20, 2025")
        );
        assert_eq!(
            format_month_year("2024-03-02T00:00:00").as_deref(),
            Some("March 2024")
        );
        assert_eq!(display_date("soon"), "soon");
    }

    #[test]
    fn test_upcoming() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(is_upcoming("2025-06-01", today));
        assert!(is_upcoming("2025-07-01T10:00:00", today));
        assert!(!is_upcoming("2025-05-31", today));
        assert!(!is_upcoming("", today));
    }
}
