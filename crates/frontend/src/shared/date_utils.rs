/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, Utc};

/// Format timestamp to DD.MM.YYYY HH:MM format
/// Example: 2024-03-15T14:02:26Z -> "15.03.2024 14:02"
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M").to_string()
}

/// Format optional timestamp, "-" when missing
pub fn format_datetime_opt(value: Option<DateTime<Utc>>) -> String {
    value
        .as_ref()
        .map(format_datetime)
        .unwrap_or_else(|| "-".to_string())
}

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let value = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_datetime(&value), "15.03.2024 14:02");
        assert_eq!(format_datetime_opt(None), "-");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
    }
}
