use chrono::{NaiveDate, NaiveTime, Utc};
use crate::error::AppError;

/// Strict 24-hour `HH:MM` check: exactly five characters, zero-padded hour
/// 00-23, zero-padded minute 00-59. The lenient chrono parser accepts
/// single-digit hours, so this runs as a separate gate after parsing.
pub fn is_strict_hhmm(time: &str) -> bool {
    let b = time.as_bytes();
    if b.len() != 5 || b[2] != b':' {
        return false;
    }
    let digits = [b[0], b[1], b[3], b[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hour = (b[0] - b'0') * 10 + (b[1] - b'0');
    let minute = (b[3] - b'0') * 10 + (b[4] - b'0');
    hour <= 23 && minute <= 59
}

/// Validates the proposed schedule of an event and returns the parsed parts.
///
/// Check order is part of the contract: a combined date+time that parses but
/// lies in the past is rejected before the strict time-format gate, so
/// "2020-01-01" + "9:00" reports the past date, not the loose format.
pub fn validate_schedule(date: &str, time: &str) -> Result<(NaiveDate, NaiveTime), AppError> {
    let parsed_date = NaiveDate::parse_from_str(date, "%Y-%m-%d");
    let parsed_time = NaiveTime::parse_from_str(time, "%H:%M");

    let (Ok(event_date), Ok(event_time)) = (parsed_date, parsed_time) else {
        return Err(AppError::Validation(
            "Invalid date/time format. Use YYYY-MM-DD for date and HH:MM for time (24-hour format)".to_string(),
        ));
    };

    if event_date.and_time(event_time) <= Utc::now().naive_utc() {
        return Err(AppError::Validation("Event must be in the future".to_string()));
    }

    if !is_strict_hhmm(time) {
        return Err(AppError::Validation("Time must be in HH:MM 24-hour format".to_string()));
    }

    Ok((event_date, event_time))
}

/// The requested capacity may not exceed what the venue can hold. The error
/// message cites both numbers.
pub fn ensure_capacity(requested: i64, venue_capacity: i32) -> Result<(), AppError> {
    if requested > venue_capacity as i64 {
        return Err(AppError::Validation(format!(
            "Event capacity ({}) exceeds venue capacity ({})",
            requested, venue_capacity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn future_date() -> String {
        (Utc::now() + Duration::days(30)).format("%Y-%m-%d").to_string()
    }

    #[test]
    fn strict_hhmm_accepts_padded_24h_times() {
        assert!(is_strict_hhmm("00:00"));
        assert!(is_strict_hhmm("09:30"));
        assert!(is_strict_hhmm("18:00"));
        assert!(is_strict_hhmm("23:59"));
    }

    #[test]
    fn strict_hhmm_rejects_loose_formats() {
        assert!(!is_strict_hhmm("9:30"));
        assert!(!is_strict_hhmm("24:00"));
        assert!(!is_strict_hhmm("12:60"));
        assert!(!is_strict_hhmm("12-30"));
        assert!(!is_strict_hhmm("12:3"));
        assert!(!is_strict_hhmm(" 9:30"));
        assert!(!is_strict_hhmm("12:300"));
    }

    #[test]
    fn schedule_in_the_future_passes() {
        let result = validate_schedule(&future_date(), "18:00");
        assert!(result.is_ok());
    }

    #[test]
    fn unparseable_date_is_rejected_as_format_error() {
        let err = validate_schedule("01-06-2030", "18:00").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Invalid date/time format")));
    }

    #[test]
    fn past_schedule_is_rejected() {
        let err = validate_schedule("2020-01-01", "18:00").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Event must be in the future"));
    }

    #[test]
    fn past_check_precedes_strict_time_format() {
        // "9:00" parses leniently, so the past date wins.
        let err = validate_schedule("2020-01-01", "9:00").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Event must be in the future"));
    }

    #[test]
    fn future_but_unpadded_time_fails_strict_gate() {
        let err = validate_schedule(&future_date(), "9:00").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Time must be in HH:MM 24-hour format"));
    }

    #[test]
    fn capacity_within_venue_limit_passes() {
        assert!(ensure_capacity(100, 100).is_ok());
        assert!(ensure_capacity(1, 100).is_ok());
    }

    #[test]
    fn capacity_error_cites_both_numbers() {
        let err = ensure_capacity(150, 100).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("150"));
                assert!(msg.contains("100"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
