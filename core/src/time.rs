use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::error::TrackerError;

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Resolves a weekday name, abbreviation or `today` relative to `today`.
pub fn parse_day(input: &str, today: Weekday) -> Result<Weekday, TrackerError> {
    match input.trim().to_lowercase().as_str() {
        "today" | "tod" => Ok(today),
        other => parse_weekday_str(other).ok_or_else(|| TrackerError::UnknownDay(input.to_string())),
    }
}

fn parse_weekday_str(s: &str) -> Option<Weekday> {
    match s {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn today(now: NaiveDateTime) -> Weekday {
    now.weekday()
}

fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}

/// Whether the reminder window for the current day is already open.
pub fn in_reminder_window(now: NaiveDateTime, hour: u32) -> bool {
    now.hour() >= hour
}

/// Next `hour:00` boundary: today when it is still ahead, tomorrow once the window is open.
pub fn next_reminder_boundary(now: NaiveDateTime, hour: u32) -> NaiveDateTime {
    if in_reminder_window(now, hour) {
        at_hour(now.date() + Duration::days(1), hour)
    } else {
        at_hour(now.date(), hour)
    }
}
